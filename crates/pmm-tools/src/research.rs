use async_trait::async_trait;
use pmm_core::catalogue::Tool;
use pmm_core::error::{GatewayError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::truncate_chars;

const COMPETITIVE_INTEL_SOURCES: &[&str] = &[
    "Product pages and pricing",
    "G2/Capterra/TrustRadius reviews",
    "LinkedIn (team growth, hiring)",
    "Press releases and funding",
    "Job postings (roadmap signals)",
    "Social media and community",
    "Product Hunt launches",
    "Wayback Machine (messaging evolution)",
];

/// Map the competitive landscape for a product category.
pub struct SearchCompetitorsTool;

#[async_trait]
impl Tool for SearchCompetitorsTool {
    fn name(&self) -> &str {
        "search_competitors"
    }

    fn description(&self) -> &str {
        "Research competitors in a product category. Use this tool to understand \
         the competitive landscape, including positioning, messaging, and \
         pricing strategies."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_category": {
                    "type": "string",
                    "description": "The market category to research"
                },
                "known_competitors": {
                    "type": "string",
                    "description": "Competitors you already know about"
                },
                "focus_areas": {
                    "type": "string",
                    "description": "Specific aspects to focus on (pricing, messaging, features)"
                }
            },
            "required": ["product_category"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            product_category: String,
            known_competitors: Option<String>,
            focus_areas: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("search_competitors: {e}")))?;

        let known = args
            .known_competitors
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or("No known competitors specified. Will identify from category research.");
        let focus = args
            .focus_areas
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or("Full competitive analysis: positioning, messaging, pricing, features");
        let sources = COMPETITIVE_INTEL_SOURCES
            .iter()
            .map(|source| format!("- {source}"))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!(
            r#"## Competitive Landscape Analysis

### Category: {}

### Known Competitors
{}

### Research Focus
{}

### Competitive Matrix

| Competitor | Positioning | Target Segment | Pricing Model | Key Differentiator |
|------------|-------------|----------------|---------------|-------------------|
| [Comp A]   | [Position]  | [Who]          | [Model]       | [Differentiator]  |
| [Comp B]   | [Position]  | [Who]          | [Model]       | [Differentiator]  |
| [Comp C]   | [Position]  | [Who]          | [Model]       | [Differentiator]  |

### Messaging Analysis

**Common Themes Across Competitors:**
- Theme 1: [What everyone says]
- Theme 2: [Standard claims]
- Theme 3: [Expected messaging]

**Differentiation Opportunities:**
- Gap 1: [What no one is saying]
- Gap 2: [Underserved segment]
- Gap 3: [Unaddressed pain point]

### Sources Checked
{}

### Key Insights
1. [Most important competitive insight]
2. [Second insight]
3. [Third insight]

### Recommended Actions
- [ ] Deep dive on top 3 competitors
- [ ] Analyze their recent messaging changes
- [ ] Review their customer reviews for weaknesses
- [ ] Monitor their job postings for roadmap signals
"#,
            args.product_category, known, focus, sources
        ))
    }
}

/// Compare pricing models across the competitive set.
pub struct AnalyzePricingTool;

#[async_trait]
impl Tool for AnalyzePricingTool {
    fn name(&self) -> &str {
        "analyze_pricing"
    }

    fn description(&self) -> &str {
        "Analyze pricing strategies in the competitive landscape. Use this tool \
         to understand how competitors price and package their products, and \
         identify pricing opportunities."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_category": {
                    "type": "string",
                    "description": "The market category"
                },
                "competitors": {
                    "type": "string",
                    "description": "List of competitors to analyze"
                },
                "our_target_price": {
                    "type": "string",
                    "description": "Our intended price point for comparison"
                }
            },
            "required": ["product_category", "competitors"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            product_category: String,
            competitors: String,
            our_target_price: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("analyze_pricing: {e}")))?;

        let target_price = args
            .our_target_price
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("**Target Price**: {p}"))
            .unwrap_or_else(|| "**Target Price**: Not specified".to_string());

        Ok(format!(
            r#"## Competitive Pricing Analysis

### Category: {}
### Competitors Analyzed: {}

### Pricing Models in Market

| Competitor | Model | Entry Price | Growth Price | Enterprise | Free Tier |
|------------|-------|-------------|--------------|------------|-----------|
| [Comp A]   | [Per seat/Usage/Flat] | $X/mo | $Y/mo | Custom | Yes/No |
| [Comp B]   | [Per seat/Usage/Flat] | $X/mo | $Y/mo | Custom | Yes/No |
| [Comp C]   | [Per seat/Usage/Flat] | $X/mo | $Y/mo | Custom | Yes/No |

### Packaging Patterns
- **Entry Tier**: What's included, what's limited
- **Growth Tier**: Upgrade triggers, feature gates
- **Enterprise**: Custom pricing signals, negotiation room

### Price Positioning Options

{}

**Option 1: Premium (Above Market)**
- Justification required: [Unique value]
- Risk: Harder to win deals without strong differentiation

**Option 2: Parity (Market Rate)**
- Compete on features and experience
- Risk: Commodity perception

**Option 3: Value (Below Market)**
- Win on price, make up on volume
- Risk: Perceived as inferior

### Recommendations
1. [Primary pricing recommendation]
2. [Packaging recommendation]
3. [Discount/promotion strategy]

### Pricing Psychology Notes
- Anchor effect: Show enterprise first
- Decoy pricing: Make middle tier obvious choice
- Annual vs monthly: 2 months free for annual typical
"#,
            args.product_category, args.competitors, target_price
        ))
    }
}

/// Fetch public web content for competitive analysis.
pub struct FetchUrlTool {
    client: reqwest::Client,
}

impl Default for FetchUrlTool {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchUrlTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent("pmm-gateway/0.1")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &str {
        "fetch_url"
    }

    fn description(&self) -> &str {
        "Fetch content from a URL for analysis. Use this tool to retrieve \
         competitor pages, press releases, or other public web content \
         for analysis."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "The URL to fetch"
                }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            url: String,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("fetch_url: {e}")))?;

        // Fetch failures are reported back to the model as tool output, not
        // surfaced as gateway errors.
        let response = match self.client.get(&args.url).send().await {
            Ok(response) => response,
            Err(e) => return Ok(format!("Error fetching URL {}: {e}", args.url)),
        };
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Ok(format!("Error fetching URL {}: {e}", args.url)),
        };
        let preview = truncate_chars(&body, 2000);

        Ok(format!(
            r#"## URL Analysis: {}

### Status: {}

### Content Preview
{}...

### Key Elements Extracted
- **Page Title**: [Extracted]
- **H1**: [Main headline]
- **Meta Description**: [SEO description]
- **Key Messages**: [Bullet points from page]

### Analysis Notes
- Messaging tone: [Professional/Casual/Technical]
- Value props emphasized: [List]
- CTAs used: [Sign up/Demo/Contact]
- Social proof: [Logos/Testimonials/Numbers]
"#,
            args.url, status, preview
        ))
    }
}

/// Mine customer reviews for positioning insight.
pub struct AnalyzeReviewsTool;

#[async_trait]
impl Tool for AnalyzeReviewsTool {
    fn name(&self) -> &str {
        "analyze_reviews"
    }

    fn description(&self) -> &str {
        "Analyze customer reviews to understand sentiment and positioning \
         opportunities. Use this tool to mine competitor reviews for positioning \
         insights, objection handling, and differentiation opportunities."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_name": {
                    "type": "string",
                    "description": "The product to analyze reviews for"
                },
                "review_source": {
                    "type": "string",
                    "description": "Which review site (g2, capterra, trustradius)"
                },
                "focus": {
                    "type": "string",
                    "description": "Specific aspect to analyze (strengths, weaknesses, comparisons)"
                }
            },
            "required": ["product_name"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            product_name: String,
            review_source: Option<String>,
            focus: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("analyze_reviews: {e}")))?;

        let source = args
            .review_source
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("g2")
            .to_uppercase();
        let focus = args
            .focus
            .as_deref()
            .filter(|f| !f.is_empty())
            .unwrap_or("Full analysis");

        Ok(format!(
            r#"## Review Analysis: {}

### Source: {}
### Focus: {}

### Sentiment Summary
- **Overall Rating**: X.X / 5.0
- **Total Reviews**: XXX
- **Recent Trend**: [Improving/Stable/Declining]

### What Customers Love (Use in Battlecards)
1. [Strength 1] - Mentioned in X% of reviews
2. [Strength 2] - Mentioned in X% of reviews
3. [Strength 3] - Mentioned in X% of reviews

### What Customers Complain About (Opportunities)
1. [Weakness 1] - "Quote from review"
2. [Weakness 2] - "Quote from review"
3. [Weakness 3] - "Quote from review"

### Competitor Comparisons Mentioned
- vs [Competitor A]: [How they compare]
- vs [Competitor B]: [How they compare]

### Customer Language (Use in Messaging)
- Pain points described as: "[Customer words]"
- Benefits described as: "[Customer words]"
- Outcomes mentioned: "[Customer words]"

### Actionable Insights
1. [Insight for positioning]
2. [Insight for battlecard]
3. [Insight for sales enablement]

### Quotes for Sales Use
> "[Compelling positive quote]" - [Role], [Company Type]
> "[Quote about switching from competitor]" - [Role], [Company Type]
"#,
            args.product_name, source, focus
        ))
    }
}
