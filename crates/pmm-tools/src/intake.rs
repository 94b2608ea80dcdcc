use async_trait::async_trait;
use pmm_core::catalogue::Tool;
use pmm_core::error::{GatewayError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::truncate_chars;

/// Structure product inputs and surface gaps before positioning work starts.
pub struct AnalyzeProductTool;

#[async_trait]
impl Tool for AnalyzeProductTool {
    fn name(&self) -> &str {
        "analyze_product"
    }

    fn description(&self) -> &str {
        "Analyze a product to extract structured information for positioning work. \
         Use this tool when starting any PMM project to structure the inputs \
         and identify gaps in the available information."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_description": {
                    "type": "string",
                    "description": "Description of the product, features, and context"
                },
                "existing_materials": {
                    "type": "string",
                    "description": "Any existing positioning, messaging, or marketing materials"
                }
            },
            "required": ["product_description"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            product_description: String,
            existing_materials: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("analyze_product: {e}")))?;

        let materials = args
            .existing_materials
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(|m| format!("Reviewed: {}...", truncate_chars(m, 200)))
            .unwrap_or_else(|| "No existing materials provided - starting fresh.".to_string());

        Ok(format!(
            r#"## Product Analysis

### Input Summary
{}...

### Structured Extraction

**What I understand:**
- Product category and type
- Core problem being solved
- Key features mentioned
- Target audience indicators

**What I need to clarify:**
- Specific ICP definition (company size, role, industry)
- Quantified proof points (benchmarks, case studies)
- Competitive set and differentiation claims
- Current positioning (if any exists)
- Success metrics and goals

### Recommended Next Steps
1. Use `identify_icp` to define target customer precisely
2. Use `extract_value_props` to map features to benefits
3. Use `search_competitors` to understand competitive context

### Existing Materials Analysis
{}
"#,
            truncate_chars(&args.product_description, 500),
            materials
        ))
    }
}

/// Translate product features into customer benefits.
pub struct ExtractValuePropsTool;

#[async_trait]
impl Tool for ExtractValuePropsTool {
    fn name(&self) -> &str {
        "extract_value_props"
    }

    fn description(&self) -> &str {
        "Extract value propositions by translating features into customer benefits. \
         Use this tool to convert a list of product features into compelling \
         value propositions that resonate with the target audience."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "features": {
                    "type": "string",
                    "description": "List of product features to analyze"
                },
                "target_audience": {
                    "type": "string",
                    "description": "Who the product is for"
                },
                "competitive_context": {
                    "type": "string",
                    "description": "How competitors position similar features"
                }
            },
            "required": ["features", "target_audience"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            target_audience: String,
            competitive_context: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("extract_value_props: {e}")))?;

        let competitive = args
            .competitive_context
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(
                "No competitive context provided. Recommend using `search_competitors` to \
                 understand differentiation opportunities.",
            );

        Ok(format!(
            r#"## Value Proposition Extraction

### Target Audience
{}

### Feature to Benefit Mapping

| Feature | Benefit (So What?) | Value Prop | Proof Point Needed |
|---------|-------------------|------------|-------------------|
| [Feature 1] | [Outcome for customer] | [Compelling statement] | [Evidence required] |
| [Feature 2] | [Outcome for customer] | [Compelling statement] | [Evidence required] |
| [Feature 3] | [Outcome for customer] | [Compelling statement] | [Evidence required] |

### Translation Framework Applied
- **Functional Value**: What does it do? (save time, reduce cost, increase output)
- **Emotional Value**: How does it feel? (confidence, peace of mind, pride)
- **Social Value**: What does it signal? (innovation, professionalism, leadership)

### Competitive Differentiation
{}

### Strongest Value Props (Ranked)
1. [Highest impact, most differentiated]
2. [Strong supporting message]
3. [Tertiary message for specific segments]

### Gaps Identified
- Missing proof points for claims
- Unclear differentiation vs. alternatives
- Untested assumptions about customer priorities
"#,
            args.target_audience, competitive
        ))
    }
}

/// Define the ideal customer profile, including who the product is not for.
pub struct IdentifyIcpTool;

#[async_trait]
impl Tool for IdentifyIcpTool {
    fn name(&self) -> &str {
        "identify_icp"
    }

    fn description(&self) -> &str {
        "Define the Ideal Customer Profile (ICP) for positioning work. \
         Use this tool to create a precise definition of who the product \
         is for (and who it's NOT for)."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_description": {
                    "type": "string",
                    "description": "What the product does"
                },
                "current_customers": {
                    "type": "string",
                    "description": "Description of existing customers if any"
                },
                "excluded_segments": {
                    "type": "string",
                    "description": "Segments to explicitly exclude"
                }
            },
            "required": ["product_description"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            current_customers: Option<String>,
            excluded_segments: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("identify_icp: {e}")))?;

        let anti_icp = args
            .excluded_segments
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(
                "- Companies too small to need this\n- Teams without the pain point\n- Orgs with conflicting technology",
            );
        let customer_signals = args
            .current_customers
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("No current customer data provided. Consider customer interviews or survey data.");

        Ok(format!(
            r#"## Ideal Customer Profile (ICP) Definition

### Primary ICP

**Company Characteristics:**
- Industry: [Specific verticals]
- Size: [Employee count / Revenue range]
- Stage: [Startup / Growth / Enterprise]
- Tech Stack: [Relevant technologies]
- Geography: [Regions/countries]

**Buyer Persona:**
- Title: [Decision maker role]
- Department: [Where they sit]
- Seniority: [Level in org]
- Reports to: [Who they answer to]
- KPIs: [What they're measured on]

**Situation Triggers:**
- [Event that creates urgency]
- [Pain point that's acute]
- [Change in circumstances]

### Anti-ICP (Who We're NOT For)
{}

### Current Customer Signals
{}

### Validation Questions
1. Would they self-identify with this description?
2. Can we reach them through scalable channels?
3. Do they have budget authority?
4. Is the pain point urgent enough to act?

### Next Steps
- Validate ICP with customer interviews
- Cross-reference with closed-won deals
- Test messaging with this segment
"#,
            anti_icp, customer_signals
        ))
    }
}
