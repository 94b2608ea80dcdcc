use async_trait::async_trait;
use pmm_core::catalogue::Tool;
use pmm_core::error::{GatewayError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

const LAUNCH_CHECKLIST: &str = r#"## Launch Checklist

### Messaging & Positioning
- [ ] Positioning statement finalized
- [ ] Key messages defined
- [ ] Elevator pitch drafted
- [ ] FAQ created

### Content & Assets
- [ ] Website pages created/updated
- [ ] Blog post drafted
- [ ] Social content ready
- [ ] Email sequences built
- [ ] Press release written

### Sales Enablement
- [ ] Sales deck updated
- [ ] Battlecards created
- [ ] Demo script ready
- [ ] Pricing & packaging clear
- [ ] Objection handling documented

### Internal Alignment
- [ ] All hands presented
- [ ] Support trained
- [ ] Success team briefed
- [ ] Engineering aligned on messaging

### External Prep
- [ ] Analyst briefings scheduled
- [ ] Press briefings scheduled
- [ ] Customer reference confirmed
- [ ] Partner communications sent
"#;

const POSITIONING_CHECKLIST: &str = r#"## Positioning Checklist

### Research Complete
- [ ] Customer interviews (5+)
- [ ] Competitive analysis done
- [ ] Market trends reviewed
- [ ] Win/loss analysis current

### Framework Applied
- [ ] Target customer defined (ICP)
- [ ] Problem/need articulated
- [ ] Category established
- [ ] Key benefit clear
- [ ] Differentiator defensible

### Validation Done
- [ ] Tested with customers
- [ ] Sales team reviewed
- [ ] Leadership aligned
- [ ] Proof points identified

### Activation Ready
- [ ] Messaging derived from positioning
- [ ] Website reflects positioning
- [ ] Sales trained on positioning
- [ ] Consistent across channels
"#;

const COMPETITIVE_CHECKLIST: &str = r#"## Competitive Analysis Checklist

### Intelligence Gathered
- [ ] Product capabilities mapped
- [ ] Pricing researched
- [ ] Messaging analyzed
- [ ] Reviews mined
- [ ] Team/hiring tracked
- [ ] Recent announcements reviewed

### Analysis Complete
- [ ] Strengths identified
- [ ] Weaknesses documented
- [ ] Differentiation clear
- [ ] Risk areas flagged

### Deliverables Created
- [ ] Battlecard drafted
- [ ] Comparison page ready
- [ ] Sales objection guide
- [ ] Win story documented
"#;

const MESSAGING_CHECKLIST: &str = r#"## Messaging Checklist

### Foundation Set
- [ ] Positioning approved
- [ ] Audience segments defined
- [ ] Value props ranked
- [ ] Proof points gathered

### Hierarchy Created
- [ ] Headline (5 words)
- [ ] Subhead (1 sentence)
- [ ] Body copy (2-3 sentences)
- [ ] Supporting messages

### Variations Done
- [ ] By audience segment
- [ ] By funnel stage
- [ ] By channel

### Validation Complete
- [ ] Customer tested
- [ ] A/B test planned
- [ ] Legal reviewed (if needed)
"#;

/// Render a positioning statement in the classic framework.
pub struct CreatePositioningStatementTool;

#[async_trait]
impl Tool for CreatePositioningStatementTool {
    fn name(&self) -> &str {
        "create_positioning_statement"
    }

    fn description(&self) -> &str {
        "Create a positioning statement using the classic framework. This is a \
         HUMAN-APPROVAL-REQUIRED tool. The positioning statement will be \
         presented for review before being finalized."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "target_customer": {
                    "type": "string",
                    "description": "Who the product is for"
                },
                "problem": {
                    "type": "string",
                    "description": "The problem or need they have"
                },
                "product_name": {
                    "type": "string",
                    "description": "Name of the product"
                },
                "category": {
                    "type": "string",
                    "description": "Product category"
                },
                "key_benefit": {
                    "type": "string",
                    "description": "Primary reason to buy"
                },
                "competitive_alternative": {
                    "type": "string",
                    "description": "What they'd use instead"
                },
                "differentiator": {
                    "type": "string",
                    "description": "What makes this unique"
                }
            },
            "required": [
                "target_customer",
                "problem",
                "product_name",
                "category",
                "key_benefit",
                "competitive_alternative",
                "differentiator"
            ]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            target_customer: String,
            problem: String,
            product_name: String,
            category: String,
            key_benefit: String,
            competitive_alternative: String,
            differentiator: String,
        }

        let Args {
            target_customer,
            problem,
            product_name,
            category,
            key_benefit,
            competitive_alternative,
            differentiator,
        } = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("create_positioning_statement: {e}")))?;

        Ok(format!(
            r#"## Positioning Statement

### Classic Format

For **{target_customer}**
Who **{problem}**
**{product_name}** is a **{category}**
That **{key_benefit}**
Unlike **{competitive_alternative}**
Our product **{differentiator}**

---

### One-Liner Version
"{product_name}: {key_benefit} for {target_customer}"

### Elevator Pitch (30 seconds)
"{product_name} helps {target_customer} {key_benefit}. Unlike {competitive_alternative}, we {differentiator}. Companies like [example customers] use us to [specific outcome]."

### Internal Alignment Version
"We win when {target_customer} chooses us over {competitive_alternative} because {differentiator}. Our key proof point is [evidence]."

---

### Validation Checklist
- [ ] Would target customer self-identify?
- [ ] Is the category understood?
- [ ] Is the benefit compelling?
- [ ] Is the differentiator defensible?
- [ ] Can we prove the claims?

### Next Steps
1. Test with 5 target customers
2. Create messaging hierarchy from positioning
3. Develop proof points for each claim
4. Align sales and marketing on language

---
**REQUIRES HUMAN APPROVAL BEFORE FINALIZING**
"#
        ))
    }
}

/// Map audience segments to messages and proof points.
pub struct CreateMessagingMatrixTool;

#[async_trait]
impl Tool for CreateMessagingMatrixTool {
    fn name(&self) -> &str {
        "create_messaging_matrix"
    }

    fn description(&self) -> &str {
        "Create a messaging matrix mapping audiences to messages. This is a \
         HUMAN-APPROVAL-REQUIRED tool."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "positioning": {
                    "type": "string",
                    "description": "The approved positioning statement"
                },
                "audience_segments": {
                    "type": "string",
                    "description": "Different audience segments to message"
                },
                "value_propositions": {
                    "type": "string",
                    "description": "Key value props to include"
                }
            },
            "required": ["positioning", "audience_segments", "value_propositions"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            positioning: String,
            audience_segments: String,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("create_messaging_matrix: {e}")))?;

        let first_segment = args
            .audience_segments
            .split_once(',')
            .map(|(first, _)| first)
            .unwrap_or("Segment 1");

        Ok(format!(
            r#"## Messaging Matrix

### Based on Positioning
{}

---

### Primary Message Hierarchy

**Headline (5 words or less)**
[Compelling headline here]

**Subhead (One sentence)**
[Supporting statement that adds context]

**Body (2-3 sentences)**
[Expansion of value with proof point]

---

### Segment-Specific Messaging

| Segment | Pain Point | Value Prop | Proof Point | CTA |
|---------|------------|------------|-------------|-----|
| {} | [Their pain] | [Our value] | [Evidence] | [Action] |
| Segment 2 | [Their pain] | [Our value] | [Evidence] | [Action] |
| Segment 3 | [Their pain] | [Our value] | [Evidence] | [Action] |

---

### Message by Funnel Stage

**Awareness (What is this?)**
- Headline: [Attention-grabbing]
- Focus: Problem recognition

**Consideration (Why this?)**
- Headline: [Differentiation-focused]
- Focus: Competitive comparison

**Decision (Why now?)**
- Headline: [Urgency-creating]
- Focus: Risk reduction, proof

---

### Proof Points Library

| Claim | Evidence Type | Specific Proof |
|-------|--------------|----------------|
| [Claim 1] | [Stat/Quote/Case Study] | [Specific evidence] |
| [Claim 2] | [Stat/Quote/Case Study] | [Specific evidence] |
| [Claim 3] | [Stat/Quote/Case Study] | [Specific evidence] |

---

### Words We Use / Words We Avoid

| Use | Avoid | Why |
|-----|-------|-----|
| [Word] | [Word] | [Reason] |
| [Word] | [Word] | [Reason] |

---
**REQUIRES HUMAN APPROVAL BEFORE FINALIZING**
"#,
            args.positioning, first_segment
        ))
    }
}

/// Build a sales battlecard against a named competitor.
pub struct CreateBattlecardTool;

#[async_trait]
impl Tool for CreateBattlecardTool {
    fn name(&self) -> &str {
        "create_battlecard"
    }

    fn description(&self) -> &str {
        "Create a competitive battlecard for sales enablement."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "competitor": {
                    "type": "string",
                    "description": "Name of the competitor"
                },
                "our_positioning": {
                    "type": "string",
                    "description": "Our positioning statement"
                },
                "their_positioning": {
                    "type": "string",
                    "description": "Their positioning"
                },
                "our_strengths": {
                    "type": "string",
                    "description": "Where we win"
                },
                "their_strengths": {
                    "type": "string",
                    "description": "Where they're strong"
                }
            },
            "required": [
                "competitor",
                "our_positioning",
                "their_positioning",
                "our_strengths",
                "their_strengths"
            ]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            competitor: String,
            our_strengths: String,
            their_strengths: String,
        }

        let Args {
            competitor,
            our_strengths,
            their_strengths,
        } = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("create_battlecard: {e}")))?;

        Ok(format!(
            r#"## Competitive Battlecard: vs {competitor}

### Quick Win (30-Second Pitch)
"When evaluating {competitor}, here's what matters: [key differentiator]. Unlike them, we [unique value]. Companies like [customer] chose us because [reason]."

---

### Competitive Overview

| Dimension | Us | {competitor} |
|-----------|----|----|
| Target Market | [Our ICP] | [Their ICP] |
| Core Strength | [What we do best] | [What they do best] |
| Pricing Model | [Our model] | [Their model] |
| Key Differentiator | [Our unique value] | [Their unique value] |

---

### Where We Win

{our_strengths}

**Proof Points:**
- [Specific evidence 1]
- [Specific evidence 2]
- [Customer quote]

---

### Where They're Strong (Handle With Care)

{their_strengths}

**How to Handle:**
- [Reframe 1]
- [Acknowledge and pivot]
- [Turn into our advantage]

---

### Common Objections & Rebuttals

| Objection | Rebuttal |
|-----------|----------|
| "They're the market leader" | [Response] |
| "They have more features" | [Response] |
| "We already use them" | [Response] |

---

### Landmines to Set

Questions to ask early that favor us:
1. "[Question that surfaces competitor weakness]"
2. "[Question about our differentiator]"
3. "[Question about their typical pain point]"

---

### Discovery Questions

- "How are you handling [problem we solve] today?"
- "What's working? What's frustrating?"
- "What would success look like?"
- "Who else are you evaluating?"

---

### Competitive Traps to Avoid

- Don't [thing that backfires]
- Never [thing that helps competitor]
- Watch out for [common mistake]

---

### Win Story

**Customer:** [Name/Type]
**Situation:** Evaluated us vs {competitor}
**Why They Chose Us:** [Key reason]
**Quote:** "[Compelling quote]"
**Result:** [Outcome/metric]
"#
        ))
    }
}

/// Draft a tiered go-to-market launch plan.
pub struct CreateLaunchPlanTool;

#[async_trait]
impl Tool for CreateLaunchPlanTool {
    fn name(&self) -> &str {
        "create_launch_plan"
    }

    fn description(&self) -> &str {
        "Create a go-to-market launch plan. This is a HUMAN-APPROVAL-REQUIRED tool."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "product_name": {
                    "type": "string",
                    "description": "What we're launching"
                },
                "launch_date": {
                    "type": "string",
                    "description": "Target launch date"
                },
                "launch_tier": {
                    "type": "string",
                    "description": "Launch tier (1=Major, 2=Medium, 3=Minor)"
                },
                "target_audience": {
                    "type": "string",
                    "description": "Who this is for"
                },
                "key_messages": {
                    "type": "string",
                    "description": "Core messaging for launch"
                }
            },
            "required": [
                "product_name",
                "launch_date",
                "launch_tier",
                "target_audience",
                "key_messages"
            ]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            product_name: String,
            launch_date: String,
            launch_tier: String,
            target_audience: String,
            key_messages: String,
        }

        let Args {
            product_name,
            launch_date,
            launch_tier,
            target_audience,
            key_messages,
        } = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("create_launch_plan: {e}")))?;

        Ok(format!(
            r#"## Launch Plan: {product_name}

### Launch Overview
- **Launch Date:** {launch_date}
- **Launch Tier:** {launch_tier}
- **Target Audience:** {target_audience}

---

### Key Messages
{key_messages}

---

### Launch Timeline

**T-4 Weeks: Preparation**
- [ ] Messaging finalized and approved
- [ ] Sales enablement created
- [ ] Support trained
- [ ] Press/analyst briefings scheduled

**T-2 Weeks: Internal Readiness**
- [ ] All hands announcement
- [ ] Demo environment ready
- [ ] Email sequences built
- [ ] Social content scheduled

**T-1 Week: Final Prep**
- [ ] Website updates staged
- [ ] Press release drafted
- [ ] Customer reference lined up
- [ ] Contingency plan reviewed

**Launch Day**
- [ ] Website live
- [ ] Email sent
- [ ] Social posted
- [ ] Press release out
- [ ] Sales notified

**T+1 Week: Momentum**
- [ ] Monitor coverage
- [ ] Social engagement
- [ ] Sales follow-up
- [ ] Customer feedback

---

### Channel Activation

| Channel | Content | Owner | Date |
|---------|---------|-------|------|
| Website | Landing page, feature page | [Owner] | [Date] |
| Email | Launch announcement | [Owner] | [Date] |
| Social | Thread, posts | [Owner] | [Date] |
| Press | Release, briefings | [Owner] | [Date] |
| Sales | Enablement, demo | [Owner] | [Date] |
| Product | In-app announcement | [Owner] | [Date] |

---

### Success Metrics

| Metric | Target | Measurement |
|--------|--------|-------------|
| Website traffic | +X% | Google Analytics |
| Sign-ups | X new | Product metrics |
| Press mentions | X articles | Coverage tracking |
| Social engagement | X impressions | Social analytics |

---

### Risk Register

| Risk | Likelihood | Impact | Mitigation |
|------|------------|--------|------------|
| [Risk 1] | H/M/L | H/M/L | [Plan] |
| [Risk 2] | H/M/L | H/M/L | [Plan] |

---
**REQUIRES HUMAN APPROVAL BEFORE FINALIZING**
"#
        ))
    }
}

/// Produce a keyed workflow checklist, with a custom fallback.
pub struct CreateChecklistTool;

#[async_trait]
impl Tool for CreateChecklistTool {
    fn name(&self) -> &str {
        "create_checklist"
    }

    fn description(&self) -> &str {
        "Create a PMM checklist for common workflows."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task_type": {
                    "type": "string",
                    "description": "Type of checklist (launch, positioning, competitive, messaging)"
                },
                "context": {
                    "type": "string",
                    "description": "Specific context for the checklist"
                }
            },
            "required": ["task_type", "context"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            task_type: String,
            context: String,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("create_checklist: {e}")))?;

        let checklist = match args.task_type.to_lowercase().as_str() {
            "launch" => LAUNCH_CHECKLIST.to_string(),
            "positioning" => POSITIONING_CHECKLIST.to_string(),
            "competitive" => COMPETITIVE_CHECKLIST.to_string(),
            "messaging" => MESSAGING_CHECKLIST.to_string(),
            _ => format!(
                r#"## Custom Checklist: {}

### Context
{}

### Items
- [ ] Item 1
- [ ] Item 2
- [ ] Item 3
- [ ] Item 4
- [ ] Item 5

### Notes
Add specific items based on context.
"#,
                args.task_type, args.context
            ),
        };

        Ok(checklist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_positioning_statement_renders_all_fields() {
        let output = CreatePositioningStatementTool
            .execute(json!({
                "target_customer": "platform engineering leads",
                "problem": "lose hours chasing flaky API integrations",
                "product_name": "Acme Monitor",
                "category": "API observability platform",
                "key_benefit": "cuts incident triage from hours to minutes",
                "competitive_alternative": "homegrown dashboards",
                "differentiator": "correlates failures across providers automatically"
            }))
            .await
            .unwrap();
        assert!(output.contains("For **platform engineering leads**"));
        assert!(output.contains("**Acme Monitor** is a **API observability platform**"));
        assert!(output.contains("Unlike **homegrown dashboards**"));
        assert!(output.contains("REQUIRES HUMAN APPROVAL BEFORE FINALIZING"));
    }

    #[tokio::test]
    async fn test_messaging_matrix_uses_first_segment_before_comma() {
        let output = CreateMessagingMatrixTool
            .execute(json!({
                "positioning": "The fastest way to debug APIs",
                "audience_segments": "SRE leads, CTOs, platform teams",
                "value_propositions": "speed, coverage"
            }))
            .await
            .unwrap();
        assert!(output.contains("| SRE leads | [Their pain]"));
        assert!(output.contains("The fastest way to debug APIs"));
    }

    #[tokio::test]
    async fn test_messaging_matrix_segment_placeholder_without_comma() {
        let output = CreateMessagingMatrixTool
            .execute(json!({
                "positioning": "p",
                "audience_segments": "developers",
                "value_propositions": "v"
            }))
            .await
            .unwrap();
        assert!(output.contains("| Segment 1 | [Their pain]"));
    }

    #[tokio::test]
    async fn test_battlecard_names_competitor_throughout() {
        let output = CreateBattlecardTool
            .execute(json!({
                "competitor": "Datadog",
                "our_positioning": "ours",
                "their_positioning": "theirs",
                "our_strengths": "Faster setup, lower cost",
                "their_strengths": "Brand recognition"
            }))
            .await
            .unwrap();
        assert!(output.contains("## Competitive Battlecard: vs Datadog"));
        assert!(output.contains("| Dimension | Us | Datadog |"));
        assert!(output.contains("Faster setup, lower cost"));
        assert!(output.contains("Brand recognition"));
        assert!(output.contains("**Situation:** Evaluated us vs Datadog"));
    }

    #[tokio::test]
    async fn test_launch_plan_includes_overview_fields() {
        let output = CreateLaunchPlanTool
            .execute(json!({
                "product_name": "Acme Monitor 2.0",
                "launch_date": "2025-03-01",
                "launch_tier": "1",
                "target_audience": "existing customers and SRE community",
                "key_messages": "Twice the coverage, half the noise"
            }))
            .await
            .unwrap();
        assert!(output.contains("## Launch Plan: Acme Monitor 2.0"));
        assert!(output.contains("- **Launch Date:** 2025-03-01"));
        assert!(output.contains("- **Launch Tier:** 1"));
        assert!(output.contains("Twice the coverage, half the noise"));
    }

    #[tokio::test]
    async fn test_checklist_lookup_is_case_insensitive() {
        let output = CreateChecklistTool
            .execute(json!({"task_type": "Launch", "context": "Q2 release"}))
            .await
            .unwrap();
        assert!(output.contains("## Launch Checklist"));
    }

    #[tokio::test]
    async fn test_checklist_falls_back_to_custom_template() {
        let output = CreateChecklistTool
            .execute(json!({"task_type": "webinar", "context": "Partner webinar series"}))
            .await
            .unwrap();
        assert!(output.contains("## Custom Checklist: webinar"));
        assert!(output.contains("Partner webinar series"));
    }
}
