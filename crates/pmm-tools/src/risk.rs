use async_trait::async_trait;
use pmm_core::catalogue::Tool;
use pmm_core::error::{GatewayError, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::truncate_chars;

/// Surface market, positioning, message, and timing risks before launch.
pub struct AssessMarketRisksTool;

#[async_trait]
impl Tool for AssessMarketRisksTool {
    fn name(&self) -> &str {
        "assess_market_risks"
    }

    fn description(&self) -> &str {
        "Assess market risks for positioning and GTM strategy. Use this tool \
         to surface potential problems before they become launch-day disasters."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "positioning": {
                    "type": "string",
                    "description": "Current positioning statement"
                },
                "target_market": {
                    "type": "string",
                    "description": "Target market and ICP"
                },
                "competitive_context": {
                    "type": "string",
                    "description": "Competitive landscape"
                },
                "launch_timeline": {
                    "type": "string",
                    "description": "Planned launch timing if applicable"
                }
            },
            "required": ["positioning", "target_market", "competitive_context"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            positioning: String,
            target_market: String,
            competitive_context: String,
            launch_timeline: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("assess_market_risks: {e}")))?;

        let timeline = args
            .launch_timeline
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("Not specified");

        Ok(format!(
            r#"## Market Risk Assessment

### Context
- **Positioning:** {}...
- **Target Market:** {}
- **Timeline:** {}

---

### Risk Matrix

| Risk | Likelihood | Impact | Score | Mitigation |
|------|------------|--------|-------|------------|
| **Competitive Response** | H/M/L | H/M/L | X/9 | [Action] |
| **Market Timing** | H/M/L | H/M/L | X/9 | [Action] |
| **Message Resonance** | H/M/L | H/M/L | X/9 | [Action] |
| **Proof Point Gaps** | H/M/L | H/M/L | X/9 | [Action] |
| **Internal Alignment** | H/M/L | H/M/L | X/9 | [Action] |
| **Channel Saturation** | H/M/L | H/M/L | X/9 | [Action] |

---

### Competitive Risks

**Threat Assessment:**
{}

**Potential Responses:**
1. [Competitor A might do X]
2. [Competitor B might do Y]
3. [New entrant risk]

**Counter-Strategies:**
- [Preemptive action 1]
- [Defensive measure 2]
- [Offensive opportunity 3]

---

### Positioning Risks

**Assumptions Being Made:**
1. [Assumption about market]
2. [Assumption about customer]
3. [Assumption about differentiation]

**What Could Invalidate Them:**
1. [Scenario that breaks assumption 1]
2. [Scenario that breaks assumption 2]
3. [Scenario that breaks assumption 3]

**Validation Plan:**
- [ ] Customer interview validation
- [ ] Competitive monitoring setup
- [ ] Market signal tracking

---

### Message Risks

**Potential Objections:**
1. "[Objection 1]" - Risk Level: H/M/L
2. "[Objection 2]" - Risk Level: H/M/L
3. "[Objection 3]" - Risk Level: H/M/L

**Proof Point Gaps:**
- Claim: [X] - Evidence: [Missing/Weak/Strong]
- Claim: [Y] - Evidence: [Missing/Weak/Strong]

---

### Timing Risks

**External Factors:**
- [ ] Competitor launches in same window
- [ ] Market event conflicts
- [ ] Economic conditions
- [ ] Industry calendar (conferences, quarters)

**Internal Factors:**
- [ ] Resource availability
- [ ] Cross-functional alignment
- [ ] Product readiness
- [ ] Sales capacity

---

### Recommended Actions

**Immediate (This Week):**
1. [High-priority risk mitigation]
2. [Validation action]

**Before Launch:**
1. [Risk reduction step]
2. [Contingency planning]

**Ongoing:**
1. [Monitoring setup]
2. [Response playbook]
"#,
            truncate_chars(&args.positioning, 200),
            args.target_market,
            timeline,
            args.competitive_context
        ))
    }
}

/// Structure positioning validation and interpret its results.
pub struct ValidatePositioningTool;

#[async_trait]
impl Tool for ValidatePositioningTool {
    fn name(&self) -> &str {
        "validate_positioning"
    }

    fn description(&self) -> &str {
        "Validate positioning with customers or market data. Use this tool to \
         structure positioning validation and interpret results."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "positioning": {
                    "type": "string",
                    "description": "The positioning to validate"
                },
                "validation_method": {
                    "type": "string",
                    "description": "How we're validating (interviews, surveys, A/B test)"
                },
                "results": {
                    "type": "string",
                    "description": "Results if validation has been done"
                }
            },
            "required": ["positioning", "validation_method"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            positioning: String,
            validation_method: String,
            results: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("validate_positioning: {e}")))?;

        let results = args
            .results
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("Results not yet available. Complete validation and add results.");

        Ok(format!(
            r#"## Positioning Validation

### Positioning Under Test
{}

### Validation Method: {}

---

### Validation Framework

**Key Questions to Answer:**
1. Does the target customer self-identify?
2. Does the problem resonate as urgent?
3. Is the category understood?
4. Is the benefit compelling?
5. Is the differentiator believable?
6. Would they take action?

---

### Interview Protocol (If Using Interviews)

**Screening Questions:**
- Role: [Target role]
- Company: [Target company type]
- Pain: [Relevant experience with problem]

**Core Questions:**
1. "How would you describe [problem space] challenges?"
2. "What solutions have you tried?"
3. [Show positioning] "What's your reaction?"
4. "What would make you skeptical?"
5. "How does this compare to [competitor]?"
6. "What would you need to see to believe this?"

**Signals to Watch:**
- Verbal: Enthusiasm, skepticism, confusion
- Non-verbal: Leaning in, nodding, frowning
- Follow-up: Questions they ask

---

### Results Interpretation
{}

**Score Card:**

| Dimension | Score (1-5) | Notes |
|-----------|-------------|-------|
| Self-identification | X | [Notes] |
| Problem urgency | X | [Notes] |
| Category clarity | X | [Notes] |
| Benefit appeal | X | [Notes] |
| Differentiator credibility | X | [Notes] |
| Action intent | X | [Notes] |

**Overall Validation:** [PASS / ITERATE / FAIL]

---

### Recommended Iterations

**If Failing on Self-Identification:**
- Narrow or expand target definition
- Use different language for "who"

**If Failing on Problem:**
- Research deeper customer pain points
- Find more urgent trigger

**If Failing on Differentiator:**
- Find stronger proof points
- Identify more defensible unique value
"#,
            args.positioning,
            args.validation_method.to_uppercase(),
            results
        ))
    }
}

/// Compare current and desired state and produce a prioritized plan.
pub struct IdentifyGapsTool;

#[async_trait]
impl Tool for IdentifyGapsTool {
    fn name(&self) -> &str {
        "identify_gaps"
    }

    fn description(&self) -> &str {
        "Identify gaps between current and desired positioning/messaging state. \
         Use this tool to create a clear action plan for PMM improvements."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "current_state": {
                    "type": "string",
                    "description": "Where we are now"
                },
                "desired_state": {
                    "type": "string",
                    "description": "Where we want to be"
                },
                "resources_available": {
                    "type": "string",
                    "description": "What we have to work with"
                }
            },
            "required": ["current_state", "desired_state"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        #[derive(Deserialize)]
        struct Args {
            current_state: String,
            desired_state: String,
            resources_available: Option<String>,
        }

        let args: Args = serde_json::from_value(args)
            .map_err(|e| GatewayError::Validation(format!("identify_gaps: {e}")))?;

        let resources = args
            .resources_available
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or("Resources not specified. Assuming standard PMM capacity.");

        Ok(format!(
            r#"## Gap Analysis

### Current State
{}

### Desired State
{}

---

### Gap Identification

| Area | Current | Desired | Gap Size | Priority |
|------|---------|---------|----------|----------|
| **Positioning** | [Current] | [Desired] | S/M/L | H/M/L |
| **Messaging** | [Current] | [Desired] | S/M/L | H/M/L |
| **Proof Points** | [Current] | [Desired] | S/M/L | H/M/L |
| **Sales Enablement** | [Current] | [Desired] | S/M/L | H/M/L |
| **Competitive Intel** | [Current] | [Desired] | S/M/L | H/M/L |
| **Customer Research** | [Current] | [Desired] | S/M/L | H/M/L |

---

### Resource Assessment
{}

**Available:**
- [ ] Time: [Hours/weeks available]
- [ ] Budget: [For research, content, etc.]
- [ ] Tools: [Existing tools and data]
- [ ] Support: [Cross-functional help]

---

### Prioritized Action Plan

**Quick Wins (1-2 weeks):**
1. [Action with immediate impact]
2. [Low-effort, high-value]

**Medium-Term (1 month):**
1. [Significant improvement]
2. [Requires some investment]

**Strategic (3+ months):**
1. [Major initiative]
2. [Foundational improvement]

---

### Success Metrics

| Gap | Metric | Current | Target | By When |
|-----|--------|---------|--------|---------|
| [Gap 1] | [Metric] | [Now] | [Goal] | [Date] |
| [Gap 2] | [Metric] | [Now] | [Goal] | [Date] |

---

### Dependencies & Blockers

**Dependencies:**
- [What needs to happen first]
- [Who needs to be involved]
- [What resources are needed]

**Potential Blockers:**
- [Blocker 1] - Mitigation: [Action]
- [Blocker 2] - Mitigation: [Action]

---

### Recommendation

Based on the gap analysis, the recommended path forward is:

1. **Start with:** [Highest priority gap]
2. **Then focus on:** [Second priority]
3. **Defer:** [Lower priority items]

**Rationale:** [Why this prioritization makes sense]
"#,
            args.current_state, args.desired_state, resources
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assess_market_risks_truncates_positioning() {
        let positioning = "p".repeat(400);
        let output = AssessMarketRisksTool
            .execute(json!({
                "positioning": positioning,
                "target_market": "mid-market SaaS",
                "competitive_context": "Crowded, two dominant incumbents"
            }))
            .await
            .unwrap();
        assert!(output.contains(&format!("- **Positioning:** {}...", "p".repeat(200))));
        assert!(!output.contains(&"p".repeat(201)));
        assert!(output.contains("- **Timeline:** Not specified"));
        assert!(output.contains("Crowded, two dominant incumbents"));
    }

    #[tokio::test]
    async fn test_assess_market_risks_includes_timeline() {
        let output = AssessMarketRisksTool
            .execute(json!({
                "positioning": "Fast triage for API incidents",
                "target_market": "SRE teams",
                "competitive_context": "Incumbent-heavy",
                "launch_timeline": "Q3 2025"
            }))
            .await
            .unwrap();
        assert!(output.contains("- **Timeline:** Q3 2025"));
    }

    #[tokio::test]
    async fn test_validate_positioning_uppercases_method() {
        let output = ValidatePositioningTool
            .execute(json!({
                "positioning": "The fastest way to debug APIs",
                "validation_method": "interviews"
            }))
            .await
            .unwrap();
        assert!(output.contains("### Validation Method: INTERVIEWS"));
        assert!(output.contains("Results not yet available"));
    }

    #[tokio::test]
    async fn test_validate_positioning_includes_results() {
        let output = ValidatePositioningTool
            .execute(json!({
                "positioning": "p",
                "validation_method": "surveys",
                "results": "8 of 10 respondents self-identified"
            }))
            .await
            .unwrap();
        assert!(output.contains("8 of 10 respondents self-identified"));
    }

    #[tokio::test]
    async fn test_identify_gaps_defaults_resources() {
        let output = IdentifyGapsTool
            .execute(json!({
                "current_state": "No formal positioning",
                "desired_state": "Approved positioning and messaging matrix"
            }))
            .await
            .unwrap();
        assert!(output.contains("No formal positioning"));
        assert!(output.contains("Approved positioning and messaging matrix"));
        assert!(output.contains("Resources not specified. Assuming standard PMM capacity."));
    }
}
