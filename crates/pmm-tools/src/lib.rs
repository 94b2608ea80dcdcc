//! Built-in PMM tools, grouped by the capability they belong to.
//!
//! `catalogue()` assembles the full tool set. Callers narrow it to an
//! agent mode or capability list at resolution time.

pub mod intake;
pub mod planning;
pub mod research;
pub mod risk;

use std::sync::Arc;

use pmm_core::catalogue::ToolCatalogue;
use pmm_core::types::CapabilityGroup;

/// Build the catalogue of all built-in tools.
///
/// Registration order is the advertised order within each capability
/// group, so it is kept stable.
pub fn catalogue() -> ToolCatalogue {
    let mut catalogue = ToolCatalogue::new();

    catalogue.register(CapabilityGroup::Intake, Arc::new(intake::AnalyzeProductTool));
    catalogue.register(CapabilityGroup::Intake, Arc::new(intake::ExtractValuePropsTool));
    catalogue.register(CapabilityGroup::Intake, Arc::new(intake::IdentifyIcpTool));

    catalogue.register(
        CapabilityGroup::Research,
        Arc::new(research::SearchCompetitorsTool),
    );
    catalogue.register(
        CapabilityGroup::Research,
        Arc::new(research::AnalyzePricingTool),
    );
    catalogue.register(
        CapabilityGroup::Research,
        Arc::new(research::FetchUrlTool::new()),
    );
    catalogue.register(
        CapabilityGroup::Research,
        Arc::new(research::AnalyzeReviewsTool),
    );

    catalogue.register(
        CapabilityGroup::Planning,
        Arc::new(planning::CreatePositioningStatementTool),
    );
    catalogue.register(
        CapabilityGroup::Planning,
        Arc::new(planning::CreateMessagingMatrixTool),
    );
    catalogue.register(
        CapabilityGroup::Planning,
        Arc::new(planning::CreateBattlecardTool),
    );
    catalogue.register(
        CapabilityGroup::Planning,
        Arc::new(planning::CreateLaunchPlanTool),
    );
    catalogue.register(
        CapabilityGroup::Planning,
        Arc::new(planning::CreateChecklistTool),
    );

    catalogue.register(CapabilityGroup::Risk, Arc::new(risk::AssessMarketRisksTool));
    catalogue.register(
        CapabilityGroup::Risk,
        Arc::new(risk::ValidatePositioningTool),
    );
    catalogue.register(CapabilityGroup::Risk, Arc::new(risk::IdentifyGapsTool));

    catalogue
}

/// Truncate to at most `max` characters without splitting a code point.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmm_core::types::AgentMode;

    #[test]
    fn test_truncate_chars_leaves_short_input() {
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("αβγδε", 3), "αβγ");
        assert_eq!(truncate_chars("日本語テスト", 2), "日本");
    }

    #[test]
    fn test_catalogue_registers_every_tool() {
        let catalogue = catalogue();
        assert_eq!(catalogue.len(), 15);
        for name in [
            "analyze_product",
            "fetch_url",
            "create_launch_plan",
            "identify_gaps",
        ] {
            assert!(catalogue.lookup(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn test_full_mode_resolves_in_declaration_order() {
        let catalogue = catalogue();
        let names: Vec<String> = catalogue
            .resolve(AgentMode::Full)
            .iter()
            .map(|tool| tool.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "analyze_product",
                "extract_value_props",
                "identify_icp",
                "search_competitors",
                "analyze_pricing",
                "fetch_url",
                "analyze_reviews",
                "create_positioning_statement",
                "create_messaging_matrix",
                "create_battlecard",
                "create_launch_plan",
                "create_checklist",
                "assess_market_risks",
                "validate_positioning",
                "identify_gaps",
            ]
        );
    }

    #[test]
    fn test_risk_mode_resolves_risk_then_research() {
        let catalogue = catalogue();
        let names: Vec<String> = catalogue
            .resolve(AgentMode::Risk)
            .iter()
            .map(|tool| tool.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "assess_market_risks",
                "validate_positioning",
                "identify_gaps",
                "search_competitors",
                "analyze_pricing",
                "fetch_url",
                "analyze_reviews",
            ]
        );
    }
}
