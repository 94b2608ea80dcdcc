use crate::config::{AppConfig, ProviderConfig};
use crate::error::{GatewayError, Result};
use crate::prompts::{
    COMPETITIVE_ANALYST_PROMPT, LAUNCH_COORDINATOR_PROMPT, MAIN_SYSTEM_PROMPT,
    MESSAGING_SPECIALIST_PROMPT,
};
use crate::types::CapabilityGroup;

/// A specialist preset: its own system prompt, tool groups, and
/// generation budget.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub system_prompt: &'static str,
    pub groups: &'static [CapabilityGroup],
    pub max_tokens: u32,
}

/// Built-in specialist profiles.
pub const PROFILES: &[AgentProfile] = &[
    AgentProfile {
        name: "competitive_analyst",
        description: "Competitive intelligence specialist",
        system_prompt: COMPETITIVE_ANALYST_PROMPT,
        groups: &[CapabilityGroup::Research],
        max_tokens: 4096,
    },
    AgentProfile {
        name: "messaging_specialist",
        description: "Messaging and positioning copy specialist",
        system_prompt: MESSAGING_SPECIALIST_PROMPT,
        groups: &[CapabilityGroup::Planning],
        max_tokens: 4096,
    },
    AgentProfile {
        name: "launch_coordinator",
        description: "Launch planning and risk specialist",
        system_prompt: LAUNCH_COORDINATOR_PROMPT,
        groups: &[CapabilityGroup::Planning, CapabilityGroup::Risk],
        max_tokens: 4096,
    },
];

/// Look up a built-in profile by name.
pub fn find(name: &str) -> Option<&'static AgentProfile> {
    PROFILES.iter().find(|p| p.name == name)
}

/// Everything a gateway instance needs once config and profile are
/// reconciled.
#[derive(Debug, Clone)]
pub struct AgentSetup {
    pub system_prompt: String,
    pub groups: Vec<CapabilityGroup>,
    pub provider: ProviderConfig,
}

/// Reconcile configuration and profile into a runnable setup.
///
/// An explicit `gateway.system_prompt` wins over the profile prompt,
/// which wins over the default. A profile's tool groups and token
/// budget replace the mode-derived ones.
pub fn resolve_setup(config: &AppConfig) -> Result<AgentSetup> {
    let profile = match config.gateway.profile.as_deref() {
        // "pmm" is the implicit default: main prompt, tools by mode.
        Some("pmm") | None => None,
        Some(name) => Some(
            find(name).ok_or_else(|| GatewayError::Config(format!("unknown profile '{name}'")))?,
        ),
    };

    let system_prompt = config
        .gateway
        .system_prompt
        .clone()
        .or_else(|| profile.map(|p| p.system_prompt.to_string()))
        .unwrap_or_else(|| MAIN_SYSTEM_PROMPT.to_string());

    let groups = profile
        .map(|p| p.groups.to_vec())
        .unwrap_or_else(|| config.gateway.mode.groups().to_vec());

    let mut provider = config.provider.clone();
    if let Some(profile) = profile {
        provider.max_tokens = profile.max_tokens;
    }

    Ok(AgentSetup {
        system_prompt,
        groups,
        provider,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentMode;

    #[test]
    fn test_default_setup() {
        let config = AppConfig::default();
        let setup = resolve_setup(&config).unwrap();
        assert_eq!(setup.system_prompt, MAIN_SYSTEM_PROMPT);
        assert_eq!(setup.groups, AgentMode::Full.groups());
        assert_eq!(setup.provider.max_tokens, 8192);
    }

    #[test]
    fn test_profile_overrides_prompt_groups_and_budget() {
        let mut config = AppConfig::default();
        config.gateway.profile = Some("launch_coordinator".into());

        let setup = resolve_setup(&config).unwrap();
        assert_eq!(setup.system_prompt, LAUNCH_COORDINATOR_PROMPT);
        assert_eq!(
            setup.groups,
            [CapabilityGroup::Planning, CapabilityGroup::Risk]
        );
        assert_eq!(setup.provider.max_tokens, 4096);
    }

    #[test]
    fn test_configured_prompt_wins_over_profile() {
        let mut config = AppConfig::default();
        config.gateway.profile = Some("messaging_specialist".into());
        config.gateway.system_prompt = Some("house style only".into());

        let setup = resolve_setup(&config).unwrap();
        assert_eq!(setup.system_prompt, "house style only");
        assert_eq!(setup.groups, [CapabilityGroup::Planning]);
    }

    #[test]
    fn test_pmm_profile_selects_defaults() {
        let mut config = AppConfig::default();
        config.gateway.profile = Some("pmm".into());

        let setup = resolve_setup(&config).unwrap();
        assert_eq!(setup.system_prompt, MAIN_SYSTEM_PROMPT);
        assert_eq!(setup.groups, AgentMode::Full.groups());
    }

    #[test]
    fn test_unknown_profile_is_config_error() {
        let mut config = AppConfig::default();
        config.gateway.profile = Some("growth_hacker".into());
        let err = resolve_setup(&config).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_find_builtin_profiles() {
        assert!(find("competitive_analyst").is_some());
        assert_eq!(
            find("competitive_analyst").unwrap().groups,
            [CapabilityGroup::Research]
        );
        assert!(find("nope").is_none());
    }
}
