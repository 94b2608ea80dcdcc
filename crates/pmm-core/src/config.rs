use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::AgentMode;

/// Top-level application configuration, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from the default path (~/.config/pmm-gateway/config.toml),
    /// falling back to defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Write current configuration to the default path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }

    /// Default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pmm-gateway")
            .join("config.toml")
    }

    /// Data directory for runtime files such as REPL history.
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pmm-gateway")
    }
}

/// Model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL for the OpenAI-compatible API.
    pub api_base: String,
    /// Model name.
    pub model: String,
    /// Optional API key. Falls back to the ANTHROPIC_API_KEY environment
    /// variable when unset.
    pub api_key: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.anthropic.com/v1".into(),
            model: "claude-sonnet-4-20250514".into(),
            api_key: None,
            max_tokens: 8192,
            temperature: 0.7,
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port.
    pub port: u16,
    /// Enable CORS.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8123,
            cors: true,
        }
    }
}

/// Gateway behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Operating mode determining which tool groups are advertised.
    pub mode: AgentMode,
    /// Optional specialist profile; overrides the system prompt and tool
    /// groups when set.
    pub profile: Option<String>,
    /// Reject empty user messages with a validation error instead of
    /// forwarding them to the model.
    pub reject_empty_messages: bool,
    /// Override for the system prompt seeded into new sessions.
    pub system_prompt: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: AgentMode::Full,
            profile: None,
            reject_empty_messages: false,
            system_prompt: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("claude-sonnet-4"));
        assert!(toml_str.contains("8123"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.provider.model, config.provider.model);
        assert_eq!(parsed.provider.max_tokens, config.provider.max_tokens);
        assert_eq!(parsed.gateway.mode, AgentMode::Full);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
            [gateway]
            mode = "planning"
            reject_empty_messages = true
        "#;
        let parsed: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.gateway.mode, AgentMode::Planning);
        assert!(parsed.gateway.reject_empty_messages);
        assert_eq!(parsed.server.port, 8123);
        assert_eq!(parsed.provider.max_tokens, 8192);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nmodel = \"claude-opus-4-20250514\"\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.provider.model, "claude-opus-4-20250514");
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
