use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GatewayError;

/// A single message in a conversation transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A tool invocation decoded from a model reply. Surfaced to the caller,
/// never executed by the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: serde_json::Value,
}

/// A tool invocation as presented to callers, annotated with the
/// approval policy and argument validation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(rename = "args")]
    pub arguments: serde_json::Value,
    pub approval_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

/// Result of a completed non-streaming turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub session_id: String,
    pub response: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// Schema definition for a tool's parameters, sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Operating mode determining which tool groups are advertised to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    #[default]
    Full,
    Intake,
    Research,
    Planning,
    Risk,
}

impl AgentMode {
    /// Tool groups advertised in this mode, in advertisement order.
    /// Research and planning carry intake tools for product context;
    /// risk carries research tools for competitive context.
    pub fn groups(&self) -> &'static [CapabilityGroup] {
        use CapabilityGroup::*;
        match self {
            AgentMode::Full => &[Intake, Research, Planning, Risk],
            AgentMode::Intake => &[Intake],
            AgentMode::Research => &[Research, Intake],
            AgentMode::Planning => &[Planning, Intake],
            AgentMode::Risk => &[Risk, Research],
        }
    }
}

impl std::fmt::Display for AgentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgentMode::Full => "full",
            AgentMode::Intake => "intake",
            AgentMode::Research => "research",
            AgentMode::Planning => "planning",
            AgentMode::Risk => "risk",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for AgentMode {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(AgentMode::Full),
            "intake" => Ok(AgentMode::Intake),
            "research" => Ok(AgentMode::Research),
            "planning" => Ok(AgentMode::Planning),
            "risk" => Ok(AgentMode::Risk),
            other => Err(GatewayError::Config(format!(
                "unknown mode '{other}', expected one of: full, intake, research, planning, risk"
            ))),
        }
    }
}

/// A category of related tools, registered and advertised together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityGroup {
    Intake,
    Research,
    Planning,
    Risk,
}
