pub mod config;
pub mod store;
pub mod catalogue;
pub mod approval;
pub mod backend;
pub mod emitter;
pub mod orchestrator;
pub mod profiles;
pub mod prompts;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use store::{InMemoryStore, Session, SessionStore};
pub use catalogue::{Tool, ToolCatalogue};
pub use approval::ApprovalPolicy;
pub use backend::{ModelBackend, ModelChunk, ModelReply, ModelStream, OpenAiBackend};
pub use emitter::StreamEvent;
pub use orchestrator::TurnOrchestrator;
pub use profiles::{resolve_setup, AgentProfile, AgentSetup};
pub use error::{GatewayError, Result};
pub use types::{
    AgentMode, CapabilityGroup, Message, Role, ToolCall, ToolInvocation, ToolSchema, TurnOutcome,
};
