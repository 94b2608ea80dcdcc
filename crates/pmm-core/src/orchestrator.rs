use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::warn;

use crate::approval::ApprovalPolicy;
use crate::backend::ModelBackend;
use crate::catalogue::{validate_arguments, ToolCatalogue};
use crate::emitter::{relay, StreamEvent};
use crate::error::{GatewayError, Result};
use crate::store::SessionStore;
use crate::types::{CapabilityGroup, Message, ToolCall, ToolInvocation, ToolSchema, TurnOutcome};

/// Drives a single conversation turn: persists the exchange, calls the
/// model with the full transcript, and surfaces any tool invocations to
/// the caller. Tools are never executed here.
pub struct TurnOrchestrator {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn ModelBackend>,
    catalogue: Arc<ToolCatalogue>,
    approval: ApprovalPolicy,
    advertised: Vec<ToolSchema>,
    reject_empty: bool,
}

impl TurnOrchestrator {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn ModelBackend>,
        catalogue: Arc<ToolCatalogue>,
        approval: ApprovalPolicy,
        groups: &[CapabilityGroup],
        reject_empty: bool,
    ) -> Self {
        let advertised = catalogue.schemas(groups);
        Self {
            store,
            backend,
            catalogue,
            approval,
            advertised,
            reject_empty,
        }
    }

    /// Schemas advertised to the model on every turn.
    pub fn advertised(&self) -> &[ToolSchema] {
        &self.advertised
    }

    /// Run a non-streaming turn. The user message is persisted before the
    /// model call; exactly one assistant message is persisted on success.
    pub async fn run_turn(&self, session_id: Option<&str>, text: &str) -> Result<TurnOutcome> {
        self.check_message(text)?;
        let session_id = self.open_session(session_id, text)?;
        let transcript = self.store.transcript(&session_id)?;

        // On model failure the user message stays; the turn can be retried.
        let reply = self.backend.complete(&transcript, &self.advertised).await?;

        let tool_calls: Vec<ToolCall> = reply
            .invocations
            .into_iter()
            .map(|inv| annotate(&self.catalogue, &self.approval, inv))
            .collect();

        let response = if reply.text.is_empty() && !tool_calls.is_empty() {
            placeholder_text(&tool_calls)
        } else {
            reply.text
        };

        self.store.append(&session_id, Message::assistant(&response))?;

        Ok(TurnOutcome {
            session_id,
            response,
            tool_calls,
        })
    }

    /// Run a streaming turn. Events arrive on the returned channel; the
    /// assistant turn is persisted before the terminal event is sent, and
    /// a mid-stream failure still persists the partial text.
    pub async fn stream_turn(
        &self,
        session_id: Option<&str>,
        text: &str,
    ) -> Result<UnboundedReceiver<StreamEvent>> {
        self.check_message(text)?;
        let session_id = self.open_session(session_id, text)?;
        let transcript = self.store.transcript(&session_id)?;

        let stream = self.backend.stream(&transcript, &self.advertised).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let store = Arc::clone(&self.store);
        let catalogue = Arc::clone(&self.catalogue);
        let approval = self.approval.clone();
        tokio::spawn(async move {
            let mark = move |inv: ToolInvocation| annotate(&catalogue, &approval, inv);
            let outcome = relay(stream, mark, &tx).await;

            let persisted = store.append(&session_id, Message::assistant(&outcome.text));

            let terminal = match (persisted, outcome.failure) {
                (Ok(()), None) => StreamEvent::Done { session_id },
                (Ok(()), Some(e)) => StreamEvent::Error {
                    error: e.to_string(),
                },
                (Err(e), _) => {
                    warn!("Failed to persist streamed reply: {}", e);
                    StreamEvent::Error {
                        error: e.to_string(),
                    }
                }
            };
            let _ = tx.send(terminal);
        });

        Ok(rx)
    }

    fn check_message(&self, text: &str) -> Result<()> {
        if self.reject_empty && text.trim().is_empty() {
            return Err(GatewayError::Validation("message must not be empty".into()));
        }
        Ok(())
    }

    fn open_session(&self, session_id: Option<&str>, text: &str) -> Result<String> {
        let session = self.store.get_or_create(session_id)?;
        self.store.append(&session.id, Message::user(text))?;
        Ok(session.id)
    }
}

/// Annotate a surfaced invocation with approval and validation checks.
/// Validation failures are reported on the call, never as turn errors.
fn annotate(
    catalogue: &ToolCatalogue,
    approval: &ApprovalPolicy,
    invocation: ToolInvocation,
) -> ToolCall {
    let approval_required = approval.requires_approval(&invocation.name);
    let validation_error = match catalogue.lookup(&invocation.name) {
        Some(tool) => validate_arguments(&tool.parameters_schema(), &invocation.arguments).err(),
        None => Some(format!("unknown tool '{}'", invocation.name)),
    };
    ToolCall {
        name: invocation.name,
        arguments: invocation.arguments,
        approval_required,
        validation_error,
    }
}

/// Stand-in text persisted when the model replied with tool calls only,
/// so the transcript keeps a non-empty assistant turn.
fn placeholder_text(calls: &[ToolCall]) -> String {
    let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
    format!("Using tools: {}", names.join(", "))
}
