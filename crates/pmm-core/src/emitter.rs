use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::backend::{ModelChunk, ModelStream};
use crate::error::GatewayError;
use crate::types::{ToolCall, ToolInvocation};

/// Events emitted to streaming callers, serialized as tagged JSON.
///
/// Text fragments may be split arbitrarily; tool calls are always
/// complete. A healthy stream ends with exactly one `done`, a failed
/// one with `error` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// A fragment of the assistant's text reply.
    Text { content: String },
    /// A complete tool call surfaced for the caller to act on.
    ToolCall(ToolCall),
    /// Terminal success event carrying the session id.
    Done { session_id: String },
    /// Terminal failure event, sent in place of `done`.
    Error { error: String },
}

/// What draining a model stream left behind.
pub(crate) struct RelayOutcome {
    pub text: String,
    pub failure: Option<GatewayError>,
}

/// Drain a model stream into caller events, accumulating the text reply.
///
/// Stops at the first stream failure; the partial text is returned either
/// way. Terminal events are the orchestrator's to send.
pub(crate) async fn relay<F>(
    mut stream: ModelStream,
    annotate: F,
    events: &UnboundedSender<StreamEvent>,
) -> RelayOutcome
where
    F: Fn(ToolInvocation) -> ToolCall,
{
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(ModelChunk::Text(content)) => {
                text.push_str(&content);
                let _ = events.send(StreamEvent::Text { content });
            }
            Ok(ModelChunk::Invocation(invocation)) => {
                let _ = events.send(StreamEvent::ToolCall(annotate(invocation)));
            }
            Err(e) => {
                return RelayOutcome {
                    text,
                    failure: Some(e),
                };
            }
        }
    }
    RelayOutcome {
        text,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::mpsc;

    #[test]
    fn test_text_event_wire_format() {
        let event = StreamEvent::Text {
            content: "hello".into(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "text", "content": "hello"})
        );
    }

    #[test]
    fn test_tool_call_event_wire_format() {
        let event = StreamEvent::ToolCall(ToolCall {
            name: "create_launch_plan".into(),
            arguments: json!({"product_name": "Acme"}),
            approval_required: true,
            validation_error: None,
        });
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "tool_call",
                "name": "create_launch_plan",
                "args": {"product_name": "Acme"},
                "approval_required": true
            })
        );
    }

    #[test]
    fn test_done_event_wire_format() {
        let event = StreamEvent::Done {
            session_id: "abc".into(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "done", "session_id": "abc"})
        );
    }

    fn passthrough(invocation: ToolInvocation) -> ToolCall {
        ToolCall {
            name: invocation.name,
            arguments: invocation.arguments,
            approval_required: false,
            validation_error: None,
        }
    }

    #[tokio::test]
    async fn test_relay_accumulates_text_and_forwards_events() {
        let chunks: Vec<crate::error::Result<ModelChunk>> = vec![
            Ok(ModelChunk::Text("Hello ".into())),
            Ok(ModelChunk::Text("world".into())),
            Ok(ModelChunk::Invocation(ToolInvocation {
                name: "fetch_url".into(),
                arguments: json!({"url": "https://x.dev"}),
            })),
        ];
        let stream: ModelStream = Box::pin(futures::stream::iter(chunks));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = relay(stream, passthrough, &tx).await;
        assert_eq!(outcome.text, "Hello world");
        assert!(outcome.failure.is_none());

        assert!(matches!(rx.recv().await, Some(StreamEvent::Text { .. })));
        assert!(matches!(rx.recv().await, Some(StreamEvent::Text { .. })));
        match rx.recv().await {
            Some(StreamEvent::ToolCall(call)) => assert_eq!(call.name, "fetch_url"),
            other => panic!("expected tool_call event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_relay_stops_at_failure_and_keeps_partial_text() {
        let chunks: Vec<crate::error::Result<ModelChunk>> = vec![
            Ok(ModelChunk::Text("partial ".into())),
            Ok(ModelChunk::Text("reply".into())),
            Err(GatewayError::StreamInterrupted("connection reset".into())),
            Ok(ModelChunk::Text("never seen".into())),
        ];
        let stream: ModelStream = Box::pin(futures::stream::iter(chunks));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = relay(stream, passthrough, &tx).await;
        assert_eq!(outcome.text, "partial reply");
        assert!(matches!(
            outcome.failure,
            Some(GatewayError::StreamInterrupted(_))
        ));

        assert!(matches!(rx.recv().await, Some(StreamEvent::Text { .. })));
        assert!(matches!(rx.recv().await, Some(StreamEvent::Text { .. })));
        drop(tx);
        assert!(rx.recv().await.is_none());
    }
}
