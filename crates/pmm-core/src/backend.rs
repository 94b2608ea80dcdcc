use std::pin::Pin;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolArgs, ChatCompletionToolType,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, FunctionObjectArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::ProviderConfig;
use crate::error::{GatewayError, Result};
use crate::types::{Message, Role, ToolInvocation, ToolSchema};

/// A fragment of a streamed model reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelChunk {
    Text(String),
    Invocation(ToolInvocation),
}

/// A complete, non-streamed model reply.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub text: String,
    pub invocations: Vec<ToolInvocation>,
}

/// Finite stream of reply fragments for a single turn. Not restartable.
pub type ModelStream = Pin<Box<dyn Stream<Item = Result<ModelChunk>> + Send>>;

/// Abstraction over the chat model provider.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Send the full transcript and advertised tools, waiting for the
    /// complete reply.
    async fn complete(&self, transcript: &[Message], tools: &[ToolSchema]) -> Result<ModelReply>;

    /// Same inputs, but the reply arrives incrementally as a chunk stream.
    async fn stream(&self, transcript: &[Message], tools: &[ToolSchema]) -> Result<ModelStream>;
}

/// Backend speaking the OpenAI-compatible chat completions API.
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiBackend {
    pub fn new(provider: &ProviderConfig) -> Self {
        let api_key = provider
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .unwrap_or_else(|| "not-needed".to_string());
        let openai_config = OpenAIConfig::new()
            .with_api_base(&provider.api_base)
            .with_api_key(api_key);
        Self {
            client: Client::with_config(openai_config),
            model: provider.model.clone(),
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
        }
    }

    fn build_request(
        &self,
        transcript: &[Message],
        tools: &[ToolSchema],
    ) -> Result<CreateChatCompletionRequest> {
        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.model)
            .messages(build_request_messages(transcript)?)
            .temperature(self.temperature)
            .max_completion_tokens(self.max_tokens);

        if !tools.is_empty() {
            request_builder.tools(build_request_tools(tools)?);
        }

        request_builder
            .build()
            .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    async fn complete(&self, transcript: &[Message], tools: &[ToolSchema]) -> Result<ModelReply> {
        let request = self.build_request(transcript, tools)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::ModelUnavailable("no choices in response".into()))?;

        let text = choice.message.content.unwrap_or_default();
        let invocations = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolInvocation {
                name: tc.function.name,
                arguments: parse_arguments(&tc.function.arguments),
            })
            .collect();

        Ok(ModelReply { text, invocations })
    }

    async fn stream(&self, transcript: &[Message], tools: &[ToolSchema]) -> Result<ModelStream> {
        let request = self.build_request(transcript, tools)?;

        let mut upstream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut assembler = ToolCallAssembler::new();
            while let Some(next) = upstream.next().await {
                let response = match next {
                    Ok(r) => r,
                    Err(e) => {
                        let _ = tx.send(Err(GatewayError::StreamInterrupted(e.to_string())));
                        return;
                    }
                };
                let Some(choice) = response.choices.into_iter().next() else {
                    continue;
                };
                if let Some(content) = choice.delta.content {
                    if !content.is_empty() {
                        let _ = tx.send(Ok(ModelChunk::Text(content)));
                    }
                }
                for chunk in choice.delta.tool_calls.unwrap_or_default() {
                    let (name, fragment) = match &chunk.function {
                        Some(f) => (f.name.as_deref(), f.arguments.as_deref()),
                        None => (None, None),
                    };
                    for invocation in assembler.push(chunk.index as usize, name, fragment) {
                        let _ = tx.send(Ok(ModelChunk::Invocation(invocation)));
                    }
                }
            }
            for invocation in assembler.finish() {
                let _ = tx.send(Ok(ModelChunk::Invocation(invocation)));
            }
        });

        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }
}

/// Tool arguments arrive as a JSON string. Invalid payloads are preserved
/// verbatim so the caller can see what the model actually sent.
fn parse_arguments(raw: &str) -> serde_json::Value {
    if raw.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

fn build_request_messages(transcript: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut result = Vec::with_capacity(transcript.len());
    for msg in transcript {
        match msg.role {
            Role::System => {
                let m = ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content.as_str())
                    .build()
                    .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;
                result.push(ChatCompletionRequestMessage::System(m));
            }
            Role::User => {
                let m = ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.as_str())
                    .build()
                    .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;
                result.push(ChatCompletionRequestMessage::User(m));
            }
            Role::Assistant => {
                let m = ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content.as_str())
                    .build()
                    .map_err(|e| GatewayError::ModelUnavailable(e.to_string()))?;
                result.push(ChatCompletionRequestMessage::Assistant(m));
            }
        }
    }
    Ok(result)
}

fn build_request_tools(tools: &[ToolSchema]) -> Result<Vec<ChatCompletionTool>> {
    tools
        .iter()
        .map(|s| {
            let func = FunctionObjectArgs::default()
                .name(&s.name)
                .description(&s.description)
                .parameters(s.parameters.clone())
                .build()
                .map_err(|e| GatewayError::Schema(format!("function '{}': {}", s.name, e)))?;
            ChatCompletionToolArgs::default()
                .r#type(ChatCompletionToolType::Function)
                .function(func)
                .build()
                .map_err(|e| GatewayError::Schema(format!("tool '{}': {}", s.name, e)))
        })
        .collect()
}

/// Reassembles tool calls that arrive as indexed name/argument fragments.
///
/// A call is complete once a fragment for a later index arrives, or the
/// stream ends. Fragments for the same index are concatenated.
#[derive(Default)]
struct ToolCallAssembler {
    pending: Vec<PendingCall>,
    emitted: usize,
}

#[derive(Default)]
struct PendingCall {
    name: String,
    arguments: String,
}

impl ToolCallAssembler {
    fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        index: usize,
        name: Option<&str>,
        fragment: Option<&str>,
    ) -> Vec<ToolInvocation> {
        while self.pending.len() <= index {
            self.pending.push(PendingCall::default());
        }
        if let Some(name) = name {
            self.pending[index].name.push_str(name);
        }
        if let Some(fragment) = fragment {
            self.pending[index].arguments.push_str(fragment);
        }
        // Everything before the current index is complete.
        self.drain_to(index)
    }

    fn finish(&mut self) -> Vec<ToolInvocation> {
        self.drain_to(self.pending.len())
    }

    fn drain_to(&mut self, index: usize) -> Vec<ToolInvocation> {
        let mut done = Vec::new();
        while self.emitted < index.min(self.pending.len()) {
            let call = std::mem::take(&mut self.pending[self.emitted]);
            self.emitted += 1;
            if call.name.is_empty() {
                continue;
            }
            done.push(ToolInvocation {
                name: call.name,
                arguments: parse_arguments(&call.arguments),
            });
        }
        done
    }
}
