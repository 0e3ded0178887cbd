//! Tool-calling chat orchestration
//!
//! This module owns the request/response cycle with the LLM backend:
//! - Sends the conversation history plus the compiled tool schemas
//! - Classifies each returned output item
//! - Executes requested tool calls and appends call/result pairs to history
//! - Re-queries until the model yields a plain text answer

mod error;

pub use error::ChatError;

use crate::llm::core::{
    provider::ResponsesBackend,
    types::{Message, MessageList, Role, TextMessage, ToolSchema},
};
use crate::llm::openai::types::{OutputContent, OutputItem, OutputSegment, ResponseItem};
use crate::llm::tools::registry::{ToolError, ToolRegistry};

/// Default bound on tool-call rounds per exchange
const DEFAULT_MAX_ROUNDS: usize = 10;

/// Fixed reply returned when the model output has no usable shape
///
/// Surfaced to the user inside a normal success envelope; the raw response
/// is logged for diagnosis.
pub const UNEXPECTED_RESPONSE_REPLY: &str = "error, unexpected response type from LLM";

/// Chat orchestrator executing model-requested tool calls
///
/// Holds the backend, the tool registry, and the schemas compiled at
/// registration time (advertised on every request, never recomputed).
/// Immutable after construction, so one instance serves concurrent
/// requests behind an `Arc`.
pub struct TooledChat {
    /// LLM responses backend
    backend: Box<dyn ResponsesBackend>,

    /// Registered tools, looked up by name during dispatch
    registry: ToolRegistry,

    /// Compiled schemas for every registered tool
    schemas: Vec<ToolSchema>,

    /// Maximum number of orchestration rounds (default: 10)
    max_rounds: usize,
}

impl TooledChat {
    /// Create a new orchestrator over a backend and a tool registry
    pub fn new(backend: Box<dyn ResponsesBackend>, registry: ToolRegistry) -> Self {
        let schemas = registry.schemas();
        Self {
            backend,
            registry,
            schemas,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Set the maximum number of rounds (default: 10)
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    /// Run the orchestration loop until the model yields a text answer
    ///
    /// Each round sends the full history plus the tool schemas, executes
    /// any requested tool calls, and appends the call/result pairs to
    /// `messages` before re-querying. Invariant: every appended
    /// function-call request is immediately followed by its output with
    /// the same call_id.
    ///
    /// Recovered locally (logged, call skipped, no history entries):
    /// unparsable arguments, unknown tool names. Fatal: backend errors and
    /// tool execution failures. A model that keeps requesting tools past
    /// the round bound yields [`ChatError::ToolLoopExceeded`].
    pub async fn create_response(
        &self,
        messages: &mut MessageList,
    ) -> Result<TextMessage, ChatError> {
        for _round in 0..self.max_rounds {
            let response = self
                .backend
                .create_model_response(messages, &self.schemas)
                .await?;

            // Classify output items; unrecognized kinds are logged and skipped
            let mut calls = Vec::new();
            for item in &response.output {
                match item {
                    OutputItem::Item(ResponseItem::FunctionCall {
                        name,
                        arguments,
                        call_id,
                    }) => calls.push((name, arguments, call_id)),
                    OutputItem::Item(ResponseItem::Message { .. }) => {}
                    OutputItem::Other(value) => {
                        tracing::error!(
                            output = %value,
                            "unsupported output from LLM, expected message or function_call"
                        );
                    }
                }
            }

            // Dispatch requested tool calls in the order received
            let mut dispatched = false;
            for (name, arguments, call_id) in calls {
                let parsed = match serde_json::from_str::<serde_json::Value>(arguments) {
                    Ok(value) => value,
                    Err(error) => {
                        tracing::error!(
                            tool = %name,
                            %error,
                            "function call arguments are not valid JSON, skipping call"
                        );
                        continue;
                    }
                };

                let binding = match self.registry.lookup(name) {
                    Some(binding) => binding,
                    None => {
                        tracing::error!(tool = %name, "no tool found for function call, skipping");
                        continue;
                    }
                };

                match binding.invoke(parsed).await {
                    Ok(output) => {
                        messages.push(Message::function_call(
                            name.clone(),
                            arguments.clone(),
                            call_id.clone(),
                        ));
                        messages.push(Message::function_call_output(call_id.clone(), output));
                        dispatched = true;
                    }
                    Err(ToolError::InvalidArguments(error)) => {
                        tracing::error!(
                            tool = %name,
                            %error,
                            "tool rejected the call arguments, skipping call"
                        );
                    }
                    // Execution failures abort the whole exchange
                    Err(source) => {
                        return Err(ChatError::ToolExecution {
                            name: name.clone(),
                            source,
                        });
                    }
                }
            }

            // Re-query so the model can respond to the tool outputs; any
            // sibling message item in this round is discarded
            if dispatched {
                continue;
            }

            // Terminal: exactly one message whose first segment is text
            if response.output.len() == 1 {
                if let OutputItem::Item(ResponseItem::Message { content, .. }) = &response.output[0]
                {
                    if let Some(OutputContent::Segment(OutputSegment::OutputText { text })) =
                        content.first()
                    {
                        return Ok(TextMessage {
                            role: Role::Assistant,
                            content: text.clone(),
                        });
                    }
                }
            }

            tracing::error!(
                response = ?response,
                "unsupported response from LLM, expected a single text message"
            );
            return Ok(TextMessage {
                role: Role::Assistant,
                content: UNEXPECTED_RESPONSE_REPLY.to_string(),
            });
        }

        Err(ChatError::ToolLoopExceeded(self.max_rounds))
    }
}
