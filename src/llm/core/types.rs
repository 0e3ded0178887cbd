//! Core types shared by the chat orchestrator and the LLM backend

use serde::{Deserialize, Serialize};

/// Role of a plain text message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human input
    User,
    /// Model output
    Assistant,
}

/// Plain text message from the user or the assistant
///
/// The wire form is a bare `{"role": ..., "content": ...}` object with no
/// `type` tag, matching the responses API input format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    pub role: Role,
    pub content: String,
}

/// Wire discriminator for function call items (always `"function_call"`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCallType {
    #[default]
    FunctionCall,
}

/// Wire discriminator for function call outputs (always `"function_call_output"`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionCallOutputType {
    #[default]
    FunctionCallOutput,
}

/// A model-issued request to execute a named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallRequest {
    #[serde(rename = "type")]
    pub kind: FunctionCallType,
    /// Tool name as advertised in the tool schemas
    pub name: String,
    /// JSON-encoded arguments, exactly as the model produced them
    pub arguments: String,
    /// Identifier pairing this call with its output
    pub call_id: String,
}

/// The recorded result of an executed tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCallOutput {
    #[serde(rename = "type")]
    pub kind: FunctionCallOutputType,
    pub call_id: String,
    /// JSON-encoded tool return value
    pub output: String,
}

/// A single item in the conversation history
///
/// Deserialization rejects any shape that is not one of the three kinds:
/// unknown `type` tags and roles outside user/assistant fail parse at the
/// ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Tool invocation requested by the model
    FunctionCall(FunctionCallRequest),
    /// Tool result fed back to the model
    FunctionCallOutput(FunctionCallOutput),
    /// Plain text from the user or the assistant
    Text(TextMessage),
}

impl Message {
    /// Create a new user text message
    pub fn user(content: impl Into<String>) -> Self {
        Message::Text(TextMessage {
            role: Role::User,
            content: content.into(),
        })
    }

    /// Create a new assistant text message
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Text(TextMessage {
            role: Role::Assistant,
            content: content.into(),
        })
    }

    /// Create a function call request entry
    pub fn function_call(
        name: impl Into<String>,
        arguments: impl Into<String>,
        call_id: impl Into<String>,
    ) -> Self {
        Message::FunctionCall(FunctionCallRequest {
            kind: FunctionCallType::FunctionCall,
            name: name.into(),
            arguments: arguments.into(),
            call_id: call_id.into(),
        })
    }

    /// Create a function call output entry
    pub fn function_call_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Message::FunctionCallOutput(FunctionCallOutput {
            kind: FunctionCallOutputType::FunctionCallOutput,
            call_id: call_id.into(),
            output: output.into(),
        })
    }
}

/// Ordered conversation history for one chat exchange
///
/// Append-only within an orchestration cycle, owned by the request handler,
/// discarded when the HTTP response is returned.
pub type MessageList = Vec<Message>;

/// Schema advertising one callable tool to the model
///
/// Compiled once at registration time and cached in the tool binding. The
/// `parameters` value is a strict JSON schema: object type, primitive
/// per-parameter types, every parameter required, `additionalProperties`
/// false, no `default` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
