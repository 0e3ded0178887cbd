//! LLM abstraction layer
//!
//! This module provides the tool-calling chat orchestrator, the tool
//! registry and schema builder, and the responses API backend it talks to.

pub mod chat;
pub mod core;
pub mod openai;
pub mod tools;

// Re-export commonly used types
pub use chat::{ChatError, TooledChat};
pub use self::core::{
    error::LlmError,
    provider::ResponsesBackend,
    types::{Message, MessageList, Role, TextMessage, ToolSchema},
};
pub use openai::ResponsesClient;
pub use tools::{ParamType, RegistryError, ToolError, ToolRegistry};
