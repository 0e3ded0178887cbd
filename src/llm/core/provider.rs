//! Backend trait for the responses API

use async_trait::async_trait;

use super::{
    error::LlmError,
    types::{Message, ToolSchema},
};
use crate::llm::openai::types::ModelResponse;

/// Interface to the LLM responses backend consumed by the orchestrator
///
/// One call sends the full message history plus the compiled tool schemas
/// and returns the model's output items. Implementations own their
/// credentials and endpoint configuration; there is no ambient global
/// client state.
#[async_trait]
pub trait ResponsesBackend: Send + Sync {
    /// Request a model response for the given history and tool set
    ///
    /// # Arguments
    /// * `input` - The ordered conversation history
    /// * `tools` - Compiled schemas for every registered tool (may be empty)
    ///
    /// # Returns
    /// The parsed response output items, or an error if the request fails
    async fn create_model_response(
        &self,
        input: &[Message],
        tools: &[ToolSchema],
    ) -> Result<ModelResponse, LlmError>;
}
