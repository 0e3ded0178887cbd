use crate::llm::core::error::LlmError;
use crate::llm::tools::registry::ToolError;

/// Errors that abort a chat exchange
///
/// Argument-parse failures and unknown tool names are NOT represented here:
/// those are recovered inside the dispatch loop (logged and skipped) so a
/// partially bad tool round does not take down the exchange.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Error from the LLM backend
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A tool ran and failed; deliberately fatal so tool logic errors are
    /// never silently hidden from the caller
    #[error("tool '{name}' failed: {source}")]
    ToolExecution {
        name: String,
        #[source]
        source: ToolError,
    },

    /// The model kept requesting tool calls past the round bound
    #[error("tool loop exceeded {0} rounds")]
    ToolLoopExceeded(usize),
}
