//! Responses API backend implementation
//!
//! This module provides the production [`crate::llm::core::provider::ResponsesBackend`]
//! implementation talking to the LLM responses endpoint over HTTPS.

pub mod client;
pub mod types;

// Re-export commonly used types
pub use client::{ResponsesClient, DEFAULT_MODEL};
