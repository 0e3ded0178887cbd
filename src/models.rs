// Request/response envelopes for the HTTP surface

use serde::{Deserialize, Serialize};

use crate::llm::core::types::{MessageList, Role};

// Request Types
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub messages: MessageList,
}

// Response Types
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReply {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
