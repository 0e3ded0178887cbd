// POST /chat handler

use std::sync::Arc;

use warp::http::StatusCode;

use crate::llm::chat::TooledChat;
use crate::models::{ChatRequest, ChatReply};

/// Rejection raised when the orchestration cycle fails
///
/// Covers backend errors, tool execution failures, and an exceeded tool
/// loop; mapped to a 500 by the rejection handler.
#[derive(Debug)]
pub struct ChatFailed;

impl warp::reject::Reject for ChatFailed {}

pub async fn chat_handler(
    request: ChatRequest,
    chat: Arc<TooledChat>,
) -> Result<impl warp::Reply, warp::Rejection> {
    // The history lives for this request only; nothing is persisted
    let mut messages = request.messages;

    match chat.create_response(&mut messages).await {
        Ok(response) => Ok(warp::reply::with_status(
            warp::reply::json(&ChatReply {
                reply: response.content,
                role: response.role,
            }),
            StatusCode::OK,
        )),
        Err(error) => {
            tracing::error!(%error, "chat exchange failed");
            Err(warp::reject::custom(ChatFailed))
        }
    }
}
