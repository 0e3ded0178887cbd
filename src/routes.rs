// Route definitions and rejection mapping

use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::Filter;

use crate::handlers;
use crate::llm::chat::TooledChat;
use crate::models::ErrorReply;

pub fn configure_routes(
    chat: Arc<TooledChat>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // All origins and methods are permitted
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"]);

    let chat_state = warp::any().map(move || Arc::clone(&chat));

    // POST /chat
    let post_chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(chat_state)
        .and_then(handlers::chat_handler);

    post_chat.recover(handle_rejection).with(cors)
}

/// Map rejections onto the error envelope
async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    if let Some(body_error) = err.find::<warp::filters::body::BodyDeserializeError>() {
        let reply = ErrorReply {
            error: "Invalid request payload".to_string(),
            details: Some(body_error.to_string()),
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&reply),
            StatusCode::BAD_REQUEST,
        ));
    }

    if err.find::<handlers::ChatFailed>().is_some() {
        let reply = ErrorReply {
            error: "chat exchange failed".to_string(),
            details: None,
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&reply),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }

    if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        let reply = ErrorReply {
            error: "Invalid request payload".to_string(),
            details: Some("expected application/json".to_string()),
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&reply),
            StatusCode::BAD_REQUEST,
        ));
    }

    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        let reply = ErrorReply {
            error: "Method not allowed".to_string(),
            details: None,
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&reply),
            StatusCode::METHOD_NOT_ALLOWED,
        ));
    }

    if err.is_not_found() {
        let reply = ErrorReply {
            error: "Not found".to_string(),
            details: None,
        };
        return Ok(warp::reply::with_status(
            warp::reply::json(&reply),
            StatusCode::NOT_FOUND,
        ));
    }

    tracing::error!(rejection = ?err, "unhandled rejection");
    let reply = ErrorReply {
        error: "Internal server error".to_string(),
        details: None,
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&reply),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}
