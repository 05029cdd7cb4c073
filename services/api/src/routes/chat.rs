//! Chat menu route

use axum::{Json, response::IntoResponse};
use serde_json::{Value, json};

use crate::{
    chat,
    error::{ApiError, ApiResult},
};

/// Resolve the requested chat node; no body or no `node` key means the start
/// of the menu
pub async fn chat(payload: Option<Json<Value>>) -> ApiResult<impl IntoResponse> {
    let node = payload
        .as_ref()
        .and_then(|Json(value)| value.get("node"))
        .and_then(Value::as_str)
        .unwrap_or(chat::START_NODE)
        .to_string();

    let found = chat::lookup(&node)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown chat node: {}", node)))?;

    Ok(Json(json!({
        "message": found.message,
        "options": found.options,
    })))
}
