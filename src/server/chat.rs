use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::server::ServerState;
use crate::server::error::ApiError;
use crate::types::{FunctionCall, Message, ToolSchema};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub content: Option<String>,
    pub function_call: Option<FunctionCall>,
}

/// Absent and `null` fields both mean "nothing yet".
#[derive(Debug, Default, Deserialize)]
pub struct ChatbotRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatbotResponse {
    pub response: Option<String>,
    pub messages: Vec<Message>,
}

/// Single model call over caller-supplied history. No tool dispatch: a
/// requested function call is handed back to the caller untouched.
pub(crate) async fn chat(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let messages: Vec<Message> = match body.get("messages") {
        Some(raw) if !raw.is_null() => {
            serde_json::from_value(raw.clone()).map_err(|_| ApiError::missing_messages())?
        }
        _ => return Err(ApiError::missing_messages()),
    };

    let tools: Option<Vec<ToolSchema>> = match body.get("tools") {
        Some(raw) if !raw.is_null() => Some(
            serde_json::from_value(raw.clone())
                .map_err(|e| ApiError::bad_request(format!("invalid tools field: {}", e)))?,
        ),
        _ => None,
    };

    let reply = state
        .llm
        .complete_chat(&messages, tools.as_deref())
        .await
        .map_err(|e| {
            error!(error = %e, "chat passthrough failed");
            ApiError::internal(e.to_string())
        })?;

    Ok(Json(ChatResponse {
        content: reply.content,
        function_call: reply.function_call,
    }))
}

/// Full orchestrated turn: model, optional hotel lookup, final answer.
pub(crate) async fn chatbot(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<ChatbotResponse>, ApiError> {
    let request: ChatbotRequest = if body.is_empty() {
        ChatbotRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request(format!("invalid request body: {}", e)))?
    };

    info!(history = request.messages.len(), "running chat turn");
    let outcome = state
        .agent
        .run_turn(request.messages, &request.message)
        .await
        .map_err(|e| {
            error!(error = %e, "chat turn failed");
            ApiError::turn_failed(e.to_string())
        })?;

    Ok(Json(ChatbotResponse {
        response: outcome.reply,
        messages: outcome.messages,
    }))
}
