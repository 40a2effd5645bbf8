//! HTTP route handlers for command invocation.
//!
//! The main route is `/api/invoke/{command}` which accepts POST requests
//! with JSON body and dispatches to the FAQ command named in the path.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use faqbot_core::{FaqCommand, InvokeError};

use super::auth;
use super::state::AppState;

/// Response format for command invocation.
#[derive(Serialize)]
pub struct InvokeResponse {
    /// Whether the command succeeded.
    pub success: bool,
    /// The reply text (if successful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error message (if failed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for command invocation.
#[derive(Deserialize)]
pub struct InvokeRequest {
    /// Arguments for the command (optional).
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Handler for POST /api/invoke/{command}
///
/// Parses the invocation, checks authorization for mutating commands, runs
/// the command against the store, and wires the `faq_stop` reply into a
/// graceful server shutdown.
pub async fn invoke_handler(
    Path(command): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<InvokeRequest>,
) -> (StatusCode, Json<InvokeResponse>) {
    log::debug!("HTTP invoke: {} with args: {:?}", command, request.args);

    let command = match FaqCommand::from_invoke(&command, &request.args) {
        Ok(command) => command,
        Err(err) => {
            let status = match err {
                InvokeError::UnknownCommand(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            };
            return (
                status,
                Json(InvokeResponse {
                    success: false,
                    data: None,
                    error: Some(err.to_string()),
                }),
            );
        }
    };

    if command.requires_manage() && !state.validate_token(auth::extract_bearer_token(&headers)) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(InvokeResponse {
                success: false,
                data: None,
                error: Some("Invalid or missing authentication token".to_string()),
            }),
        );
    }

    match state.with_store(|store| command.execute(store)) {
        Ok(reply) => {
            if reply.shutdown {
                state.request_shutdown();
            }
            (
                StatusCode::OK,
                Json(InvokeResponse {
                    success: true,
                    data: Some(serde_json::json!(reply.text)),
                    error: None,
                }),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(InvokeResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

// ============================================================================
// TESTS
// ============================================================================
