//! HTTP server exposing the FAQ commands.
//!
//! Every chat command is reachable via REST as POST /api/invoke/{command},
//! so any integration that can speak HTTP can drive the bot.

mod auth;
mod routes;
mod state;

pub use state::AppState;

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};

use faqbot_core::FaqStore;

/// Build the router serving the invoke endpoint.
fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/invoke/{command}",
            axum::routing::post(routes::invoke_handler),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Run the HTTP server until `faq_stop` or Ctrl-C.
///
/// `faq_stop` exits the process so a supervisor can restart it with a fresh
/// store load.
pub async fn serve(
    store: FaqStore,
    auth_token: Option<String>,
    host: &str,
    port: u16,
) -> Result<(), String> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let state = Arc::new(AppState::new(store, auth_token, shutdown_tx));
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind HTTP server to {}: {}", addr, e))?;

    log::info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::select! {
                _ = shutdown_rx => {
                    log::info!("stop command received, shutting down");
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("received Ctrl-C, shutting down");
                }
            }
        })
        .await
        .map_err(|e| format!("HTTP server error: {}", e))?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn test_router() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = FaqStore::open(dir.path().join("faq.json")).unwrap();
        let (shutdown_tx, _shutdown_rx) = oneshot::channel();
        let state = Arc::new(AppState::new(store, None, shutdown_tx));
        (build_router(state), dir)
    }

    fn invoke_request(command: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/invoke/{command}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn invoke_route_dispatches_lookup() {
        let (app, _dir) = test_router();

        let response = app
            .oneshot(invoke_request("faq", r#"{"args": {"key": "list"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "# 2 available faqs:\n```help, list```");
    }

    #[tokio::test]
    async fn invoke_route_rejects_unknown_command() {
        let (app, _dir) = test_router();

        let response = app
            .oneshot(invoke_request("not_a_command", r#"{"args": {}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn mutations_are_visible_to_later_requests() {
        let (app, _dir) = test_router();

        let response = app
            .clone()
            .oneshot(invoke_request(
                "faq_set",
                r#"{"args": {"key": "k", "type": "answer", "text": "hello"}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(invoke_request("faq", r#"{"args": {"key": "k"}}"#))
            .await
            .unwrap();
        let json = response_json(response).await;
        assert_eq!(json["data"], "## ?\nkey: k\nhello");
    }
}
