// ---------------------------------------------------------------------------
// HTTP API module directory
// ---------------------------------------------------------------------------
//
// Handlers are split by domain; this file wires them together, owns the
// Axum router, and re-exports the public items `vt-daemon` consumes.

mod misc;
pub mod state;
mod todos;
pub mod types;
mod webhook;

pub use self::router::api_router;
pub use state::ApiState;
pub use types::*;

// ---------------------------------------------------------------------------
// Shared utilities used across handler modules
// ---------------------------------------------------------------------------

/// Wrap a payload in the `{"success": true, "data": ...}` envelope every
/// REST response has always used.
pub(crate) fn success_envelope<T: serde::Serialize>(data: &T) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "data": data,
    }))
}

// ---------------------------------------------------------------------------
// Router + middleware
// ---------------------------------------------------------------------------

mod router {
    use super::*;
    use axum::{
        http::StatusCode,
        routing::{get, post, put},
        Json, Router,
    };
    use std::sync::Arc;
    use tower_http::cors::CorsLayer;

    /// Build the full API router: REST endpoints, Telegram webhook, and
    /// service endpoints, with CORS for the browser mini app.
    ///
    /// `allowed_origins` extends the always-permitted localhost origins
    /// (the config's `daemon.allowed_origins`).
    pub fn api_router(state: Arc<ApiState>, allowed_origins: Vec<String>) -> Router {
        Router::new()
            .route("/", get(misc::get_index))
            .route("/health", get(misc::get_health))
            .route(
                "/api/todos",
                get(todos::list_todos).post(todos::create_todo),
            )
            .route(
                "/api/todos/{id}",
                put(todos::update_todo).delete(todos::delete_todo),
            )
            .route("/webhook", post(webhook::telegram_webhook))
            .fallback(endpoint_not_found)
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::AllowOrigin::predicate(
                        move |origin: &axum::http::HeaderValue,
                              _request_parts: &axum::http::request::Parts| {
                            if let Ok(origin_str) = origin.to_str() {
                                if origin_str.starts_with("http://localhost")
                                    || origin_str.starts_with("http://127.0.0.1")
                                {
                                    return true;
                                }
                                allowed_origins.iter().any(|allowed| origin_str == allowed)
                            } else {
                                false
                            }
                        },
                    ))
                    .allow_methods([
                        axum::http::Method::GET,
                        axum::http::Method::POST,
                        axum::http::Method::PUT,
                        axum::http::Method::DELETE,
                        axum::http::Method::OPTIONS,
                    ])
                    .allow_headers([
                        axum::http::header::CONTENT_TYPE,
                        axum::http::header::AUTHORIZATION,
                        axum::http::HeaderName::from_static("x-requested-with"),
                    ])
                    .allow_credentials(true),
            )
            .with_state(state)
    }

    async fn endpoint_not_found() -> (StatusCode, Json<serde_json::Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "endpoint not found"})),
        )
    }
}
