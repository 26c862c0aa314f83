use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use super::state::ApiState;

/// GET / -- service identity and endpoint map.
pub(crate) async fn get_index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "vibetodo API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "webhook": "/webhook",
            "api": {
                "todos": "GET /api/todos",
                "createTodo": "POST /api/todos",
                "updateTodo": "PUT /api/todos/{id}",
                "deleteTodo": "DELETE /api/todos/{id}",
            }
        }
    }))
}

/// GET /health -- liveness plus coarse process stats.
pub(crate) async fn get_health(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now(),
        "todosCount": state.store.len().await,
        "usersCount": state.user_count().await,
        "uptimeSecs": state.started_at.elapsed().as_secs(),
    }))
}
