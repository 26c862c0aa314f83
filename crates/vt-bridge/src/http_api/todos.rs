use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use vt_core::store::TodoStore;
use vt_core::types::TodoPatch;

use super::state::ApiState;
use super::success_envelope;
use super::types::{CreateTodoRequest, DeleteTodoQuery, TodoListQuery, UpdateTodoRequest};
use crate::api_error::ApiError;

/// GET /api/todos?userId= -- all todos belonging to one user.
///
/// **Response:** 200 OK `{"success": true, "data": [Todo]}`; 400 when the
/// `userId` query parameter is missing or empty.
pub(crate) async fn list_todos(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TodoListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_user_id(query.user_id)?;
    let todos = state.store.list_by_owner(&user_id).await;
    Ok(success_envelope(&todos))
}

/// POST /api/todos -- create a new todo.
///
/// **Request body:** `{"userId": "...", "text": "..."}`.
/// **Response:** 200 OK with the created todo in the success envelope;
/// 400 when either field is missing or the text is blank.
pub(crate) async fn create_todo(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(user_id), Some(text)) = (req.user_id, req.text) else {
        return Err(ApiError::BadRequest("User ID and text are required".into()));
    };
    let todo = state.store.create(&user_id, &text).await?;
    Ok(success_envelope(&todo))
}

/// PUT /api/todos/{id} -- partially update a todo.
///
/// Only fields present in the body change. A wrong `userId` responds 404
/// exactly like a nonexistent id.
///
/// **Request body:** `{"userId": "...", "text"?: "...", "completed"?: bool}`.
/// **Response:** 200 OK with the updated todo; 400/404 on failure.
pub(crate) async fn update_todo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_user_id(req.user_id)?;
    let patch = TodoPatch {
        text: req.text,
        completed: req.completed,
    };
    let todo = state.store.update(id, &user_id, patch).await?;
    Ok(success_envelope(&todo))
}

/// DELETE /api/todos/{id}?userId= -- delete a todo.
///
/// Returns the removed todo for confirmation messaging, same ownership
/// masking as update.
pub(crate) async fn delete_todo(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<u64>,
    Query(query): Query<DeleteTodoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_user_id(query.user_id)?;
    let todo = state.store.delete(id, &user_id).await?;
    Ok(success_envelope(&todo))
}

fn require_user_id(user_id: Option<String>) -> Result<String, ApiError> {
    user_id
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".into()))
}
