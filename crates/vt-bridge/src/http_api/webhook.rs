use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use vt_core::types::UserProfile;
use vt_telegram::{render_reply, Update};

use super::state::ApiState;

/// POST /webhook -- Telegram update ingestion.
///
/// Extracts the sender and message text, runs the command through the
/// executor, and sends the rendered reply back through the Bot API.
/// Always acknowledges with 200 "OK": Telegram retries non-2xx responses,
/// and a user-level command error is not a delivery failure. Updates
/// without a message (edits, callbacks) are acknowledged and ignored.
pub(crate) async fn telegram_webhook(
    State(state): State<Arc<ApiState>>,
    Json(update): Json<Update>,
) -> impl IntoResponse {
    let Some(message) = update.message else {
        return (StatusCode::OK, "OK");
    };
    let (Some(from), Some(text)) = (message.from, message.text) else {
        tracing::debug!(update_id = update.update_id, "update has no sender or text, ignoring");
        return (StatusCode::OK, "OK");
    };

    let owner_id = from.id.to_string();
    tracing::info!(owner = %owner_id, text = %text, "processing chat command");

    state.users.write().await.insert(
        owner_id.clone(),
        UserProfile {
            id: owner_id.clone(),
            username: from.username,
            first_name: from.first_name,
            last_name: from.last_name,
        },
    );

    let outcome = state.executor.execute_line(&owner_id, &text).await;
    let reply = render_reply(&outcome);

    match &state.telegram {
        Some(client) => {
            // Fire-and-forget: the core result is already committed, and
            // Telegram delivery must not block or fail the acknowledgement.
            let client = client.clone();
            let chat_id = message.chat.id;
            tokio::spawn(async move {
                if let Err(err) = client.send_message(chat_id, &reply).await {
                    tracing::warn!(chat_id, error = %err, "failed to send telegram reply");
                }
            });
        }
        None => {
            tracing::info!("bot token not configured, skipping reply");
        }
    }

    (StatusCode::OK, "OK")
}
