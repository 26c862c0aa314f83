//! Chat-reply rendering of executor outcomes.
//!
//! Presentation only: the glyphs and phrasing are the bot's reply style,
//! while everything the messages describe comes from the core outcome.

use vt_core::executor::{ListEntry, Outcome, OutcomeKind};

/// Render an [`Outcome`] into the text reply sent back to the chat.
pub fn render_reply(outcome: &Outcome) -> String {
    match outcome.kind {
        OutcomeKind::Added | OutcomeKind::MarkedDone => format!("✅ {}", outcome.message),
        OutcomeKind::Deleted => format!("🗑️ {}", outcome.message),
        OutcomeKind::Listed => render_listing(outcome),
        // Help and errors go out verbatim; both are written for end users.
        OutcomeKind::Help | OutcomeKind::Error => outcome.message.clone(),
    }
}

fn render_listing(outcome: &Outcome) -> String {
    let entries: Vec<ListEntry> = outcome
        .data
        .clone()
        .and_then(|data| serde_json::from_value(data).ok())
        .unwrap_or_default();

    if entries.is_empty() {
        return outcome.message.clone();
    }

    let mut reply = String::from("📋 Your tasks:\n\n");
    for entry in &entries {
        let status = if entry.todo.completed { "✅" } else { "⏳" };
        reply.push_str(&format!("{}. {} {}\n", entry.position, status, entry.todo.text));
    }
    reply
}
