//! Telegram Bot API integration layer: inbound update types, the outbound
//! `sendMessage` client, and chat-reply rendering of executor outcomes.
//! Handles only Telegram connectivity and presentation; all to-do logic
//! lives in `vt-core`.

mod client;
mod render;
mod types;

pub use client::{Result, TelegramClient, TelegramError};
pub use render::render_reply;
pub use types::{Chat, Message, TelegramUser, Update};
