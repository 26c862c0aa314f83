use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing bot token — set TELEGRAM_BOT_TOKEN")]
    MissingToken,

    #[error("sendMessage rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, TelegramError>;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Outbound Telegram Bot API client.
///
/// Replies are fire-and-forget from the webhook's point of view; callers
/// spawn the send and log failures instead of propagating them.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    send_message_url: String,
}

impl TelegramClient {
    /// Create a client against `api_base` (normally
    /// `https://api.telegram.org`) with an explicit bot token.
    pub fn new(api_base: &str, token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            http: reqwest::Client::new(),
            send_message_url: format!("{}/bot{}/sendMessage", api_base.trim_end_matches('/'), token),
        }
    }

    /// Create a client by reading `TELEGRAM_BOT_TOKEN` from the
    /// environment. `None`-like absence is an error so the caller can
    /// decide to run reply-less instead.
    pub fn new_from_env(api_base: &str) -> Result<Self> {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| TelegramError::MissingToken)?;
        if token.is_empty() {
            return Err(TelegramError::MissingToken);
        }
        Ok(Self::new(api_base, token))
    }

    /// Send a plain-text reply to `chat_id`. HTML parse mode, matching the
    /// bot's original message formatting.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        let response: ApiResponse = self
            .http
            .post(&self.send_message_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TelegramError::Rejected(
                response.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }
        tracing::debug!(chat_id, "telegram reply delivered");
        Ok(())
    }
}
