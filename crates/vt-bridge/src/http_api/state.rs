use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use tokio::sync::RwLock;

use vt_core::executor::Executor;
use vt_core::store::{MemoryStore, TodoStore};
use vt_core::types::UserProfile;
use vt_telegram::TelegramClient;

/// Shared application state for all HTTP handlers.
///
/// The store is held twice on purpose: once as the concrete
/// [`MemoryStore`] (the health endpoint reports process-wide counts the
/// trait deliberately does not expose) and once inside the [`Executor`]
/// behind the `TodoStore` trait object, which is the only view the
/// command path ever sees.
pub struct ApiState {
    pub store: Arc<MemoryStore>,
    pub executor: Executor,
    /// Chat users seen by the webhook, keyed by owner id.
    pub users: RwLock<AHashMap<String, UserProfile>>,
    /// Outbound reply client; `None` runs the webhook reply-less.
    pub telegram: Option<TelegramClient>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            executor: Executor::new(store.clone() as Arc<dyn TodoStore>),
            store,
            users: RwLock::new(AHashMap::new()),
            telegram: None,
            started_at: Instant::now(),
        }
    }

    pub fn with_telegram(mut self, client: TelegramClient) -> Self {
        self.telegram = Some(client);
        self
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for ApiState {
    fn default() -> Self {
        Self::new()
    }
}
