//! Command execution.
//!
//! [`Executor`] applies a parsed [`Command`] against a [`TodoStore`] and
//! produces a channel-independent [`Outcome`]. Adapters (REST, Telegram
//! webhook) only translate: they never inspect or mutate the store
//! themselves.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::command::{self, Command, ParseError};
use crate::store::{StoreError, TodoStore};
use crate::types::{Todo, TodoPatch};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Added,
    Listed,
    MarkedDone,
    Deleted,
    Help,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    InvalidArgument,
    UnknownCommand,
}

/// Uniform result of executing one command.
///
/// `data` carries the machine-readable payload (the todo, the listing);
/// `message` is a human-readable summary adapters may show directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub ok: bool,
    pub kind: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<serde_json::Value>,
    pub message: String,
}

impl Outcome {
    pub fn ok(kind: OutcomeKind, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            kind,
            error: None,
            data: None,
            message: message.into(),
        }
    }

    pub fn ok_data(
        kind: OutcomeKind,
        data: serde_json::Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok: true,
            kind,
            error: None,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn err(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            kind: OutcomeKind::Error,
            error: Some(error),
            data: None,
            message: message.into(),
        }
    }
}

/// One row of a `Listed` payload: the todo plus its 1-based display
/// position. Positions are computed here on every listing and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntry {
    pub position: usize,
    #[serde(flatten)]
    pub todo: Todo,
}

// ---------------------------------------------------------------------------
// Static help
// ---------------------------------------------------------------------------

pub const GREETING: &str = "Hi! I manage your to-do list.\n\n\
Use these commands:\n\
/add <task> - add a task\n\
/list - show all your tasks\n\
/done <number> - mark a task as completed\n\
/delete <number> - delete a task\n\
/help - show help\n\n\
Or open the mini app for point-and-tap management!";

pub const HELP_TEXT: &str = "Available commands:\n\n\
/start - start working with the bot\n\
/add <task> - add a new task\n\
/list - show all your tasks\n\
/done <number> - mark a task as completed\n\
/delete <number> - delete a task\n\
/help - show this help";

const NO_TASKS: &str = "You have no tasks yet. Add the first one with /add";
const POSITION_NOT_FOUND: &str =
    "No task with that number. Use /list to see your tasks.";
const UNKNOWN_COMMAND: &str = "Unknown command. Use /help to see available commands.";

// ---------------------------------------------------------------------------
// Executor
// ---------------------------------------------------------------------------

pub struct Executor {
    store: Arc<dyn TodoStore>,
    // Serializes the list-resolve-mutate sequence of Done/Delete so two
    // concurrent requests cannot act on the same stale position.
    resolve_lock: Mutex<()>,
}

impl Executor {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            store,
            resolve_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }

    /// Parse `line` and execute it for `owner_id`. Parse failures become
    /// error outcomes; this never panics or propagates.
    pub async fn execute_line(&self, owner_id: &str, line: &str) -> Outcome {
        match command::parse(line) {
            Ok(cmd) => self.execute(owner_id, cmd).await,
            Err(ParseError::EmptyText) => {
                Outcome::err(ErrorKind::Validation, "task text required")
            }
            Err(err @ ParseError::InvalidPosition(_)) => {
                Outcome::err(ErrorKind::InvalidArgument, err.to_string())
            }
        }
    }

    pub async fn execute(&self, owner_id: &str, cmd: Command) -> Outcome {
        tracing::debug!(owner = owner_id, command = ?cmd, "executing command");
        match cmd {
            Command::Start => Outcome::ok(OutcomeKind::Help, GREETING),
            Command::Help => Outcome::ok(OutcomeKind::Help, HELP_TEXT),
            Command::Add { text } => self.add(owner_id, &text).await,
            Command::List => self.list(owner_id).await,
            Command::Done { position } => self.complete(owner_id, position).await,
            Command::Delete { position } => self.remove(owner_id, position).await,
            Command::Unknown { raw } => {
                let mut outcome = Outcome::err(ErrorKind::UnknownCommand, UNKNOWN_COMMAND);
                outcome.data = Some(json!({ "input": raw }));
                outcome
            }
        }
    }

    async fn add(&self, owner_id: &str, text: &str) -> Outcome {
        match self.store.create(owner_id, text).await {
            Ok(todo) => {
                let message = format!("Task added: \"{}\"", todo.text);
                Outcome::ok_data(OutcomeKind::Added, json!(todo), message)
            }
            Err(err) => store_error_outcome(err),
        }
    }

    async fn list(&self, owner_id: &str) -> Outcome {
        let todos = self.store.list_by_owner(owner_id).await;
        let message = if todos.is_empty() {
            NO_TASKS.to_string()
        } else {
            format!("You have {} task(s)", todos.len())
        };
        let entries: Vec<ListEntry> = todos
            .into_iter()
            .enumerate()
            .map(|(i, todo)| ListEntry {
                position: i + 1,
                todo,
            })
            .collect();
        Outcome::ok_data(OutcomeKind::Listed, json!(entries), message)
    }

    async fn complete(&self, owner_id: &str, position: usize) -> Outcome {
        let _guard = self.resolve_lock.lock().await;
        let Some(id) = self.resolve(owner_id, position).await else {
            return Outcome::err(ErrorKind::NotFound, POSITION_NOT_FOUND);
        };
        match self.store.update(id, owner_id, TodoPatch::completed(true)).await {
            Ok(todo) => {
                let message = format!("Task completed: \"{}\"", todo.text);
                Outcome::ok_data(OutcomeKind::MarkedDone, json!(todo), message)
            }
            Err(err) => store_error_outcome(err),
        }
    }

    async fn remove(&self, owner_id: &str, position: usize) -> Outcome {
        let _guard = self.resolve_lock.lock().await;
        let Some(id) = self.resolve(owner_id, position).await else {
            return Outcome::err(ErrorKind::NotFound, POSITION_NOT_FOUND);
        };
        match self.store.delete(id, owner_id).await {
            Ok(todo) => {
                let message = format!("Task deleted: \"{}\"", todo.text);
                Outcome::ok_data(OutcomeKind::Deleted, json!(todo), message)
            }
            Err(err) => store_error_outcome(err),
        }
    }

    /// Map a 1-based position onto the underlying todo id, against the
    /// owner's list as it exists right now. Returns `None` when out of
    /// range (including position 0).
    async fn resolve(&self, owner_id: &str, position: usize) -> Option<u64> {
        let todos = self.store.list_by_owner(owner_id).await;
        if position == 0 || position > todos.len() {
            return None;
        }
        Some(todos[position - 1].id)
    }
}

fn store_error_outcome(err: StoreError) -> Outcome {
    match err {
        StoreError::Validation(msg) => Outcome::err(ErrorKind::Validation, msg),
        StoreError::NotFound => Outcome::err(ErrorKind::NotFound, POSITION_NOT_FOUND),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
