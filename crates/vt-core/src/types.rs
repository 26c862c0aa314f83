use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Todo
// ---------------------------------------------------------------------------

/// A single to-do item owned by one user.
///
/// Serializes with the camelCase field names the REST API has always used;
/// the owner field goes out as `userId`. `updated_at` is omitted until the
/// first mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(id: u64, owner_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            owner_id: owner_id.into(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TodoPatch
// ---------------------------------------------------------------------------

/// Partial update for a todo. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            text: None,
            completed: Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

// ---------------------------------------------------------------------------
// UserProfile
// ---------------------------------------------------------------------------

/// Chat-side identity of a user who has talked to the bot.
///
/// Kept purely for the health endpoint's user count and log context; the
/// core never makes decisions based on anything but the opaque owner id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
