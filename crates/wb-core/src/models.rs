//! # Domain Models
//!
//! These structs represent the core entities of Warble.
//! We use UUID v7 for time-ordered, globally unique post identification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account, keyed by its immutable handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The primary key (e.g., "alice"). Never changes after registration.
    pub handle: String,
    /// Free-text label shown next to posts; not unique.
    pub display_name: String,
    /// Prefixed display form of the handle (e.g., "@alice").
    pub display_handle: String,
    /// Base64-encoded PNG icon payload.
    pub icon: String,
}

impl User {
    pub fn new(display_name: &str, handle: &str, icon: String) -> Self {
        Self {
            handle: handle.to_string(),
            display_name: display_name.to_string(),
            display_handle: format!("@{handle}"),
            icon,
        }
    }
}

/// A single update on the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Handle of the creating user. Weak reference: the user may be
    /// absent at render time and callers must fall back gracefully.
    pub author: String,
    pub text: String,
    /// Optional base64-encoded image payload attached to the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Post {
    pub fn new(author: &str, text: &str, image: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            author: author.to_string(),
            text: text.to_string(),
            image,
            created_at: Utc::now(),
            like_count: 0,
            replies: Vec::new(),
        }
    }

    /// Timestamp at display precision. Full precision stays in
    /// `created_at` for ordering.
    pub fn display_time(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// A threaded comment on a post. Append-only, arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Handle of the replying user (weak reference, like `Post::author`).
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    pub fn new(author: &str, text: &str) -> Self {
        Self {
            author: author.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        }
    }
}
