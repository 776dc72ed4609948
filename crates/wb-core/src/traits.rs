//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use crate::error::Result;
use crate::models::{Post, User};
use async_trait::async_trait;
use std::collections::HashMap;

/// Durable-document contract for the two feed collections.
///
/// The adapter owns the durable copies and is the only component
/// permitted to perform file-level I/O. Loads return an empty
/// collection when no durable copy exists yet (first-run semantics)
/// and `FeedError::CorruptStore` when an existing copy cannot be
/// parsed. Saves fully overwrite the durable copy; the two documents
/// are independent (no cross-collection transaction).
#[async_trait]
pub trait FeedStateStore: Send + Sync {
    async fn load_users(&self) -> Result<HashMap<String, User>>;
    async fn load_posts(&self) -> Result<Vec<Post>>;

    async fn save_users(&self, users: &HashMap<String, User>) -> Result<()>;
    async fn save_posts(&self, posts: &[Post]) -> Result<()>;
}
