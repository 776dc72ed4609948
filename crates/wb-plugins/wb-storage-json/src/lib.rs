//! # wb-storage-json
//! warble/crates/wb-plugins/wb-storage-json/src/lib.rs
//! Flat-file implementation of `FeedStateStore`.
//! Features: human-readable JSON documents, first-run defaults,
//! write-temp-then-rename overwrites.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use wb_core::error::{FeedError, Result};
use wb_core::models::{Post, User};
use wb_core::traits::FeedStateStore;

const USERS_FILE: &str = "users.json";
const POSTS_FILE: &str = "posts.json";

/// Persists the Users map and Posts sequence as two independent JSON
/// documents under a data directory.
///
/// Each save fully overwrites its document through a sibling temp file
/// and an atomic rename, so a crash mid-write leaves the previous
/// document intact. The two documents have no cross-document
/// transaction; each collection's durability is independent.
pub struct JsonStateStore {
    data_dir: PathBuf,
}

impl JsonStateStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Reads and parses one document. A missing file yields `default`
    /// (first-run semantics); an unparsable file is surfaced as
    /// `CorruptStore`, never silently replaced with empty state.
    async fn load_document<T: DeserializeOwned>(&self, file: &str, default: T) -> Result<T> {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("{file} not found, starting empty");
                return Ok(default);
            }
            Err(e) => return Err(FeedError::Persistence(format!("read {file}: {e}"))),
        };

        serde_json::from_str(&raw).map_err(|e| FeedError::CorruptStore {
            document: file.to_string(),
            reason: e.to_string(),
        })
    }

    /// Serializes `value` and replaces the document atomically.
    /// serde_json emits UTF-8 without escaping non-ASCII content, so
    /// the documents stay human-readable.
    async fn save_document<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| FeedError::Persistence(format!("serialize {file}: {e}")))?;

        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| FeedError::Persistence(format!("create data dir: {e}")))?;

        let path = self.path(file);
        let tmp = self.path(&format!("{file}.tmp"));
        write_and_rename(&tmp, &path, json.as_bytes())
            .await
            .map_err(|e| FeedError::Persistence(format!("write {file}: {e}")))
    }
}

async fn write_and_rename(tmp: &Path, target: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(tmp, data).await?;
    fs::rename(tmp, target).await
}

#[async_trait]
impl FeedStateStore for JsonStateStore {
    async fn load_users(&self) -> Result<HashMap<String, User>> {
        self.load_document(USERS_FILE, HashMap::new()).await
    }

    async fn load_posts(&self) -> Result<Vec<Post>> {
        self.load_document(POSTS_FILE, Vec::new()).await
    }

    async fn save_users(&self, users: &HashMap<String, User>) -> Result<()> {
        self.save_document(USERS_FILE, users).await
    }

    async fn save_posts(&self, posts: &[Post]) -> Result<()> {
        self.save_document(POSTS_FILE, &posts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wb_core::models::Reply;

    fn store(dir: &tempfile::TempDir) -> JsonStateStore {
        JsonStateStore::new(dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn first_run_loads_empty_collections() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        assert!(s.load_users().await.unwrap().is_empty());
        assert!(s.load_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn users_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);

        let mut users = HashMap::new();
        users.insert(
            "alice".to_string(),
            User::new("Alice", "alice", "aWNvbkE=".to_string()),
        );
        s.save_users(&users).await.unwrap();

        assert_eq!(s.load_users().await.unwrap(), users);
    }

    #[tokio::test]
    async fn posts_round_trip_preserves_order_and_replies() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);

        let mut newest = Post::new("bob", "second", None);
        newest.like_count = 2;
        newest.replies.push(Reply::new("alice", "nice"));
        let posts = vec![newest, Post::new("alice", "first", Some("aW1n".to_string()))];

        s.save_posts(&posts).await.unwrap();
        assert_eq!(s.load_posts().await.unwrap(), posts);
    }

    #[tokio::test]
    async fn non_ascii_text_survives_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);

        let posts = vec![Post::new("花子", "今どうしてる？🎌", None)];
        s.save_posts(&posts).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("posts.json")).unwrap();
        assert!(raw.contains("今どうしてる？🎌"));
        assert_eq!(s.load_posts().await.unwrap(), posts);
    }

    #[tokio::test]
    async fn corrupt_document_is_surfaced_not_reset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("posts.json"), "{ not json").unwrap();

        let err = store(&dir).load_posts().await.unwrap_err();
        assert!(matches!(err, FeedError::CorruptStore { ref document, .. } if document == "posts.json"));

        // The broken document is still there for operator inspection.
        let raw = std::fs::read_to_string(dir.path().join("posts.json")).unwrap();
        assert_eq!(raw, "{ not json");
    }

    #[tokio::test]
    async fn save_overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);

        s.save_posts(&[Post::new("a", "old", None)]).await.unwrap();
        let replacement = vec![Post::new("b", "new", None)];
        s.save_posts(&replacement).await.unwrap();

        assert_eq!(s.load_posts().await.unwrap(), replacement);
        // No stray temp file left behind.
        assert!(!dir.path().join("posts.json.tmp").exists());
    }
}
