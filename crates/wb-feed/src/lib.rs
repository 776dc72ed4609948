//! # wb-feed
//! warble/crates/wb-feed/src/lib.rs
//!
//! The feed store: exclusive owner of the in-memory Users map and
//! Posts sequence. All mutations and queries go through its methods;
//! the collections are never handed out as raw mutable state.
//!
//! Concurrency discipline: one `RwLock` per collection. A mutation
//! holds its collection's write lock across the in-memory update and
//! the durable save, so concurrent mutations on the same collection
//! serialize (no lost like-increments) and a command never reports
//! success before its document is durable. Each mutation applies its
//! change to a clone and only commits the clone after the save
//! succeeds — a failed save leaves memory and disk unchanged.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use wb_core::error::{FeedError, Result};
use wb_core::models::{Post, Reply, User};
use wb_core::traits::FeedStateStore;

pub struct FeedStore {
    users: RwLock<HashMap<String, User>>,
    posts: RwLock<Vec<Post>>,
    store: Arc<dyn FeedStateStore>,
}

impl std::fmt::Debug for FeedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedStore")
            .field("users", &self.users)
            .field("posts", &self.posts)
            .finish_non_exhaustive()
    }
}

impl FeedStore {
    /// Loads both collections from the durable documents. A corrupt
    /// document fails startup of the store; it is not reset to empty.
    pub async fn open(store: Arc<dyn FeedStateStore>) -> Result<Self> {
        let users = store.load_users().await?;
        let posts = store.load_posts().await?;
        log::info!("feed store opened: {} users, {} posts", users.len(), posts.len());
        Ok(Self {
            users: RwLock::new(users),
            posts: RwLock::new(posts),
            store,
        })
    }

    /// Registers a new user keyed by `handle`.
    ///
    /// Rejects an already-registered handle with `DuplicateHandle`,
    /// leaving the existing profile untouched. Handles are immutable
    /// once created.
    pub async fn register_user(
        &self,
        display_name: &str,
        handle: &str,
        icon: String,
    ) -> Result<User> {
        let display_name = display_name.trim();
        let handle = handle.trim();
        if display_name.is_empty() {
            return Err(FeedError::Validation("display name must not be empty".into()));
        }
        if handle.is_empty() {
            return Err(FeedError::Validation("handle must not be empty".into()));
        }

        let mut users = self.users.write().await;
        if users.contains_key(handle) {
            return Err(FeedError::DuplicateHandle(handle.to_string()));
        }

        let user = User::new(display_name, handle, icon);
        let mut next = users.clone();
        next.insert(handle.to_string(), user.clone());
        self.store.save_users(&next).await?;
        *users = next;

        log::info!("registered user {}", user.display_handle);
        Ok(user)
    }

    /// Creates a post and prepends it to the feed (newest-first order
    /// is established here and never re-sorted on read).
    pub async fn create_post(
        &self,
        author_handle: &str,
        text: &str,
        image: Option<String>,
    ) -> Result<Post> {
        if text.trim().is_empty() {
            return Err(FeedError::Validation("post text must not be empty".into()));
        }
        {
            let users = self.users.read().await;
            if !users.contains_key(author_handle) {
                return Err(FeedError::UnknownAuthor(author_handle.to_string()));
            }
        }

        let post = Post::new(author_handle, text, image);
        let mut posts = self.posts.write().await;
        let mut next = posts.clone();
        next.insert(0, post.clone());
        self.store.save_posts(&next).await?;
        *posts = next;

        Ok(post)
    }

    /// Increments a post's like counter by exactly one and returns the
    /// new count. Serialized against all other Posts mutations by the
    /// write lock, so N concurrent likes yield a count of N.
    pub async fn like_post(&self, post_id: Uuid) -> Result<u64> {
        let mut posts = self.posts.write().await;
        let mut next = posts.clone();
        let post = next
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(FeedError::PostNotFound(post_id))?;
        post.like_count += 1;
        let count = post.like_count;

        self.store.save_posts(&next).await?;
        *posts = next;
        Ok(count)
    }

    /// Appends a reply to a post, in arrival order.
    ///
    /// The reply author is a weak reference like `Post::author`; it is
    /// not validated against the Users map and may dangle at render
    /// time.
    pub async fn add_reply(&self, post_id: Uuid, author_handle: &str, text: &str) -> Result<Reply> {
        if text.trim().is_empty() {
            return Err(FeedError::Validation("reply text must not be empty".into()));
        }

        let mut posts = self.posts.write().await;
        let mut next = posts.clone();
        let post = next
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or(FeedError::PostNotFound(post_id))?;
        let reply = Reply::new(author_handle, text);
        post.replies.push(reply.clone());

        self.store.save_posts(&next).await?;
        *posts = next;
        Ok(reply)
    }

    /// Snapshot of the feed in newest-first order.
    pub async fn list_posts(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// Looks up a user's profile. `None` is an expected result — post
    /// authors are weak references — and callers fall back to a
    /// default display identity rather than erroring.
    pub async fn resolve_user(&self, handle: &str) -> Option<User> {
        self.users.read().await.get(handle).cloned()
    }
}
