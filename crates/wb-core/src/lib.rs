//! warble/crates/wb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Warble.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;

    #[test]
    fn test_post_creation_v7() {
        let post = Post::new("alice", "Hello Rust!", None);
        assert_eq!(post.author, "alice");
        assert_eq!(post.like_count, 0);
        assert!(post.replies.is_empty());
        assert!(post.image.is_none());
    }

    #[test]
    fn test_post_ids_unique_under_rapid_creation() {
        let ids: Vec<_> = (0..1000).map(|_| Post::new("a", "x", None).id).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_user_display_handle_prefixed() {
        let user = User::new("Alice", "alice", "aWNvbg==".to_string());
        assert_eq!(user.handle, "alice");
        assert_eq!(user.display_handle, "@alice");
    }

    #[test]
    fn test_post_serde_round_trip() {
        let mut post = Post::new("bob", "こんにちは、世界", None);
        post.replies.push(Reply::new("alice", "やあ"));
        post.like_count = 3;

        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
        // Non-ASCII text must survive serialization unescaped in meaning.
        assert!(json.contains("こんにちは、世界"));
    }

    #[test]
    fn test_post_optional_fields_default_on_deserialize() {
        // Older documents may predate like_count/replies fields.
        let json = format!(
            r#"{{"id":"{}","author":"a","text":"t","created_at":"2026-01-02T03:04:05Z"}}"#,
            uuid::Uuid::now_v7()
        );
        let post: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post.like_count, 0);
        assert!(post.replies.is_empty());
        assert_eq!(post.display_time(), "2026-01-02 03:04");
    }
}
