//! # FeedError
//!
//! Centralized error handling for the Warble ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;
use uuid::Uuid;

/// The primary error type for all wb-core operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// An existing durable document could not be parsed. Fatal to
    /// startup of that collection; never silently replaced with empty
    /// state (that would be data loss).
    #[error("corrupt store document {document}: {reason}")]
    CorruptStore { document: String, reason: String },

    /// I/O failure while reading or writing a durable document.
    /// A command whose save fails must not report success.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// An image payload is malformed. Absorbed inside the imaging
    /// layer by substituting a placeholder; cosmetic, not fatal.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// Registration attempted with a handle that already exists.
    #[error("handle already registered: {0}")]
    DuplicateHandle(String),

    /// Post creation referenced a handle with no registered user.
    #[error("unknown author handle: {0}")]
    UnknownAuthor(String),

    /// A like or reply targeted a post id that does not exist.
    #[error("post not found: {0}")]
    PostNotFound(Uuid),

    /// Command-level input validation failure (e.g., empty text).
    #[error("validation error: {0}")]
    Validation(String),
}

/// A specialized Result type for Warble logic.
pub type Result<T> = std::result::Result<T, FeedError>;
