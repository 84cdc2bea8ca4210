//! Storage traits for posts and the hashtag vocabulary, plus their errors.

use crate::post::Post;
use thiserror::Error;
use wearlog_core::{DatabaseError, RusqliteErrorExt};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Post not found: {0}")]
    NotFound(i64),

    /// Rejected input (e.g. empty hashtag, post without tags).
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.into_database_error())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for submitted posts.
pub trait PostRepository: Send + Sync {
    /// Persist a post. Callers treat this as fire-and-forget.
    fn save_post(&self, post: Post) -> StoreResult<()>;

    /// All posts, newest first.
    fn list_posts(&self) -> StoreResult<Vec<Post>>;

    /// Posts for one user, newest first.
    fn list_posts_for_user(&self, user_id: &str) -> StoreResult<Vec<Post>> {
        Ok(self
            .list_posts()?
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect())
    }

    fn get_post(&self, id: i64) -> StoreResult<Option<Post>>;

    /// # Errors
    /// Returns `StoreError::NotFound` if the post doesn't exist.
    fn delete_post(&self, id: i64) -> StoreResult<()>;

    fn count(&self) -> StoreResult<usize>;
}

/// Shared vocabulary of clothing tags.
pub trait HashtagRepository: Send + Sync {
    /// Known tags, sorted.
    fn list_hashtags(&self) -> StoreResult<Vec<String>>;

    /// Record a tag; adding a known tag is a no-op.
    fn add_hashtag(&self, tag: &str) -> StoreResult<()>;

    fn contains(&self, tag: &str) -> StoreResult<bool> {
        Ok(self.list_hashtags()?.iter().any(|t| t == tag))
    }
}

/// Maximum hashtag length in characters.
pub const MAX_HASHTAG_LENGTH: usize = 30;

/// Validate an already-normalized hashtag.
///
/// # Errors
/// Returns `StoreError::Validation` if the tag is empty, contains whitespace
/// or exceeds `MAX_HASHTAG_LENGTH` characters.
pub fn validate_hashtag(tag: &str) -> StoreResult<()> {
    if tag.is_empty() {
        return Err(StoreError::validation("Hashtag cannot be empty"));
    }

    if tag.chars().any(char::is_whitespace) {
        return Err(StoreError::validation("Hashtag cannot contain whitespace"));
    }

    if tag.chars().count() > MAX_HASHTAG_LENGTH {
        return Err(StoreError::validation(format!(
            "Hashtag exceeds maximum length of {} characters",
            MAX_HASHTAG_LENGTH
        )));
    }

    Ok(())
}
