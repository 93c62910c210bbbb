//! Content storage abstraction
//!
//! The ranking engine never touches a database directly. Everything it reads
//! arrives through this trait as plain snapshot records, so the same service
//! runs against Postgres in production and an in-process store in tests.

use crate::{
    error::AppResult,
    models::{Candidate, ContentId, ContentItem, EngagedItem, LikeStatus, UserId},
};

/// Trait for content stores
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Every item the user has liked, oldest like first
    async fn fetch_engagements(&self, user_id: UserId) -> AppResult<Vec<EngagedItem>>;

    /// The user's declared interests as a comma-separated string, if any
    async fn fetch_declared_interests(&self, user_id: UserId) -> AppResult<Option<String>>;

    /// All published items except `exclude_ids`, newest first
    async fn fetch_published_candidates(&self, exclude_ids: &[ContentId]) -> AppResult<Vec<Candidate>>;

    /// Snapshot of a single item regardless of publish state
    async fn fetch_candidate(&self, post_id: &str) -> AppResult<Option<Candidate>>;

    /// Increments an item's view counter and returns the updated item
    ///
    /// Fails with `NotFound` for unknown items.
    async fn view_item(&self, post_id: &str) -> AppResult<ContentItem>;

    /// Shows or hides an item from ranking and returns the updated item
    ///
    /// Fails with `NotFound` for unknown items.
    async fn set_published(&self, post_id: &str, is_published: bool) -> AppResult<ContentItem>;

    /// Records a like; liking twice is a no-op
    async fn like(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus>;

    /// Removes a like if present
    async fn unlike(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus>;

    /// Flips whether the user likes the item
    async fn toggle_like(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus>;

    /// Store name for logging
    fn name(&self) -> &'static str;
}
