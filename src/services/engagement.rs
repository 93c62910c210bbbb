use std::sync::Arc;

use crate::{
    db::ContentStore,
    error::AppResult,
    models::{LikeStatus, UserId},
};

/// Which way a like request should move the like record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
    Toggle,
}

/// Applies a like, unlike or toggle for a user on a post
///
/// Delegates to the store, which enforces one like per (user, post) pair.
pub async fn apply_like(
    store: Arc<dyn ContentStore>,
    user_id: UserId,
    post_id: &str,
    action: LikeAction,
) -> AppResult<LikeStatus> {
    let status = match action {
        LikeAction::Like => store.like(user_id, post_id).await?,
        LikeAction::Unlike => store.unlike(user_id, post_id).await?,
        LikeAction::Toggle => store.toggle_like(user_id, post_id).await?,
    };

    tracing::info!(
        user_id,
        post_id = %post_id,
        action = ?action,
        liked = status.liked,
        changed = status.changed,
        "Like updated"
    );

    Ok(status)
}
