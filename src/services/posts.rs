use std::sync::Arc;

use crate::{
    db::ContentStore,
    error::AppResult,
    models::ContentItem,
};

/// Reads a post for display, counting the view
pub async fn view_post(store: Arc<dyn ContentStore>, post_id: &str) -> AppResult<ContentItem> {
    let item = store.view_item(post_id).await?;
    tracing::debug!(post_id = %post_id, views = item.view_count, "Post viewed");
    Ok(item)
}

/// Publishes or withdraws a post
///
/// Unpublished posts drop out of every ranking on the next uncached request.
pub async fn set_published(
    store: Arc<dyn ContentStore>,
    post_id: &str,
    is_published: bool,
) -> AppResult<ContentItem> {
    store.set_published(post_id, is_published).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockContentStore;
    use crate::error::AppError;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn test_view_post_unknown() {
        let mut store = MockContentStore::new();
        store
            .expect_view_item()
            .returning(|id| Err(AppError::NotFound(format!("post {}", id))));

        let err = assert_err!(view_post(Arc::new(store), "nope").await);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_set_published_forwards_flag() {
        let mut store = MockContentStore::new();
        store
            .expect_set_published()
            .withf(|post_id, is_published| post_id == "p" && !*is_published)
            .times(1)
            .returning(|_, _| Err(AppError::NotFound("post p".to_string())));

        let result = set_published(Arc::new(store), "p", false).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
