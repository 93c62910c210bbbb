use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    db::ContentStore,
    error::{AppError, AppResult},
    models::{Candidate, ContentId, ContentItem, EngagedItem, LikeStatus, UserId},
};

/// In-process content store
///
/// Items are kept in insertion order and the most recently inserted item is
/// treated as the newest, mirroring the `created_at DESC` retrieval order of
/// the Postgres store. Like counts are always derived from like records.
#[derive(Clone, Default)]
pub struct MemoryContentStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    items: Vec<ContentItem>,
    /// (user, post) pairs in the order they were liked
    likes: Vec<(UserId, ContentId)>,
    interests: HashMap<UserId, String>,
}

impl MemoryStoreInner {
    fn position(&self, post_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == post_id)
    }

    fn require(&self, post_id: &str) -> AppResult<usize> {
        self.position(post_id)
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))
    }

    fn like_count(&self, post_id: &str) -> u64 {
        self.likes.iter().filter(|(_, p)| p == post_id).count() as u64
    }

    fn is_liked(&self, user_id: UserId, post_id: &str) -> bool {
        self.likes.iter().any(|(u, p)| *u == user_id && p == post_id)
    }

    fn insert_like(&mut self, user_id: UserId, post_id: &str) -> bool {
        if self.is_liked(user_id, post_id) {
            return false;
        }
        self.likes.push((user_id, post_id.to_string()));
        true
    }

    fn remove_like(&mut self, user_id: UserId, post_id: &str) -> bool {
        let before = self.likes.len();
        self.likes.retain(|(u, p)| !(*u == user_id && p == post_id));
        self.likes.len() != before
    }

    fn snapshot(&self, item: &ContentItem) -> Candidate {
        Candidate {
            like_count: self.like_count(&item.id),
            ..Candidate::from(item)
        }
    }
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an item; its `like_count` field is ignored
    pub async fn insert_item(&self, item: ContentItem) {
        let mut inner = self.inner.write().await;
        match inner.position(&item.id) {
            Some(idx) => inner.items[idx] = item,
            None => inner.items.push(item),
        }
    }

    /// Stores a user's declared interests
    pub async fn set_interests(&self, user_id: UserId, interests: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.interests.insert(user_id, interests.into());
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_engagements(&self, user_id: UserId) -> AppResult<Vec<EngagedItem>> {
        let inner = self.inner.read().await;

        let engagements = inner
            .likes
            .iter()
            .filter(|(u, _)| *u == user_id)
            .filter_map(|(_, post_id)| inner.position(post_id).map(|idx| &inner.items[idx]))
            .map(|item| EngagedItem {
                content_id: item.id.clone(),
                category_id: item.category_id,
                tag_names: item.tags.clone(),
            })
            .collect();

        Ok(engagements)
    }

    async fn fetch_declared_interests(&self, user_id: UserId) -> AppResult<Option<String>> {
        let inner = self.inner.read().await;
        Ok(inner.interests.get(&user_id).cloned())
    }

    async fn fetch_published_candidates(&self, exclude_ids: &[ContentId]) -> AppResult<Vec<Candidate>> {
        let inner = self.inner.read().await;

        let candidates = inner
            .items
            .iter()
            .rev()
            .filter(|item| item.is_published && !exclude_ids.contains(&item.id))
            .map(|item| inner.snapshot(item))
            .collect();

        Ok(candidates)
    }

    async fn fetch_candidate(&self, post_id: &str) -> AppResult<Option<Candidate>> {
        let inner = self.inner.read().await;
        Ok(inner.position(post_id).map(|idx| inner.snapshot(&inner.items[idx])))
    }

    async fn view_item(&self, post_id: &str) -> AppResult<ContentItem> {
        let mut inner = self.inner.write().await;
        let idx = inner.require(post_id)?;
        let like_count = inner.like_count(post_id);

        let item = &mut inner.items[idx];
        item.view_count += 1;

        Ok(ContentItem {
            like_count,
            ..item.clone()
        })
    }

    async fn set_published(&self, post_id: &str, is_published: bool) -> AppResult<ContentItem> {
        let mut inner = self.inner.write().await;
        let idx = inner.require(post_id)?;
        let like_count = inner.like_count(post_id);

        let item = &mut inner.items[idx];
        item.is_published = is_published;

        Ok(ContentItem {
            like_count,
            ..item.clone()
        })
    }

    async fn like(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus> {
        let mut inner = self.inner.write().await;
        inner.require(post_id)?;
        let changed = inner.insert_like(user_id, post_id);

        Ok(LikeStatus {
            user_id,
            post_id: post_id.to_string(),
            liked: true,
            changed,
        })
    }

    async fn unlike(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus> {
        let mut inner = self.inner.write().await;
        inner.require(post_id)?;
        let changed = inner.remove_like(user_id, post_id);

        Ok(LikeStatus {
            user_id,
            post_id: post_id.to_string(),
            liked: false,
            changed,
        })
    }

    async fn toggle_like(&self, user_id: UserId, post_id: &str) -> AppResult<LikeStatus> {
        let mut inner = self.inner.write().await;
        inner.require(post_id)?;

        let liked = if inner.remove_like(user_id, post_id) {
            false
        } else {
            inner.insert_like(user_id, post_id)
        };

        Ok(LikeStatus {
            user_id,
            post_id: post_id.to_string(),
            liked,
            changed: true,
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(id: &str, tags: &[&str], category_id: Option<i64>) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            author_id: 1,
            title: format!("Post {}", id),
            body: String::new(),
            category_id,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            is_published: true,
            view_count: 0,
            like_count: 0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_candidates_are_newest_first_and_published_only() {
        let store = MemoryContentStore::new();
        store.insert_item(post("old", &[], None)).await;
        store.insert_item(post("draft", &[], None)).await;
        store.insert_item(post("new", &[], None)).await;
        store.set_published("draft", false).await.unwrap();

        let ids: Vec<String> = store
            .fetch_published_candidates(&[])
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();

        assert_eq!(ids, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_candidates_honor_exclusions() {
        let store = MemoryContentStore::new();
        store.insert_item(post("a", &[], None)).await;
        store.insert_item(post("b", &[], None)).await;

        let candidates = store
            .fetch_published_candidates(&["b".to_string()])
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "a");
    }

    #[tokio::test]
    async fn test_like_is_unique_per_pair() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p", &[], None)).await;

        let first = store.like(1, "p").await.unwrap();
        let second = store.like(1, "p").await.unwrap();
        store.like(2, "p").await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert!(second.liked);

        let candidate = store.fetch_candidate("p").await.unwrap().unwrap();
        assert_eq!(candidate.like_count, 2);
    }

    #[tokio::test]
    async fn test_unlike_missing_like_is_not_a_change() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p", &[], None)).await;

        let status = store.unlike(1, "p").await.unwrap();
        assert!(!status.liked);
        assert!(!status.changed);
    }

    #[tokio::test]
    async fn test_toggle_flips_existence() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p", &[], None)).await;

        assert!(store.toggle_like(3, "p").await.unwrap().liked);
        assert!(!store.toggle_like(3, "p").await.unwrap().liked);
        assert!(store.fetch_engagements(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_published_round_trip() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p", &[], None)).await;

        let hidden = store.set_published("p", false).await.unwrap();
        assert!(!hidden.is_published);
        assert!(store.fetch_published_candidates(&[]).await.unwrap().is_empty());

        store.set_published("p", true).await.unwrap();
        assert_eq!(store.fetch_published_candidates(&[]).await.unwrap().len(), 1);

        let missing = store.set_published("ghost", true).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_like_unknown_post_is_not_found() {
        let store = MemoryContentStore::new();
        let result = store.like(1, "ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_view_item_increments_views() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p", &["rust"], Some(2))).await;

        store.view_item("p").await.unwrap();
        let item = store.view_item("p").await.unwrap();

        assert_eq!(item.view_count, 2);
        assert_eq!(item.tags, vec!["rust"]);
    }

    #[tokio::test]
    async fn test_engagements_carry_tags_and_category() {
        let store = MemoryContentStore::new();
        store.insert_item(post("p1", &["rust", "web"], Some(4))).await;
        store.insert_item(post("p2", &[], None)).await;
        store.like(9, "p1").await.unwrap();
        store.like(9, "p2").await.unwrap();

        let engagements = store.fetch_engagements(9).await.unwrap();

        assert_eq!(engagements.len(), 2);
        assert_eq!(engagements[0].content_id, "p1");
        assert_eq!(engagements[0].category_id, Some(4));
        assert_eq!(engagements[0].tag_names, vec!["rust", "web"]);
        assert_eq!(engagements[1].category_id, None);
    }
}
