//! Content recommendation engine
//!
//! `profile`, `scorer` and `ranker` are pure and synchronous. This module
//! fetches the snapshots they need from a `ContentStore` and optionally
//! memoizes the results in Redis.

pub mod profile;
pub mod ranker;
pub mod scorer;

use std::sync::Arc;
use std::time::Instant;

use crate::{
    cached,
    db::{Cache, CacheKey, ContentStore},
    error::{AppError, AppResult},
    models::{ContentId, UserId},
};

pub use profile::InterestProfile;
pub use ranker::{DEFAULT_PERSONALIZED_LIMIT, DEFAULT_SIMILAR_LIMIT};

/// Ranks content for users and for reference items
pub struct RecommendationService {
    store: Arc<dyn ContentStore>,
    cache: Option<Cache>,
    cache_ttl: u64,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn ContentStore>, cache: Option<Cache>, cache_ttl: u64) -> Self {
        Self {
            store,
            cache,
            cache_ttl,
        }
    }

    /// Personalized recommendations for a user, best first
    pub async fn recommend_for_user(&self, user_id: UserId, limit: usize) -> AppResult<Vec<ContentId>> {
        match &self.cache {
            Some(cache) => {
                let key = CacheKey::UserRecommendations { user_id, limit };
                cached!(cache, key, self.cache_ttl, self.compute_for_user(user_id, limit))
            }
            None => self.compute_for_user(user_id, limit).await,
        }
    }

    /// Items most similar to `post_id`, best first
    ///
    /// Fails with `NotFound` when the reference item does not exist.
    pub async fn similar_items(&self, post_id: &str, limit: usize) -> AppResult<Vec<ContentId>> {
        match &self.cache {
            Some(cache) => {
                let key = CacheKey::SimilarItems {
                    post_id: post_id.to_string(),
                    limit,
                };
                cached!(cache, key, self.cache_ttl, self.compute_similar(post_id, limit))
            }
            None => self.compute_similar(post_id, limit).await,
        }
    }

    async fn compute_for_user(&self, user_id: UserId, limit: usize) -> AppResult<Vec<ContentId>> {
        let start = Instant::now();

        let engagements = self.store.fetch_engagements(user_id).await?;

        if engagements.is_empty() {
            let candidates = self.store.fetch_published_candidates(&[]).await?;
            let ranked = ranker::rank_by_popularity(&candidates, limit);

            tracing::info!(
                user_id,
                returned = ranked.len(),
                store = self.store.name(),
                "No engagement history, served popular items"
            );

            return Ok(ranked);
        }

        let interests = self.store.fetch_declared_interests(user_id).await?;
        let profile = InterestProfile::from_engagements(&engagements, interests.as_deref());

        let candidates = self
            .store
            .fetch_published_candidates(&profile.excluded_ids())
            .await?;

        let ranked = ranker::rank_personalized(&profile, &candidates, limit);

        tracing::info!(
            user_id,
            engagements = engagements.len(),
            profile_tags = profile.tags.len(),
            candidates = candidates.len(),
            returned = ranked.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Personalized recommendations computed"
        );

        Ok(ranked)
    }

    async fn compute_similar(&self, post_id: &str, limit: usize) -> AppResult<Vec<ContentId>> {
        let reference = self
            .store
            .fetch_candidate(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post_id)))?;

        let profile = InterestProfile::for_item(&reference);
        let candidates = self
            .store
            .fetch_published_candidates(&profile.excluded_ids())
            .await?;

        let ranked = ranker::rank_similar(&profile, &candidates, limit);

        tracing::info!(
            post_id = %post_id,
            candidates = candidates.len(),
            returned = ranked.len(),
            "Similar items computed"
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockContentStore;
    use crate::models::{Candidate, EngagedItem};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn service(store: MockContentStore) -> RecommendationService {
        RecommendationService::new(Arc::new(store), None, 60)
    }

    #[tokio::test]
    async fn test_no_engagement_skips_profile_and_uses_popularity() {
        let mut store = MockContentStore::new();
        store
            .expect_fetch_engagements()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(vec![]));
        store.expect_fetch_declared_interests().times(0);
        store
            .expect_fetch_published_candidates()
            .withf(|exclude| exclude.is_empty())
            .times(1)
            .returning(|_| {
                Ok(vec![
                    Candidate::new("a").with_counts(5, 10),
                    Candidate::new("b").with_counts(5, 20),
                    Candidate::new("c").with_counts(1, 1),
                ])
            });
        store.expect_name().return_const("mock");

        let ranked = service(store).recommend_for_user(7, 2).await;
        let ranked = assert_ok!(ranked);
        assert_eq!(ranked, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_engaged_items_are_excluded_from_candidate_query() {
        let mut store = MockContentStore::new();
        store.expect_fetch_engagements().returning(|_| {
            Ok(vec![EngagedItem {
                content_id: "liked".to_string(),
                category_id: Some(1),
                tag_names: vec!["python".to_string()],
            }])
        });
        store
            .expect_fetch_declared_interests()
            .returning(|_| Ok(Some("ai".to_string())));
        store
            .expect_fetch_published_candidates()
            .withf(|exclude| exclude.len() == 1 && exclude[0] == "liked")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    Candidate::new("ai-post").with_tags(["ai"]),
                    Candidate::new("py-post").with_tags(["python"]).with_category(1),
                    Candidate::new("filler"),
                ])
            });
        store.expect_name().return_const("mock");

        let ranked = assert_ok!(service(store).recommend_for_user(1, 3).await);
        assert_eq!(ranked, vec!["py-post", "ai-post", "filler"]);
    }

    #[tokio::test]
    async fn test_similar_items_unknown_reference_is_not_found() {
        let mut store = MockContentStore::new();
        store.expect_fetch_candidate().returning(|_| Ok(None));
        store.expect_fetch_published_candidates().times(0);

        let result = service(store).similar_items("missing", 10).await;
        let err = assert_err!(result);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_similar_items_excludes_reference() {
        let mut store = MockContentStore::new();
        store
            .expect_fetch_candidate()
            .withf(|post_id| post_id == "ref")
            .returning(|_| Ok(Some(Candidate::new("ref").with_tags(["rust"]).with_category(2))));
        store
            .expect_fetch_published_candidates()
            .withf(|exclude| exclude.len() == 1 && exclude[0] == "ref")
            .returning(|_| {
                Ok(vec![
                    Candidate::new("cousin").with_tags(["rust", "wasm"]),
                    Candidate::new("sibling").with_tags(["rust"]).with_category(2),
                    Candidate::new("stranger"),
                ])
            });

        let ranked = assert_ok!(service(store).similar_items("ref", 10).await);
        assert_eq!(ranked, vec!["sibling", "cousin"]);
    }

    #[tokio::test]
    async fn test_unreachable_cache_falls_back_to_store() {
        let mut store = MockContentStore::new();
        store
            .expect_fetch_candidate()
            .returning(|_| Ok(Some(Candidate::new("ref").with_tags(["rust"]))));
        store
            .expect_fetch_published_candidates()
            .returning(|_| Ok(vec![Candidate::new("twin").with_tags(["rust"])]));

        // Nothing listens on port 1, so every cache read fails to connect
        let client = crate::db::create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _writer) = Cache::new(client).await;
        let service = RecommendationService::new(Arc::new(store), Some(cache), 60);

        let ranked = assert_ok!(service.similar_items("ref", 10).await);
        assert_eq!(ranked, vec!["twin"]);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut store = MockContentStore::new();
        store
            .expect_fetch_engagements()
            .returning(|_| Err(AppError::Internal("connection reset".to_string())));

        let result = service(store).recommend_for_user(1, 5).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
