use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, ContentId};

/// A published or draft post as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentItem {
    pub id: ContentId,
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub category_id: Option<CategoryId>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub view_count: u64,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of a post as seen by the ranking engine
///
/// Carries only the fields the scorer reads. Built by a `ContentStore` from
/// whatever backing storage is in use; never a live database handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: ContentId,
    pub category_id: Option<CategoryId>,
    pub tag_names: Vec<String>,
    pub like_count: u64,
    pub view_count: u64,
}

impl Candidate {
    pub fn new(id: impl Into<ContentId>) -> Self {
        Self {
            id: id.into(),
            category_id: None,
            tag_names: Vec::new(),
            like_count: 0,
            view_count: 0,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_names = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_counts(mut self, like_count: u64, view_count: u64) -> Self {
        self.like_count = like_count;
        self.view_count = view_count;
        self
    }
}

impl From<&ContentItem> for Candidate {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            category_id: item.category_id,
            tag_names: item.tags.clone(),
            like_count: item.like_count,
            view_count: item.view_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let candidate = Candidate::new("p1")
            .with_category(3)
            .with_tags(["rust", "web"])
            .with_counts(4, 40);

        assert_eq!(candidate.id, "p1");
        assert_eq!(candidate.category_id, Some(3));
        assert_eq!(candidate.tag_names, vec!["rust", "web"]);
        assert_eq!(candidate.like_count, 4);
        assert_eq!(candidate.view_count, 40);
    }

    #[test]
    fn test_candidate_from_content_item() {
        let item = ContentItem {
            id: "p2".to_string(),
            author_id: 7,
            title: "Hello".to_string(),
            body: "World".to_string(),
            category_id: None,
            tags: vec!["intro".to_string()],
            is_published: true,
            view_count: 12,
            like_count: 1,
            created_at: Utc::now(),
        };

        let candidate = Candidate::from(&item);
        assert_eq!(candidate.id, "p2");
        assert_eq!(candidate.category_id, None);
        assert_eq!(candidate.tag_names, vec!["intro"]);
        assert_eq!(candidate.like_count, 1);
        assert_eq!(candidate.view_count, 12);
    }
}
