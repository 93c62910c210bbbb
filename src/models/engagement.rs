use serde::{Deserialize, Serialize};

use super::{CategoryId, ContentId, UserId};

/// A post the user has liked, flattened to what profile extraction reads
#[derive(Debug, Clone, PartialEq)]
pub struct EngagedItem {
    pub content_id: ContentId,
    pub category_id: Option<CategoryId>,
    pub tag_names: Vec<String>,
}

/// Outcome of a like/unlike/toggle request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LikeStatus {
    pub user_id: UserId,
    pub post_id: ContentId,
    /// Whether the like exists after the operation
    pub liked: bool,
    /// Whether the operation created or removed a record
    pub changed: bool,
}
