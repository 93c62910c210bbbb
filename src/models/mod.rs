mod content;
mod engagement;

pub use content::{Candidate, ContentItem};
pub use engagement::{EngagedItem, LikeStatus};

/// Identifier of a post (short random string)
pub type ContentId = String;

/// Identifier of a registered user
pub type UserId = i64;

/// Identifier of a category
pub type CategoryId = i64;
