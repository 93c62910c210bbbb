use std::collections::HashSet;

use crate::models::{Candidate, CategoryId, ContentId, EngagedItem};

/// Tag and category affinity derived from what a user has engaged with
///
/// Never persisted; rebuilt for every ranking request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterestProfile {
    /// Tag names of engaged items plus declared interests
    pub tags: HashSet<String>,
    /// One entry per engaged item that has a category, so repeats add weight
    pub categories: Vec<CategoryId>,
    /// Items that must never be ranked back to this profile
    pub excluded: HashSet<ContentId>,
}

impl InterestProfile {
    /// Profile with no engagement signal at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a user's profile from their liked items and declared interests
    ///
    /// With no engagement the result is the empty profile and declared
    /// interests are ignored: such users are served by popularity alone.
    pub fn from_engagements(engagements: &[EngagedItem], declared_interests: Option<&str>) -> Self {
        if engagements.is_empty() {
            return Self::empty();
        }

        let mut profile = Self::empty();

        for engaged in engagements {
            if let Some(category_id) = engaged.category_id {
                profile.categories.push(category_id);
            }
            profile.tags.extend(engaged.tag_names.iter().cloned());
            profile.excluded.insert(engaged.content_id.clone());
        }

        if let Some(raw) = declared_interests.filter(|raw| !raw.is_empty()) {
            profile.tags.extend(parse_interests(raw).map(str::to_string));
        }

        profile
    }

    /// Profile describing a single reference item, for "more like this"
    ///
    /// The category list has at most one entry, so category affinity is
    /// either full or absent. The reference item itself is excluded.
    pub fn for_item(reference: &Candidate) -> Self {
        Self {
            tags: reference.tag_names.iter().cloned().collect(),
            categories: reference.category_id.into_iter().collect(),
            excluded: HashSet::from([reference.id.clone()]),
        }
    }

    /// True when there is no engagement to learn from
    pub fn is_empty(&self) -> bool {
        self.excluded.is_empty()
    }

    /// Excluded ids in a form suitable for a storage query
    pub fn excluded_ids(&self) -> Vec<ContentId> {
        let mut ids: Vec<ContentId> = self.excluded.iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// Splits a comma-separated interest string, trimming whitespace
///
/// Case is kept as written. Blank entries (from `"a,,b"` or a trailing comma)
/// survive as `""` and take part in tag matching like any other tag.
pub fn parse_interests(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim)
}
