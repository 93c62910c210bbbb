use std::collections::HashSet;

use crate::models::{Candidate, CategoryId};

const TAG_WEIGHT: f64 = 10.0;
const CATEGORY_WEIGHT: f64 = 5.0;
const LIKE_WEIGHT: f64 = 0.5;
const VIEW_WEIGHT: f64 = 0.3;

/// Per-signal contribution to a candidate's affinity score
///
/// Each field already has its weight applied. Keeping the terms apart lets
/// callers log why an item ranked where it did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub tag_similarity: f64,
    pub category_affinity: f64,
    pub social_proof: f64,
    pub popularity: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms, always added in the same order
    pub fn total(&self) -> f64 {
        self.tag_similarity + self.category_affinity + self.social_proof + self.popularity
    }
}

/// Jaccard index of two tag sets: |A ∩ B| / |A ∪ B|, or 0 when both are empty
pub fn jaccard_index(left: &HashSet<&str>, right: &HashSet<&str>) -> f64 {
    let intersection = left.intersection(right).count();
    let union = left.len() + right.len() - intersection;

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Share of the profile's category history taken by `category_id`
///
/// Repeated categories in the history weigh more. Returns 0 when the
/// candidate has no category or the history never mentions it.
pub fn category_affinity(category_id: Option<CategoryId>, profile_categories: &[CategoryId]) -> f64 {
    let Some(category_id) = category_id else {
        return 0.0;
    };

    let occurrences = profile_categories
        .iter()
        .filter(|&&c| c == category_id)
        .count();

    if occurrences == 0 {
        return 0.0;
    }

    occurrences as f64 / profile_categories.len() as f64
}

/// Computes the weighted terms for one candidate against a profile
pub fn score_breakdown(
    candidate: &Candidate,
    profile_tags: &HashSet<String>,
    profile_categories: &[CategoryId],
) -> ScoreBreakdown {
    let candidate_tags: HashSet<&str> = candidate.tag_names.iter().map(String::as_str).collect();
    let profile_tags: HashSet<&str> = profile_tags.iter().map(String::as_str).collect();

    ScoreBreakdown {
        tag_similarity: jaccard_index(&candidate_tags, &profile_tags) * TAG_WEIGHT,
        category_affinity: category_affinity(candidate.category_id, profile_categories)
            * CATEGORY_WEIGHT,
        social_proof: (candidate.like_count as f64).ln_1p() * LIKE_WEIGHT,
        popularity: (candidate.view_count as f64).ln_1p() * VIEW_WEIGHT,
    }
}

/// Affinity score of a candidate for a profile; never negative
pub fn similarity_score(
    candidate: &Candidate,
    profile_tags: &HashSet<String>,
    profile_categories: &[CategoryId],
) -> f64 {
    score_breakdown(candidate, profile_tags, profile_categories).total()
}
