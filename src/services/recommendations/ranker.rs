use std::collections::HashSet;

use crate::models::{Candidate, ContentId};

use super::profile::InterestProfile;
use super::scorer::similarity_score;

/// Page size for personalized recommendations when the caller gives none
pub const DEFAULT_PERSONALIZED_LIMIT: usize = 20;

/// Page size for "more like this" when the caller gives none
pub const DEFAULT_SIMILAR_LIMIT: usize = 10;

/// Orders candidates by like count, then view count, both descending
///
/// The sort is stable, so retrieval order decides any remaining ties.
pub fn popularity_order(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| {
        b.like_count
            .cmp(&a.like_count)
            .then_with(|| b.view_count.cmp(&a.view_count))
    });
    ordered
}

/// Top `limit` candidates by popularity alone
pub fn rank_by_popularity(candidates: &[Candidate], limit: usize) -> Vec<ContentId> {
    popularity_order(candidates)
        .into_iter()
        .take(limit)
        .map(|c| c.id.clone())
        .collect()
}

/// Scores candidates against a profile and keeps the best `limit`
///
/// Candidates with no signal (score of exactly 0) are dropped rather than
/// ranked last, as are any the profile excludes. Equal scores keep their
/// retrieval order.
pub fn rank_scored(profile: &InterestProfile, candidates: &[Candidate], limit: usize) -> Vec<ContentId> {
    let mut scored: Vec<(&Candidate, f64)> = candidates
        .iter()
        .filter(|c| !profile.excluded.contains(&c.id))
        .map(|c| (c, similarity_score(c, &profile.tags, &profile.categories)))
        .filter(|(_, score)| *score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(
        candidates = candidates.len(),
        scored = scored.len(),
        limit,
        "Scored candidates"
    );

    scored
        .into_iter()
        .take(limit)
        .map(|(c, _)| c.id.clone())
        .collect()
}

/// Personalized ranking for a user's profile
///
/// An empty profile falls straight through to popularity. Otherwise the
/// scored list is topped up with popular items the user has not engaged
/// with until `limit` is reached or candidates run out.
pub fn rank_personalized(
    profile: &InterestProfile,
    candidates: &[Candidate],
    limit: usize,
) -> Vec<ContentId> {
    if profile.is_empty() {
        return rank_by_popularity(candidates, limit);
    }

    let mut ranked = rank_scored(profile, candidates, limit);

    if ranked.len() < limit {
        let selected: HashSet<ContentId> = ranked.iter().cloned().collect();
        let backfill: Vec<ContentId> = popularity_order(candidates)
            .into_iter()
            .filter(|c| !profile.excluded.contains(&c.id) && !selected.contains(&c.id))
            .take(limit - ranked.len())
            .map(|c| c.id.clone())
            .collect();

        tracing::debug!(
            scored = ranked.len(),
            backfilled = backfill.len(),
            "Topped up with popular items"
        );

        ranked.extend(backfill);
    }

    ranked
}

/// Items similar to the one an item profile was built from
///
/// No popularity top-up: only positively scored items are returned, so the
/// result may be shorter than `limit`.
pub fn rank_similar(item_profile: &InterestProfile, candidates: &[Candidate], limit: usize) -> Vec<ContentId> {
    rank_scored(item_profile, candidates, limit)
}
