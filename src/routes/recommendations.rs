use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{ContentId, UserId},
    routes::{AppState, LimitQuery},
    services::recommendations::{DEFAULT_PERSONALIZED_LIMIT, DEFAULT_SIMILAR_LIMIT},
};

#[derive(Debug, Serialize)]
pub struct RankedItemsResponse {
    pub items: Vec<ContentId>,
}

/// Handler for personalized recommendations
pub async fn for_user(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RankedItemsResponse>> {
    let limit = state.resolve_limit(query.limit, DEFAULT_PERSONALIZED_LIMIT)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        limit,
        "Processing recommendation request"
    );

    let items = state.recommender.recommend_for_user(user_id, limit).await?;

    Ok(Json(RankedItemsResponse { items }))
}

/// Handler for "more like this"
pub async fn similar(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(post_id): Path<ContentId>,
    Query(query): Query<LimitQuery>,
) -> AppResult<Json<RankedItemsResponse>> {
    let limit = state.resolve_limit(query.limit, DEFAULT_SIMILAR_LIMIT)?;

    tracing::info!(
        request_id = %request_id,
        post_id = %post_id,
        limit,
        "Processing similar items request"
    );

    let items = state.recommender.similar_items(&post_id, limit).await?;

    Ok(Json(RankedItemsResponse { items }))
}
