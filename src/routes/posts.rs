use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ContentId, ContentItem},
    routes::AppState,
    services::posts,
};

/// Handler for reading a post; each read counts as a view
pub async fn view(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<ContentId>,
) -> AppResult<Json<ContentItem>> {
    let item = posts::view_post(state.store.clone(), &post_id).await?;
    Ok(Json(item))
}

/// Handler for making a post visible to ranking
pub async fn publish(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<ContentId>,
) -> AppResult<Json<ContentItem>> {
    let item = posts::set_published(state.store.clone(), &post_id, true).await?;
    Ok(Json(item))
}

/// Handler for withdrawing a post from ranking
pub async fn unpublish(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<ContentId>,
) -> AppResult<Json<ContentItem>> {
    let item = posts::set_published(state.store.clone(), &post_id, false).await?;
    Ok(Json(item))
}
