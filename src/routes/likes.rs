use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{ContentId, LikeStatus, UserId},
    routes::AppState,
    services::engagement::{apply_like, LikeAction},
};

async fn respond(
    state: &AppState,
    user_id: UserId,
    post_id: &str,
    action: LikeAction,
) -> AppResult<(StatusCode, Json<LikeStatus>)> {
    let status = apply_like(state.store.clone(), user_id, post_id, action).await?;

    // 201 only when a like record was just created
    let code = if status.liked && status.changed {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((code, Json(status)))
}

/// Handler for liking a post
pub async fn like(
    State(state): State<Arc<AppState>>,
    Path((user_id, post_id)): Path<(UserId, ContentId)>,
) -> AppResult<(StatusCode, Json<LikeStatus>)> {
    respond(&state, user_id, &post_id, LikeAction::Like).await
}

/// Handler for removing a like
pub async fn unlike(
    State(state): State<Arc<AppState>>,
    Path((user_id, post_id)): Path<(UserId, ContentId)>,
) -> AppResult<(StatusCode, Json<LikeStatus>)> {
    respond(&state, user_id, &post_id, LikeAction::Unlike).await
}

/// Handler for flipping a like
pub async fn toggle(
    State(state): State<Arc<AppState>>,
    Path((user_id, post_id)): Path<(UserId, ContentId)>,
) -> AppResult<(StatusCode, Json<LikeStatus>)> {
    respond(&state, user_id, &post_id, LikeAction::Toggle).await
}
