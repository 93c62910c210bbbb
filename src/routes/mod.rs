use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    db::{Cache, ContentStore, MemoryContentStore},
    error::{AppError, AppResult},
    middleware::{make_span_with_request_id, request_id_middleware},
    services::RecommendationService,
};

pub mod likes;
pub mod posts;
pub mod recommendations;

/// Shared state handed to every handler
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub recommender: RecommendationService,
    pub max_result_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, cache: Option<Cache>, config: &Config) -> Self {
        Self {
            recommender: RecommendationService::new(
                store.clone(),
                cache,
                config.recommendation_cache_ttl,
            ),
            store,
            max_result_limit: config.max_result_limit,
        }
    }

    /// State backed by an in-process store with no Redis cache
    pub fn in_memory(store: MemoryContentStore) -> Self {
        Self::new(Arc::new(store), None, &Config::default())
    }

    /// Applies the default page size and rejects out-of-range limits
    pub fn resolve_limit(&self, requested: Option<usize>, default: usize) -> AppResult<usize> {
        let limit = requested.unwrap_or(default);

        if limit == 0 || limit > self.max_result_limit {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                self.max_result_limit
            )));
        }

        Ok(limit)
    }
}

/// `?limit=` query parameter shared by ranking endpoints
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/users/:user_id/recommendations",
            get(recommendations::for_user),
        )
        .route("/posts/:post_id", get(posts::view))
        .route("/posts/:post_id/similar", get(recommendations::similar))
        .route("/posts/:post_id/publish", post(posts::publish))
        .route("/posts/:post_id/unpublish", post(posts::unpublish))
        .route(
            "/users/:user_id/likes/:post_id",
            post(likes::like).delete(likes::unlike),
        )
        .route("/users/:user_id/likes/:post_id/toggle", post(likes::toggle))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
