use std::sync::Arc;

use affinity_api::{
    config::Config,
    db::{self, Cache, ContentStore, MemoryContentStore, PgContentStore},
    routes::{create_router, AppState},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "affinity_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn ContentStore> = if config.use_memory_store {
        tracing::warn!("Using in-memory content store; data is lost on restart");
        Arc::new(MemoryContentStore::new())
    } else {
        let pool = db::create_pool(&config.database_url).await?;
        db::run_migrations(&pool).await?;
        Arc::new(PgContentStore::new(pool))
    };

    let (cache, cache_writer) = if config.cache_enabled {
        let client = db::create_redis_client(&config.redis_url)?;
        let (cache, handle) = Cache::new(client).await;
        (Some(cache), Some(handle))
    } else {
        (None, None)
    };

    tracing::info!(
        store = store.name(),
        cache_enabled = config.cache_enabled,
        cache_ttl = config.recommendation_cache_ttl,
        "Initialized application state"
    );

    let app = create_router(AppState::new(store, cache, &config));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
