pub mod memory;
pub mod postgres;
pub mod redis;
mod store;

pub use memory::MemoryContentStore;
pub use postgres::{create_pool, run_migrations, PgContentStore};
pub use self::redis::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
pub use store::ContentStore;

#[cfg(test)]
pub use store::MockContentStore;
