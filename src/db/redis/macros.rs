/// Memoizes an async computation in Redis.
///
/// Returns the cached value when the key is present. Otherwise awaits the
/// block, queues the result for a background write with the given TTL, and
/// returns it. A failed cache read is logged and treated as a miss, so only
/// the block's own errors reach the caller. Must be used inside a function
/// returning `AppResult`.
///
/// # Arguments
/// * `$cache`: anything with `get_from_cache` and `set_in_background`.
/// * `$key`: the `CacheKey` to read and write.
/// * `$ttl`: time-to-live in seconds.
/// * `$block`: future producing `AppResult<T>` on a miss.
///
/// # Example
/// ```rust,ignore
/// let ids = cached!(cache, key, 60, async move {
///     compute_recommendations().await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        match $cache.get_from_cache(&$key).await {
            Ok(Some(cached)) => Ok(cached),
            lookup => {
                if let Err(e) = lookup {
                    tracing::warn!(key = %$key, error = %e, "Cache read failed, computing fresh");
                }
                let value = $block.await?;
                $cache.set_in_background(&$key, &value, $ttl);
                Ok(value)
            }
        }
    }};
}
