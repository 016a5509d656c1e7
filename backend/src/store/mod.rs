mod error;
mod in_memory;
mod redis;

pub use error::{Result, StoreError};
pub use in_memory::InMemoryStore;
pub use redis::RedisStore;

use async_trait::async_trait;
use shared::ViewCount;
use std::time::Duration;

/// Key-value store holding view counters and deduplication markers.
///
/// Implementations must make `incr` and `set_if_absent` atomic: concurrent
/// callers are never coordinated by anything but the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Increments the counter at `key` by one, creating it at zero first.
    async fn incr(&self, key: &str) -> Result<ViewCount>;
    /// Creates `key` with the given expiry unless it already exists.
    /// Returns `true` only for the caller that created it.
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Result<bool>;
    async fn get(&self, key: &str) -> Result<Option<ViewCount>>;
    /// Values are returned in the order of `keys`.
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<ViewCount>>>;
}
