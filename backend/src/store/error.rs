use std::time::Duration;

use deadpool_redis::PoolError;
use redis::RedisError;
use thiserror::Error;

/// Every variant means the store could not be reached in time; callers
/// treat them alike and may retry.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store Timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("DeadPool Redis Error: {0}")]
    Pool(#[from] PoolError),

    #[error("Redis Error: {0}")]
    Redis(#[from] RedisError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
