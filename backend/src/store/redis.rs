use super::{Result, Store, StoreError};
use async_trait::async_trait;
use redis::AsyncCommands;
use shared::ViewCount;
use std::{future::Future, time::Duration};
use tracing::instrument;

pub struct RedisStore {
    redis: deadpool_redis::Pool,
    timeout: Duration,
}

impl RedisStore {
    pub const fn new(pool: deadpool_redis::Pool, timeout: Duration) -> Self {
        Self {
            redis: pool,
            timeout,
        }
    }

    async fn bounded<T>(&self, request: impl Future<Output = Result<T>> + Send) -> Result<T> {
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

#[async_trait]
impl Store for RedisStore {
    #[instrument(skip(self), err)]
    async fn incr(&self, key: &str) -> Result<ViewCount> {
        self.bounded(async {
            let mut db = self.redis.get().await?;
            let count: ViewCount = db.incr(key, 1).await?;
            Ok(count)
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn set_if_absent(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.bounded(async {
            let mut db = self.redis.get().await?;

            // SET NX replies nil when the key already exists
            let created: Option<String> = redis::cmd("SET")
                .arg(key)
                .arg("1")
                .arg("NX")
                .arg("EX")
                .arg(ttl.as_secs().max(1))
                .query_async(&mut db)
                .await?;

            Ok(created.is_some())
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn get(&self, key: &str) -> Result<Option<ViewCount>> {
        self.bounded(async {
            let mut db = self.redis.get().await?;
            let count: Option<ViewCount> = db.get(key).await?;
            Ok(count)
        })
        .await
    }

    #[instrument(skip(self), err)]
    async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<ViewCount>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        self.bounded(async {
            let mut db = self.redis.get().await?;

            let mut cmd = redis::cmd("MGET");
            for key in keys {
                cmd.arg(key);
            }

            let counts: Vec<Option<ViewCount>> = cmd.query_async(&mut db).await?;
            Ok(counts)
        })
        .await
    }
}
