use std::time::Duration;

use anyhow::{bail, Result};

pub async fn ping_test_redis(pool: &deadpool_redis::Pool) -> Result<()> {
    let mut db = pool.get().await?;

    let pong = redis::cmd("PING").query_async::<_, String>(&mut db).await?;

    if pong != "PONG" {
        bail!("redis ping failed: {pong}");
    }

    Ok(())
}

pub fn create_pool(url: &str, timeout: Duration) -> Result<deadpool_redis::Pool> {
    let mut pool = deadpool_redis::PoolConfig::default();
    pool.timeouts.wait = Some(timeout);
    pool.timeouts.create = Some(timeout);
    pool.timeouts.recycle = Some(timeout);

    let cfg = deadpool_redis::Config {
        url: Some(url.to_string()),
        connection: None,
        pool: Some(pool),
    };

    // timeouts are only honoured with a runtime attached
    let pool = cfg.create_pool(Some(deadpool_redis::Runtime::Tokio1))?;

    Ok(pool)
}
