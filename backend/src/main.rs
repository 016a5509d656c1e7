mod app;
mod catalog;
mod client_ip;
mod env;
mod error;
mod handle;
mod redis_pool;
mod routes;
mod signals;
mod store;
mod views;

use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::App,
    catalog::Catalog,
    client_ip::ClientIpSource,
    env::Config,
    store::{InMemoryStore, RedisStore, Store},
};

pub const GIT_HASH: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(hash) => hash,
    None => "unknown",
};

fn setup_sentry(config: &Config) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;

    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: Some(GIT_HASH.into()),
            ..Default::default()
        },
    )))
}

async fn setup_store(config: &Config) -> anyhow::Result<Arc<dyn Store>> {
    if let Some(url) = &config.redis_url {
        let pool = redis_pool::create_pool(url, config.store_timeout)?;

        redis_pool::ping_test_redis(&pool).await?;

        tracing::info!("redis connected");

        Ok(Arc::new(RedisStore::new(pool, config.store_timeout)))
    } else {
        tracing::warn!("{} not set, counting views in memory", env::ENV_REDIS_URL);

        Ok(Arc::new(InMemoryStore::default()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let _sentry = setup_sentry(&config);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "pageviews_server=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(sentry::integrations::tracing::layer())
        .init();

    tracing::info!(git = GIT_HASH, "starting");

    let store = setup_store(&config).await?;

    let catalog = Catalog::load(&config.content_dir)?;
    if catalog.is_empty() {
        tracing::warn!("catalog is empty, project pages will 404");
    }
    tracing::info!(
        "catalog loaded: {} projects from {}",
        catalog.len(),
        config.content_dir.display()
    );

    let app = App::new(store, catalog, config.dedup_ttl, &config.featured);

    let ip_source = if config.trust_forwarded {
        ClientIpSource::ForwardedFor
    } else {
        ClientIpSource::Peer
    };

    let router = routes::router(app, ip_source, config.relax_cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(router.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(signals::shutdown_signal())
        .await?;

    tracing::info!("server shut down");

    Ok(())
}
