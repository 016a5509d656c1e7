use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{app::App, client_ip::ClientIpSource, handle};

fn setup_cors(relax_cors: bool) -> CorsLayer {
    if relax_cors {
        tracing::info!("cors relaxed");
        CorsLayer::very_permissive()
    } else {
        CorsLayer::new()
    }
}

pub fn router(app: App, ip_source: ClientIpSource, relax_cors: bool) -> Router {
    #[rustfmt::skip]
    let router = Router::new()
        .route("/api/ping", get(handle::ping_handler))
        .route("/api/version", get(handle::version_handler))
        .route("/api/incr", post(handle::incr_handler))
        .route("/api/views", get(handle::views_batch_handler))
        .route("/api/views/:slug", get(handle::views_handler))
        .route("/api/projects", get(handle::projects_handler))
        .route("/api/projects/:slug", get(handle::project_handler));

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(relax_cors))
            .layer(Extension(ip_source))
            .layer(Extension(app)),
    )
}
