#[cfg(target_os = "linux")]
use tokio::signal::unix::{signal, SignalKind};

/// Resolves on ctrl-c, or on SIGTERM where available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("ctrl-c signal error: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(target_os = "linux")]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                tracing::info!("register terminate signal handler");

                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("signal error: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(target_os = "linux"))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("got terminate signal");
}
