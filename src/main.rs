use std::sync::Arc;

use tracing::info;
use ytinfo::{
    cache::spawn_sweeper,
    common::{AnyResult, logger},
    configs::Config,
    server::AppState,
    transport,
};

#[tokio::main]
async fn main() -> AnyResult<()> {
    let config = Config::load()?;
    logger::init(config.logging.as_ref());

    let shared_state = Arc::new(AppState::from_config(config)?);

    let cache_config = &shared_state.config.cache;
    if cache_config.enabled {
        info!("Response cache enabled, ttl {}s", cache_config.ttl_secs);
        if let Some(interval) = cache_config.sweep_interval() {
            spawn_sweeper(shared_state.service.cache().clone(), interval);
        }
    } else {
        info!("Response cache disabled");
    }

    let address = shared_state.config.server.address();
    let app = transport::http_server::router(shared_state.clone());

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("YouTube info endpoint listening on http://{}/api/youtube", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
