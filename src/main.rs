// Smart Survey - HTTP server entry point

use anyhow::Context;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use smart_survey::{build_router, AppState, ConfigService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let service = ConfigService::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&service.get_config().log_filter)),
        )
        .init();

    if let Some(path) = service.env_file() {
        debug!(path = %path.display(), "loaded environment file");
    }
    if let Some(path) = service.config_path() {
        info!(path = %path.display(), "loaded configuration file");
    }
    let config = service.into_config();

    let addr = config
        .socket_addr()
        .map_err(anyhow::Error::msg)
        .context("invalid bind address")?;
    let state = AppState::from_config(config).context("failed to build model provider")?;
    info!(
        provider = state.provider().name(),
        model = state.provider().model(),
        "model provider ready"
    );

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Smart Survey API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
