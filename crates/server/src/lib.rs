//! Courier Server
//!
//! JSON-over-HTTP surface of the Courier request tester. Every response
//! except the Postman export uses the `{success, message?, data?, error?}`
//! envelope.

pub mod config;
mod handlers;
pub mod responses;
pub mod routes;
pub mod state;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

pub use config::Settings;
pub use routes::router;
pub use state::AppState;

/// Binds the configured address and serves until Ctrl-C.
///
/// # Errors
/// Returns an error if the state cannot be built or the listener fails.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.bind_addr();
    let state = AppState::new(&settings).context("failed to build HTTP client")?;
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, data_dir = %settings.data_dir().display(), "Courier server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Courier server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
