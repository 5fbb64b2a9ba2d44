//! Server lifecycle: bind, serve, shut down gracefully.

use std::net::SocketAddr;

use crate::api::router::api_router;
use crate::state::AppState;

/// Bind `addr` and serve until ctrl-c.
pub async fn serve(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "coverage API listening");

    axum::serve(listener, api_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
