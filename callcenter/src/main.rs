//! `desk-callcenter` entry point.
//!
//! Initializes tracing, seeds the database directory on first boot, then
//! serves the REST API until Ctrl+C / SIGTERM.

use std::sync::Arc;

use desk_callcenter::manager::ContractManager;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("desk-callcenter v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = desk_callcenter::data_dir_from_env();
    let manager = Arc::new(
        ContractManager::new(&data_dir)
            .map_err(|e| std::io::Error::other(format!("initialize stores: {e}")))?,
    );
    tracing::info!("Database directory: {}", data_dir.display());

    let bind = std::env::var("DESK_CALLCENTER_BIND")
        .unwrap_or_else(|_| desk_callcenter::DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Signal received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    desk_callcenter::http::serve(manager, listener, shutdown_rx).await?;

    tracing::info!("desk-callcenter exiting cleanly");
    Ok(())
}
