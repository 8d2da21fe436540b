//! `desk-accounts` entry point.
//!
//! Initializes tracing, seeds the database directory on first boot, then
//! serves the REST API until Ctrl+C / SIGTERM.

use std::sync::Arc;

use desk_accounts::manager::AccountManager;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("desk-accounts v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = desk_accounts::data_dir_from_env();
    let manager = Arc::new(
        AccountManager::new(&data_dir)
            .map_err(|e| std::io::Error::other(format!("initialize stores: {e}")))?,
    );
    tracing::info!("Database directory: {}", data_dir.display());

    let bind = std::env::var("DESK_ACCOUNTS_BIND")
        .unwrap_or_else(|_| desk_accounts::DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Signal received, shutting down");
        let _ = shutdown_tx.send(true);
    });

    desk_accounts::http::serve(manager, listener, shutdown_rx).await?;

    tracing::info!("desk-accounts exiting cleanly");
    Ok(())
}
