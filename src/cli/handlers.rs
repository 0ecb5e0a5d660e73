use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::api::{AppState, GazetteServer};
use crate::config::Config;
use crate::error::Result;
use crate::storage::ArticleStore;

/// Load the config file and environment, then apply command-line overrides.
fn resolve_config(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<Config> {
    let mut config = Config::load(config_path)?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    Ok(config)
}

pub async fn handle_serve(
    config_path: &Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = resolve_config(config_path, host, port)?;

    // A failed connection is not fatal; requests fail individually instead.
    let state = match ArticleStore::open(config.connection_string()) {
        Ok(store) => {
            info!(
                database = %config.redacted_connection_string(),
                "DB connection successful"
            );
            AppState::new(store)
        }
        Err(e) => {
            error!(
                database = %config.redacted_connection_string(),
                error = %e,
                "DB connection error"
            );
            AppState::disconnected(e.to_string())
        }
    }
    .with_limits(config.query_limits());

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                trigger.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    GazetteServer::with_state(config.server_config(), state)
        .run_with_shutdown(shutdown.cancelled_owned())
        .await
}

pub fn handle_config(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = resolve_config(config_path, host, port)?;
    let server = config.server_config();

    println!("database:      {}", config.redacted_connection_string());
    println!("listen:        {}", server.address());
    match config.max_page_size {
        Some(max) => println!("max page size: {}", max),
        None => println!("max page size: unlimited"),
    }
    Ok(())
}
