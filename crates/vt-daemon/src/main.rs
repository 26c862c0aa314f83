//! vibetodo daemon — starts the REST API and Telegram webhook server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use vt_bridge::http_api::{api_router, ApiState};
use vt_core::config::Config;
use vt_telegram::TelegramClient;

mod logging;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging("vt-daemon", "info");

    info!(version = env!("CARGO_PKG_VERSION"), "vibetodo daemon starting");

    // Load config (or use defaults).
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        Config::default()
    });

    // PORT wins over the file, the way the original deployment configured it.
    if let Ok(port) = std::env::var("PORT") {
        config.daemon.port = port
            .parse()
            .with_context(|| format!("invalid PORT value '{port}'"))?;
    }

    let mut state = ApiState::new();
    if config.telegram.send_replies {
        match TelegramClient::new_from_env(&config.telegram.api_base) {
            Ok(client) => {
                info!("telegram replies enabled");
                state = state.with_telegram(client);
            }
            Err(err) => {
                tracing::warn!(error = %err, "telegram replies disabled");
            }
        }
    } else {
        info!("telegram replies disabled by config");
    }

    let app = api_router(Arc::new(state), config.daemon.allowed_origins.clone());

    let addr = format!("{}:{}", config.daemon.host, config.daemon.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("API: http://{addr}/api/todos");
    info!("webhook: http://{addr}/webhook");
    info!("health check: http://{addr}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("vibetodo daemon stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        return;
    }
    info!("ctrl-c received, shutting down gracefully");
}
