//! Fela HTTP server entry point

use anyhow::{Context, Result};
use clap::Parser;
use fela_api::Aligner;
use fela_server::{router, AppState, ServerArgs};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = ServerArgs::parse();
    let config = args.to_config()?;
    log::info!(
        "embedding backend: {}, search backend: {}, max_align: {}",
        config.embedding().name(),
        config.search().name(),
        config.num_overlaps() + 1
    );
    let aligner = Aligner::with_config(config).context("failed to build aligner")?;
    let app = router(AppState::new(aligner));

    let addr: SocketAddr = args
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {}", args.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("fela-server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server shutdown")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
