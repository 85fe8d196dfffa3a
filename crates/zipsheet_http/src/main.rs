use anyhow::Context;
use clap::Parser;
use zipsheet_http::{Cli, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Cli::parse().into_config();
    let c_addr = cfg.addr();

    let listener = tokio::net::TcpListener::bind(&c_addr)
        .await
        .with_context(|| format!("Failed to bind {c_addr}"))?;
    log::info!("Server is running on http://{c_addr}");

    axum::serve(listener, build_router(cfg))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received"),
        Err(err) => {
            log::error!("Failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
