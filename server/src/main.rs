use anyhow::Context;
use clap::Parser;
use client_server::{ClientService, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    client_server::logging::init(&config.log_level);

    let store = config.open_store().context("failed to open client store")?;
    let service = ClientService::new(store);

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %listener.local_addr()?, store = ?config.store, "listening");

    client_server::run(listener, service).await?;
    Ok(())
}
