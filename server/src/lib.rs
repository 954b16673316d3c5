//! HTTP CRUD service for client records.
//!
//! # Overview
//! Three layers, wired explicitly at startup:
//! - `store`: persistence behind the `ClientStore` trait (SQLite or in-memory).
//! - `service`: merge policy and the existence check shared by read, update
//!   and delete.
//! - `api`: axum handlers mapping service outcomes to status codes.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{Config, StoreBackend};
pub use error::{ClientError, ClientResult, StoreError, ValidationError};
pub use model::{Client, ClientFields, ClientId, ClientInput, ClientPatch};
pub use service::ClientService;
pub use store::{ClientStore, MemoryClientStore, SqliteClientStore};

pub fn app(service: ClientService) -> Router {
    api::routes(service).layer(TraceLayer::new_for_http())
}

/// Serves until the listener fails or ctrl-c is received.
pub async fn run(listener: TcpListener, service: ClientService) -> Result<(), std::io::Error> {
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => {
            tracing::warn!(error = %err, "ctrl-c handler unavailable, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
