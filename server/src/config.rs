//! Startup configuration and explicit store construction.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use crate::error::StoreResult;
use crate::store::{ClientStore, MemoryClientStore, SqliteClientStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// SQLite database file (or `:memory:`).
    Sqlite,
    /// Process-local map; nothing survives a restart.
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "client-server")]
#[command(about = "HTTP CRUD service for client records")]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "CLIENT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Persistence backend
    #[arg(long, env = "CLIENT_STORE", value_enum, default_value_t = StoreBackend::Sqlite)]
    pub store: StoreBackend,

    /// SQLite database path, used by the sqlite backend
    #[arg(long, env = "CLIENT_DATABASE", default_value = "clients.db")]
    pub database: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "CLIENT_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn open_store(&self) -> StoreResult<Arc<dyn ClientStore>> {
        let store: Arc<dyn ClientStore> = match self.store {
            StoreBackend::Memory => Arc::new(MemoryClientStore::new()),
            StoreBackend::Sqlite if self.database.as_os_str() == ":memory:" => {
                Arc::new(SqliteClientStore::open_in_memory()?)
            }
            StoreBackend::Sqlite => Arc::new(SqliteClientStore::open(&self.database)?),
        };
        Ok(store)
    }
}
