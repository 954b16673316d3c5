//! SQLite-backed client store.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use super::ClientStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Client, ClientFields, ClientId};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS client (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    email TEXT,
    tax_id TEXT
);";

const CLIENT_SELECT_SQL: &str = "SELECT id, name, email, tax_id FROM client";

/// Client store over a single SQLite connection.
///
/// `AUTOINCREMENT` keeps ids monotonic across deletions. The connection is
/// behind a mutex because `rusqlite::Connection` is not `Sync`.
pub struct SqliteClientStore {
    conn: Mutex<Connection>,
}

impl SqliteClientStore {
    /// Opens (or creates) a database file and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        info!(path = %path.display(), "opened sqlite client store");
        Self::with_connection(conn)
    }

    /// Opens a private in-memory database. Contents vanish with the store.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ClientStore for SqliteClientStore {
    fn save(&self, id: Option<ClientId>, fields: &ClientFields) -> StoreResult<Client> {
        fields.validate()?;
        let conn = self.lock()?;

        let id = match id {
            None => {
                conn.execute(
                    "INSERT INTO client (name, email, tax_id) VALUES (?1, ?2, ?3)",
                    params![fields.name, fields.email, fields.tax_id],
                )?;
                ClientId(conn.last_insert_rowid())
            }
            Some(id) => {
                conn.execute(
                    "INSERT INTO client (id, name, email, tax_id) VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        email = excluded.email,
                        tax_id = excluded.tax_id",
                    params![id.0, fields.name, fields.email, fields.tax_id],
                )?;
                id
            }
        };

        debug!(client_id = %id, "saved client row");
        Ok(Client::from_parts(id, fields.clone()))
    }

    fn find_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
        let conn = self.lock()?;
        let client = conn
            .query_row(
                &format!("{CLIENT_SELECT_SQL} WHERE id = ?1"),
                params![id.0],
                row_to_client,
            )
            .optional()?;
        Ok(client)
    }

    fn find_all(&self) -> StoreResult<Vec<Client>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{CLIENT_SELECT_SQL} ORDER BY id"))?;
        let clients = stmt
            .query_map([], row_to_client)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(clients)
    }

    fn delete_by_id(&self, id: ClientId) -> StoreResult<()> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM client WHERE id = ?1", params![id.0])?;
        debug!(client_id = %id, removed, "deleted client row");
        Ok(())
    }
}

fn row_to_client(row: &Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: ClientId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        tax_id: row.get(3)?,
    })
}
