//! Persistence contract for client records.
//!
//! # Invariants
//! - `save` validates fields before writing anything.
//! - Identifiers are assigned by the store and never reused after deletion.
//! - `delete_by_id` on an unknown id is a no-op, not an error. Existence checks
//!   belong to the caller.

mod memory;
mod sqlite;

pub use memory::MemoryClientStore;
pub use sqlite::SqliteClientStore;

use crate::error::StoreResult;
use crate::model::{Client, ClientFields, ClientId};

/// Durable, id-keyed storage for `Client` records.
pub trait ClientStore: Send + Sync {
    /// Inserts a new record when `id` is `None`, otherwise inserts or replaces
    /// the record at `id`. Returns the record as persisted.
    fn save(&self, id: Option<ClientId>, fields: &ClientFields) -> StoreResult<Client>;

    fn find_by_id(&self, id: ClientId) -> StoreResult<Option<Client>>;

    /// All records in storage order. Callers must not depend on the order.
    fn find_all(&self) -> StoreResult<Vec<Client>>;

    fn delete_by_id(&self, id: ClientId) -> StoreResult<()>;
}
