//! Non-durable client store for tests and throwaway servers.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::ClientStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{Client, ClientFields, ClientId};

#[derive(Debug)]
struct Table {
    next_id: i64,
    rows: BTreeMap<ClientId, Client>,
}

/// Map-backed store with a monotonic id counter.
#[derive(Debug)]
pub struct MemoryClientStore {
    table: RwLock<Table>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryClientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientStore for MemoryClientStore {
    fn save(&self, id: Option<ClientId>, fields: &ClientFields) -> StoreResult<Client> {
        fields.validate()?;
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;

        let id = match id {
            Some(id) => {
                // Explicit ids past the counter must not be handed out again.
                table.next_id = table.next_id.max(id.0 + 1);
                id
            }
            None => {
                let id = ClientId(table.next_id);
                table.next_id += 1;
                id
            }
        };

        let client = Client::from_parts(id, fields.clone());
        table.rows.insert(id, client.clone());
        Ok(client)
    }

    fn find_by_id(&self, id: ClientId) -> StoreResult<Option<Client>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn find_all(&self) -> StoreResult<Vec<Client>> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn delete_by_id(&self, id: ClientId) -> StoreResult<()> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        table.rows.remove(&id);
        Ok(())
    }
}
