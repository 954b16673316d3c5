//! Client use-case service.
//!
//! # Responsibility
//! - Own the merge policy for updates.
//! - Own the existence check (`require`) that read, update and delete share.
//!
//! # Invariants
//! - Holds no state besides the store handle.
//! - `delete_by_id` applies no guard of its own; callers run `require` first.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::model::{Client, ClientId, ClientInput, ClientPatch};
use crate::store::ClientStore;

#[derive(Clone)]
pub struct ClientService {
    store: Arc<dyn ClientStore>,
}

impl ClientService {
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self { store }
    }

    /// Persists a new client. A supplied id or a missing name is rejected.
    pub fn create(&self, input: ClientInput) -> ClientResult<Client> {
        let fields = input.into_fields()?;
        let client = self.store.save(None, &fields)?;
        info!(client_id = %client.id, "client created");
        Ok(client)
    }

    pub fn list_all(&self) -> ClientResult<Vec<Client>> {
        Ok(self.store.find_all()?)
    }

    /// Absence is a normal outcome here, not an error.
    pub fn find_by_id(&self, id: ClientId) -> ClientResult<Option<Client>> {
        let client = self.store.find_by_id(id)?;
        debug!(client_id = %id, found = client.is_some(), "client lookup");
        Ok(client)
    }

    /// Existence check: the stored record, or `NotFound` carrying `id`.
    pub fn require(&self, id: ClientId) -> ClientResult<Client> {
        self.find_by_id(id)?.ok_or_else(|| {
            warn!(client_id = %id, "client not found");
            ClientError::NotFound { id }
        })
    }

    /// Merges `patch` into the already-loaded `current` record and saves the
    /// result under the same id.
    pub fn update(&self, current: Client, patch: &ClientPatch) -> ClientResult<Client> {
        let merged = patch.merge_into(current)?;
        let (id, fields) = merged.into_parts();
        let saved = self.store.save(Some(id), &fields)?;
        info!(client_id = %id, "client updated");
        Ok(saved)
    }

    pub fn delete_by_id(&self, id: ClientId) -> ClientResult<()> {
        self.store.delete_by_id(id)?;
        info!(client_id = %id, "client deleted");
        Ok(())
    }
}
