use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::store::{Credential, CredentialStore};

/// In-memory credential store for tests and embedded deployments.
/// Check-and-insert happens under a single write-lock hold, so the
/// `AlreadyExists` invariant holds under concurrent signups.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, account_id: &str, credential: Credential) -> Result<(), AuthError> {
        let mut map = self.inner.write().await;
        match map.entry(account_id.to_string()) {
            Entry::Occupied(_) => Err(AuthError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(credential);
                Ok(())
            }
        }
    }

    async fn get(&self, account_id: &str) -> Result<Credential, AuthError> {
        self.inner
            .read()
            .await
            .get(account_id)
            .cloned()
            .ok_or(AuthError::NotFound)
    }
}
