pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::MemoryCredentialStore;
pub use models::Credential;
pub use sqlite::SqliteCredentialStore;

use async_trait::async_trait;

use crate::error::AuthError;

/// Key-value contract for stored credentials. `put` is atomic
/// check-and-insert: a concurrent duplicate signup for the same account id
/// must leave exactly one credential stored and fail the loser with
/// `AlreadyExists`.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn put(&self, account_id: &str, credential: Credential) -> Result<(), AuthError>;

    async fn get(&self, account_id: &str) -> Result<Credential, AuthError>;
}
