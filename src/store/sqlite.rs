use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::error::AuthError;
use crate::store::{Credential, CredentialStore};

/// Credential store backed by sqlite. The PRIMARY KEY on account_id makes
/// check-and-insert atomic: concurrent signups for the same id serialize in
/// the database and the loser surfaces as a unique violation.
pub struct SqliteCredentialStore {
    pool: Pool<Sqlite>,
}

impl SqliteCredentialStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn put(&self, account_id: &str, credential: Credential) -> Result<(), AuthError> {
        let result = sqlx::query(
            r#"
INSERT INTO credentials (account_id, salt, commitment, created_at)
VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(account_id)
        .bind(&credential.salt)
        .bind(&credential.commitment)
        .bind(credential.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AuthError::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get(&self, account_id: &str) -> Result<Credential, AuthError> {
        sqlx::query_as::<_, Credential>(
            "SELECT salt, commitment, created_at FROM credentials WHERE account_id = ?",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::NotFound)
    }
}
