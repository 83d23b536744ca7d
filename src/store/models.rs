use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The only per-account state the server holds: a salt and the commitment
/// bound to it. Written once at signup, read on every login attempt, never
/// mutated. No password material, ever.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Credential {
    pub salt: Vec<u8>,
    pub commitment: Vec<u8>,
    pub created_at: i64,
}
