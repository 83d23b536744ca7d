//! Client-side proving task.
//!
//! Proof generation can take seconds (Argon2 plus Groth16 proving), so it
//! runs on the blocking pool instead of any async handler path, and it can
//! be cancelled when the user navigates away. A cancelled task discards the
//! in-flight computation; no partial proof is ever produced.

use ark_bn254::Bn254;
use ark_groth16::ProvingKey;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::crypto::{generate_proof, ProofBundle, COMMITMENT_LEN};
use crate::error::AuthError;

/// Everything the client needs to build a proof. Held only for the duration
/// of one login attempt. Deliberately no Debug derive: the password must not
/// end up in logs.
pub struct ProofRequest {
    pub password: String,
    pub salt: Vec<u8>,
    pub commitment: [u8; COMMITMENT_LEN],
}

pub struct ProofTask {
    handle: JoinHandle<Result<ProofBundle, AuthError>>,
}

impl ProofTask {
    pub fn spawn(request: ProofRequest, proving_key: Arc<ProvingKey<Bn254>>) -> Self {
        let handle = tokio::task::spawn_blocking(move || {
            generate_proof(
                &request.password,
                &request.salt,
                &request.commitment,
                &proving_key,
            )
        });
        Self { handle }
    }

    /// Abort the in-flight computation. Safe to call at any point; a task
    /// that already completed is unaffected.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub async fn join(self) -> Result<ProofBundle, AuthError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(AuthError::Cancelled),
            Err(e) => Err(AuthError::Internal(format!("proving task panicked: {}", e))),
        }
    }
}
