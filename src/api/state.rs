use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;
use std::sync::Arc;

use crate::config::Config;
use crate::store::CredentialStore;

/// Process-wide state: the credential store and the verification key,
/// both fixed at startup and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub vk: Arc<VerifyingKey<Bn254>>,
    pub config: Arc<Config>,
}
