use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use rand::rngs::OsRng;
use std::fs;
use std::path::Path;

use crate::crypto::circuit::CommitmentCircuit;
use crate::crypto::commitment::{commitment_to_field_elements, hash_password, COMMITMENT_LEN};
use crate::error::AuthError;

/// Proof system manager handling key generation, proof creation, and verification
pub struct ProofSystem {
    pub proving_key: ProvingKey<Bn254>,
    pub verifying_key: VerifyingKey<Bn254>,
}

/// A proof and its public signals, produced together and consumed together
/// by a single verification call. Both are compressed arkworks encodings.
#[derive(Debug)]
pub struct ProofBundle {
    pub proof: Vec<u8>,
    pub public_signals: Vec<u8>,
}

impl ProofSystem {
    /// Initialize proof system with one-time trusted setup
    pub fn setup(keys_dir: &str) -> Result<Self, AuthError> {
        let pk_path = format!("{}/proving.key", keys_dir);
        let vk_path = format!("{}/verification.key", keys_dir);

        // Try to load existing keys
        if Path::new(&pk_path).exists() && Path::new(&vk_path).exists() {
            tracing::info!("Loading existing ZK keys from {}", keys_dir);
            return Self::load_keys(&pk_path, &vk_path);
        }

        // Generate new keys
        tracing::info!("Generating new ZK keys (one-time trusted setup)...");
        fs::create_dir_all(keys_dir).map_err(|e| {
            AuthError::ProvingBackend(format!("Failed to create keys directory: {}", e))
        })?;

        // Setup only fixes the constraint shape; the assignments are dummies.
        let dummy_circuit = CommitmentCircuit {
            digest: Some([0u8; COMMITMENT_LEN]),
            commitment: [0u8; COMMITMENT_LEN],
        };

        let (pk, vk) = Groth16::<Bn254>::setup(dummy_circuit, &mut OsRng)
            .map_err(|e| AuthError::ProvingBackend(format!("Setup failed: {}", e)))?;

        Self::save_key(&pk, &pk_path)?;
        Self::save_key(&vk, &vk_path)?;

        tracing::info!("ZK keys generated and saved successfully");
        Ok(ProofSystem {
            proving_key: pk,
            verifying_key: vk,
        })
    }

    /// Load keys from disk
    fn load_keys(pk_path: &str, vk_path: &str) -> Result<Self, AuthError> {
        let pk_bytes = fs::read(pk_path)
            .map_err(|e| AuthError::ProvingBackend(format!("Failed to read proving key: {}", e)))?;
        let vk_bytes = fs::read(vk_path).map_err(|e| {
            AuthError::VerificationKeyUnavailable(format!("Failed to read verification key: {}", e))
        })?;

        let pk = ProvingKey::<Bn254>::deserialize_compressed(&pk_bytes[..]).map_err(|e| {
            AuthError::ProvingBackend(format!("Failed to deserialize proving key: {}", e))
        })?;
        let vk = VerifyingKey::<Bn254>::deserialize_compressed(&vk_bytes[..]).map_err(|e| {
            AuthError::VerificationKeyUnavailable(format!(
                "Failed to deserialize verification key: {}",
                e
            ))
        })?;

        Ok(ProofSystem {
            proving_key: pk,
            verifying_key: vk,
        })
    }

    /// Save a key to disk
    fn save_key<T: CanonicalSerialize>(key: &T, path: &str) -> Result<(), AuthError> {
        let mut bytes = Vec::new();
        key.serialize_compressed(&mut bytes)
            .map_err(|e| AuthError::ProvingBackend(format!("Failed to serialize key: {}", e)))?;
        fs::write(path, bytes).map_err(|e| {
            AuthError::ProvingBackend(format!("Failed to write key to {}: {}", path, e))
        })?;
        Ok(())
    }
}

/// Produce a login proof for the given password against a stored credential.
///
/// Runs client-side with a freshly typed password; the salt and commitment
/// come from the server's login-data response. A password that cannot
/// satisfy the relation fails with `WitnessMismatch` before the backend is
/// invoked, so wrong-password is always distinguishable from backend faults.
pub fn generate_proof(
    password: &str,
    salt: &[u8],
    commitment: &[u8; COMMITMENT_LEN],
    proving_key: &ProvingKey<Bn254>,
) -> Result<ProofBundle, AuthError> {
    let digest = hash_password(password, salt)?;
    if digest != *commitment {
        return Err(AuthError::WitnessMismatch);
    }

    let circuit = CommitmentCircuit {
        digest: Some(digest),
        commitment: *commitment,
    };

    let proof = Groth16::<Bn254>::prove(proving_key, circuit, &mut OsRng)
        .map_err(|e| AuthError::ProvingBackend(format!("Proof generation failed: {}", e)))?;

    let mut proof_bytes = Vec::new();
    proof
        .serialize_compressed(&mut proof_bytes)
        .map_err(|e| AuthError::ProvingBackend(format!("Proof serialization failed: {}", e)))?;

    let signals: Vec<Fr> = commitment_to_field_elements(commitment).to_vec();
    let mut signal_bytes = Vec::new();
    signals
        .serialize_compressed(&mut signal_bytes)
        .map_err(|e| AuthError::ProvingBackend(format!("Signal serialization failed: {}", e)))?;

    Ok(ProofBundle {
        proof: proof_bytes,
        public_signals: signal_bytes,
    })
}

/// Verify a login proof against the commitment stored for the account.
///
/// `expected_commitment` must come from the credential store, never from the
/// client. The client-submitted signals are cross-checked against it first,
/// so a valid proof bound to some other account's commitment is rejected
/// before the pairing check runs.
pub fn verify_proof(
    proof_bytes: &[u8],
    signal_bytes: &[u8],
    expected_commitment: &[u8; COMMITMENT_LEN],
    verifying_key: &VerifyingKey<Bn254>,
) -> Result<bool, AuthError> {
    let proof = Proof::<Bn254>::deserialize_compressed(proof_bytes)
        .map_err(|e| AuthError::MalformedProof(format!("Invalid proof format: {}", e)))?;

    let signals = Vec::<Fr>::deserialize_compressed(signal_bytes)
        .map_err(|e| AuthError::MalformedProof(format!("Invalid public signals: {}", e)))?;

    let expected = commitment_to_field_elements(expected_commitment);
    if signals.as_slice() != expected {
        // Proof is bound to a different credential than the account's.
        return Ok(false);
    }

    Groth16::<Bn254>::verify(verifying_key, &expected, &proof)
        .map_err(|e| AuthError::Internal(format!("Verification failed: {}", e)))
}
