use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::crypto::commitment::{commitment_to_field_elements, COMMITMENT_LEN};

/// Relation proved at login: "I know a digest whose bits pack to the stored
/// commitment." The digest is Argon2id(password, salt), supplied by the
/// prover; the commitment enters as two public field elements, so each
/// proof is bound to exactly one credential.
#[derive(Clone)]
pub struct CommitmentCircuit {
    /// Private witness: Argon2id(password, salt).
    pub digest: Option<[u8; COMMITMENT_LEN]>,
    /// Public input: the stored commitment.
    pub commitment: [u8; COMMITMENT_LEN],
}

impl ConstraintSynthesizer<Fr> for CommitmentCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let limbs = commitment_to_field_elements(&self.commitment);
        let expected_lo = FpVar::new_input(cs.clone(), || Ok(limbs[0]))?;
        let expected_hi = FpVar::new_input(cs.clone(), || Ok(limbs[1]))?;

        // Witness the digest bit by bit, little-endian within each byte,
        // matching the byte order of commitment_to_field_elements.
        let digest = self.digest;
        let mut bits = Vec::with_capacity(COMMITMENT_LEN * 8);
        for idx in 0..COMMITMENT_LEN {
            for i in 0..8 {
                let bit = Boolean::new_witness(cs.clone(), || {
                    let byte = digest.ok_or(SynthesisError::AssignmentMissing)?[idx];
                    Ok((byte >> i) & 1 == 1)
                })?;
                bits.push(bit);
            }
        }

        let packed_lo = Boolean::le_bits_to_fp_var(&bits[..128])?;
        let packed_hi = Boolean::le_bits_to_fp_var(&bits[128..])?;

        packed_lo.enforce_equal(&expected_lo)?;
        packed_hi.enforce_equal(&expected_hi)?;

        Ok(())
    }
}
