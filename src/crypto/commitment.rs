use argon2::Argon2;
use ark_bn254::Fr;
use ark_ff::PrimeField;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::AuthError;

/// Salt length in bytes. Fixed so client and server agree on payload shape.
pub const SALT_LEN: usize = 32;

/// Commitment length in bytes (Argon2id output).
pub const COMMITMENT_LEN: usize = 32;

/// Derive a fresh (salt, commitment) pair for a password at signup.
///
/// The commitment is `Argon2id(password, salt)`, the exact binding the
/// login circuit proves knowledge of. Nothing is persisted here; the
/// caller decides where the pair goes.
pub fn create_commitment(
    password: &str,
) -> Result<([u8; SALT_LEN], [u8; COMMITMENT_LEN]), AuthError> {
    if password.is_empty() {
        return Err(AuthError::InvalidPassword(
            "password must not be empty".to_string(),
        ));
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| AuthError::RandomnessUnavailable(e.to_string()))?;

    let commitment = hash_password(password, &salt)?;
    Ok((salt, commitment))
}

/// Argon2id of the password under the given salt. This digest is both the
/// stored commitment and the private witness of the login proof, so any
/// change here must be mirrored in the circuit's packing.
pub fn hash_password(password: &str, salt: &[u8]) -> Result<[u8; COMMITMENT_LEN], AuthError> {
    let argon2 = Argon2::default();
    let mut digest = [0u8; COMMITMENT_LEN];

    argon2
        .hash_password_into(password.as_bytes(), salt, &mut digest)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {}", e)))?;

    Ok(digest)
}

/// Encode a 32-byte commitment as two BN254 scalars: each 16-byte half is
/// read little-endian. 128 bits always fit below the modulus, so the
/// encoding is injective. The circuit packs its witness bits identically.
pub fn commitment_to_field_elements(commitment: &[u8; COMMITMENT_LEN]) -> [Fr; 2] {
    [
        Fr::from_le_bytes_mod_order(&commitment[..16]),
        Fr::from_le_bytes_mod_order(&commitment[16..]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_salt_freshness() {
        let (salt_a, commitment_a) = create_commitment("hunter2").unwrap();
        let (salt_b, commitment_b) = create_commitment("hunter2").unwrap();

        // Same password, two registrations: fresh salts, distinct commitments.
        assert_ne!(salt_a, salt_b);
        assert_ne!(commitment_a, commitment_b);
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = create_commitment("").unwrap_err();
        assert!(matches!(err, AuthError::InvalidPassword(_)));
    }

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let salt = [7u8; SALT_LEN];
        let a = hash_password("hunter2", &salt).unwrap();
        let b = hash_password("hunter2", &salt).unwrap();
        let c = hash_password("hunter3", &salt).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_field_encoding_distinguishes_commitments() {
        let mut low = [0u8; COMMITMENT_LEN];
        let mut high = [0u8; COMMITMENT_LEN];
        low[0] = 1;
        high[16] = 1;

        let low_limbs = commitment_to_field_elements(&low);
        let high_limbs = commitment_to_field_elements(&high);

        // A bit flip in either half lands in the matching limb only.
        assert_ne!(low_limbs[0], high_limbs[0]);
        assert_eq!(low_limbs[1], commitment_to_field_elements(&[0u8; 32])[1]);
        assert_ne!(high_limbs[1], low_limbs[1]);
    }
}
