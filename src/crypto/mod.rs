pub mod circuit;
pub mod commitment;
pub mod proof;

pub use circuit::CommitmentCircuit;
pub use commitment::{
    commitment_to_field_elements, create_commitment, hash_password, COMMITMENT_LEN, SALT_LEN,
};
pub use proof::{generate_proof, verify_proof, ProofBundle, ProofSystem};
