//! zk-login: password authentication where the server never sees a password.
//!
//! Signup stores a commitment `Argon2id(password, salt)`; login verifies a
//! Groth16 proof of knowledge of a password matching that commitment. The
//! proving backend sits behind a narrow interface in [`crypto::proof`] so
//! the protocol does not depend on any one proof system.

pub mod api;
pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod store;
