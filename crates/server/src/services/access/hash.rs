//! Password hashing.

use sha2::{Digest, Sha256};

/// Hashes passwords into a deterministic digest.
///
/// Stored hashes are compared by exact string equality, so implementations
/// must produce a stable, canonical rendering.
pub trait PasswordHasher: Send + Sync {
    /// Hash the plaintext into a fixed-length lowercase hex digest.
    fn hash(&self, plaintext: &str) -> String;
}

/// SHA-256 rendered as lowercase hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn hash(&self, plaintext: &str) -> String {
        hex::encode(Sha256::digest(plaintext.as_bytes()))
    }
}
