//! Password hashing with Argon2id.
//!
//! Digests are stored in PHC string format, so parameters and salt travel
//! with the digest and can change without a migration.

use anyhow::{anyhow, Result};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};
use rand::RngCore;

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns an error if the system RNG fails or the hasher rejects its input.
pub fn hash(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; 16];
    rand::rngs::OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| anyhow!(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| anyhow!(e.to_string()))?;

    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!(e.to_string()))?
        .to_string();

    Ok(digest)
}

/// Check a password against a stored digest.
///
/// Unparseable digests count as a mismatch rather than an error, so a
/// corrupted row can never log anyone in.
#[must_use]
pub fn verify(password: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
