//! Argon2 password hashing and verification.
//!
//! Hashes are PHC-encoded strings with a per-user random salt; the work
//! factor is the argon2id default. Both operations are CPU-bound and
//! deliberately slow; callers run them under `spawn_blocking`.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a plaintext password into a PHC-encoded argon2 string.
pub(crate) fn hash(plaintext: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

/// Compare a plaintext password against a stored PHC-encoded hash.
///
/// A mismatch is `Ok(false)`; only a malformed stored hash or a hasher
/// fault is an error.
pub(crate) fn verify(plaintext: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| anyhow!("stored password hash is invalid: {err}"))?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(anyhow!("failed to verify password: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn hash_then_verify_round_trip() -> Result<()> {
        let hashed = hash("abcdef")?;
        assert!(verify("abcdef", &hashed)?);
        assert!(!verify("abcdeg", &hashed)?);
        Ok(())
    }

    #[test]
    fn hash_never_contains_plaintext() -> Result<()> {
        let hashed = hash("correct horse battery staple")?;
        assert!(!hashed.contains("correct horse"));
        assert!(hashed.starts_with("$argon2"));
        Ok(())
    }

    #[test]
    fn salts_make_hashes_differ() -> Result<()> {
        let first = hash("abcdef")?;
        let second = hash("abcdef")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify("abcdef", "not-a-phc-string").is_err());
    }
}
