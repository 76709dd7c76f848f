//! Trust token issuance and validation.
//!
//! The token is an HS256 JWT binding a user id (`sub`) to an expiry. The
//! login handler mints it; the access gate and session endpoint only call
//! [`TokenKeys::validate`], which folds every failure (bad signature,
//! expired, malformed subject) into `None`.

use anyhow::{Context, Result};
use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: u64,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &SecretString, ttl_seconds: u64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_seconds,
        }
    }

    /// Sign a new trust token for the given user.
    ///
    /// # Errors
    /// Returns an error if signing fails.
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = get_current_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("failed to sign session token")
    }

    /// Validate a trust token, returning the bound user id.
    ///
    /// Corrupt or expired tokens yield `None`, identically to no token.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<Uuid> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .ok()
            .and_then(|data| Uuid::parse_str(&data.claims.sub).ok())
    }

    #[must_use]
    pub const fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("encoding", &"***")
            .field("decoding", &"***")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn keys() -> TokenKeys {
        TokenKeys::new(&SecretString::from("test-secret".to_string()), 3600)
    }

    #[test]
    fn issue_then_validate_round_trip() -> Result<()> {
        let keys = keys();
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id)?;
        assert_eq!(keys.validate(&token), Some(user_id));
        Ok(())
    }

    #[test]
    fn garbage_token_is_invalid() {
        let keys = keys();
        assert_eq!(keys.validate(""), None);
        assert_eq!(keys.validate("not.a.jwt"), None);
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() -> Result<()> {
        let token = keys().issue(Uuid::new_v4())?;
        let other = TokenKeys::new(&SecretString::from("other-secret".to_string()), 3600);
        assert_eq!(other.validate(&token), None);
        Ok(())
    }

    #[test]
    fn expired_token_is_invalid() -> Result<()> {
        let keys = keys();
        // Expired well beyond the default validation leeway
        let now = get_current_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )?;
        assert_eq!(keys.validate(&token), None);
        Ok(())
    }

    #[test]
    fn non_uuid_subject_is_invalid() -> Result<()> {
        let keys = keys();
        let now = get_current_timestamp();
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )?;
        assert_eq!(keys.validate(&token), None);
        Ok(())
    }

    #[test]
    fn debug_masks_key_material() {
        let debug = format!("{:?}", keys());
        assert!(!debug.contains("test-secret"));
        assert!(debug.contains("ttl_seconds"));
    }
}
