//! JWT issuance for logged-in users
//!
//! Tokens are signed with HS256 using a secret supplied through configuration.
//! The payload carries only the user id; there is no server-side session and
//! no revocation.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::FoodhubError;

/// Minimum accepted secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// User reference embedded in the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    pub id: String,
}

/// Payload stored in the JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: UserClaim,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Signs and verifies login tokens
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    expiry_seconds: u64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("expiry_seconds", &self.expiry_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Create a new issuer
    ///
    /// Returns an error if the secret is empty or shorter than [`MIN_SECRET_LEN`].
    pub fn new(secret: String, expiry_seconds: u64) -> Result<Self, FoodhubError> {
        if secret.is_empty() {
            return Err(FoodhubError::Config("JWT_SECRET is required".into()));
        }

        if secret.len() < MIN_SECRET_LEN {
            return Err(FoodhubError::Config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} characters"
            )));
        }

        Ok(Self {
            secret,
            expiry_seconds,
        })
    }

    /// Issue a signed token for the given user id
    pub fn issue(&self, user_id: &str) -> Result<String, FoodhubError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| FoodhubError::Auth(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            user: UserClaim {
                id: user_id.to_string(),
            },
            iat: now,
            exp: now.saturating_add(self.expiry_seconds),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify(&self, token: &str) -> Result<Claims, FoodhubError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }
}
