//! Password hashes
//!
//! New hashes are Argon2id PHC strings with a per-hash salt. Accounts created
//! before the switch to Argon2 carry bcrypt hashes (`$2a$`, `$2b$`, `$2y$`)
//! in the same collection; those are still accepted at login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::types::FoodhubError;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// A stored hash, by scheme
enum StoredHash<'a> {
    Argon2(PasswordHash<'a>),
    Bcrypt(&'a str),
}

impl<'a> StoredHash<'a> {
    fn parse(hash: &'a str) -> Result<Self, FoodhubError> {
        if BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            return Ok(Self::Bcrypt(hash));
        }
        PasswordHash::new(hash)
            .map(Self::Argon2)
            .map_err(|e| FoodhubError::Auth(format!("Unreadable password hash: {e}")))
    }
}

/// Hash a password for storage (Argon2id PHC string)
pub fn hash_password(password: &str) -> Result<String, FoodhubError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| FoodhubError::Auth(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored Argon2 or bcrypt hash
///
/// `Ok(false)` on mismatch. `Err` only when the stored hash cannot be read.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, FoodhubError> {
    match StoredHash::parse(hash)? {
        StoredHash::Argon2(parsed) => Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()),
        StoredHash::Bcrypt(hash) => bcrypt::verify(password, hash)
            .map_err(|e| FoodhubError::Auth(format!("Unreadable bcrypt hash: {e}"))),
    }
}
