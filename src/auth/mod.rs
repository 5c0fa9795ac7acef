//! Authentication primitives for foodhub
//!
//! Provides:
//! - Password hashing with Argon2
//! - JWT token issuance and verification
//! - Field-level input validation for signup and login

pub mod jwt;
pub mod password;
pub mod validation;

pub use jwt::{Claims, TokenIssuer, UserClaim};
pub use password::{hash_password, verify_password};
pub use validation::{is_valid_email, FieldViolation, Violations};
