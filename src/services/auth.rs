//! Account signup and login
//!
//! Signup: validate -> hash -> persist -> summary.
//! Login: validate -> look up -> verify -> issue token.
//!
//! Both are single pass. Store and hashing faults are logged here and
//! reported to callers only as [`AuthError::Storage`], whose public message
//! carries no internal detail.

use hyper::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::{hash_password, verify_password, FieldViolation, TokenIssuer, Violations};
use crate::types::FoodhubError;
use crate::users::{NewUser, StoredUser, UserStore};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_LOCATION_LEN: usize = 3;

/// Signup request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
}

/// Login request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a created user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
}

impl From<StoredUser> for UserSummary {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            location: user.location,
        }
    }
}

/// Auth failures as seen by API callers
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Email already exists")]
    DuplicateEmail,

    /// Same message for unknown email and wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Cause is for logs only
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateEmail | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn validate_signup(req: &SignupRequest) -> Result<(), AuthError> {
    let mut v = Violations::new();
    v.min_length("name", &req.name, MIN_NAME_LEN)
        .email("email", &req.email)
        .min_length("password", &req.password, MIN_PASSWORD_LEN)
        .min_length("location", &req.location, MIN_LOCATION_LEN);
    v.finish().map_err(AuthError::Validation)
}

fn validate_login(req: &LoginRequest) -> Result<(), AuthError> {
    let mut v = Violations::new();
    v.email("email", &req.email)
        .min_length("password", &req.password, MIN_PASSWORD_LEN);
    v.finish().map_err(AuthError::Validation)
}

/// Signup and login over a user store
#[derive(Clone)]
pub struct AuthService {
    /// `None` when the database was unreachable at startup
    users: Option<Arc<dyn UserStore>>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Option<Arc<dyn UserStore>>, issuer: TokenIssuer) -> Self {
        Self { users, issuer }
    }

    /// Whether a user store is attached
    pub fn has_store(&self) -> bool {
        self.users.is_some()
    }

    /// Token issuer used for logins
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    fn store(&self) -> Result<&Arc<dyn UserStore>, AuthError> {
        self.users.as_ref().ok_or_else(|| {
            error!("User store unavailable: no database connection");
            AuthError::Storage("user store unavailable".into())
        })
    }

    /// Create a new account
    pub async fn signup(&self, req: SignupRequest) -> Result<UserSummary, AuthError> {
        validate_signup(&req)?;
        let store = self.store()?;

        let password = req.password;
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                AuthError::Storage(e.to_string())
            })?
            .map_err(|e| {
                error!("Password hashing failed: {}", e);
                AuthError::Storage(e.to_string())
            })?;

        let created = store
            .create(NewUser {
                name: req.name,
                email: req.email.clone(),
                password_hash,
                location: req.location,
            })
            .await
            .map_err(|e| match e {
                FoodhubError::Conflict(_) => {
                    info!("Signup rejected - email already registered: {}", req.email);
                    AuthError::DuplicateEmail
                }
                other => {
                    error!("Error creating user: {}", other);
                    AuthError::Storage(other.to_string())
                }
            })?;

        info!("Created user {} ({})", created.id, created.email);
        Ok(created.into())
    }

    /// Authenticate and issue a token
    pub async fn login(&self, req: LoginRequest) -> Result<String, AuthError> {
        validate_login(&req)?;
        let store = self.store()?;

        let user = match store.find_by_email(&req.email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Login failed - user not found: {}", req.email);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                error!("Error looking up user: {}", e);
                return Err(AuthError::Storage(e.to_string()));
            }
        };

        let password = req.password;
        let hash = user.password_hash.clone();
        let matched = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| {
                error!("Password verification task failed: {}", e);
                AuthError::Storage(e.to_string())
            })?
            .unwrap_or_else(|e| {
                // same answer as a wrong password
                error!("Unreadable password hash for {}: {}", user.email, e);
                false
            });

        if !matched {
            warn!("Login failed - invalid password: {}", req.email);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(&user.id).map_err(|e| {
            error!("Failed to issue token: {}", e);
            AuthError::Storage(e.to_string())
        })?;

        info!("Login successful: {}", user.email);
        Ok(token)
    }
}
