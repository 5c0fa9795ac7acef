//! Application services for foodhub

pub mod auth;

pub use auth::{AuthError, AuthService, LoginRequest, SignupRequest, UserSummary};
