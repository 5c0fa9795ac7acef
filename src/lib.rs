//! Foodhub - food discovery backend
//!
//! A small JSON API for a food-ordering frontend.
//!
//! ## Services
//!
//! - **Accounts**: signup with validation, Argon2id password hashes in MongoDB
//! - **Login**: credential check and signed login tokens
//! - **Catalog**: food items and categories, loaded once at startup with a
//!   bundled fixture fallback

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;
pub mod users;

pub use config::Args;
pub use server::{run, AppState};
pub use types::FoodhubError;
