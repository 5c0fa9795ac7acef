//! Shared types for foodhub

pub mod error;

pub use error::FoodhubError;
