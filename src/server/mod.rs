//! HTTP server for foodhub

pub mod cors;
pub mod http;

pub use cors::CorsPolicy;
pub use http::{dispatch, run, AppState};

#[cfg(test)]
pub(crate) use http::test_support::{test_state, test_state_with_catalog, test_state_without_store};
