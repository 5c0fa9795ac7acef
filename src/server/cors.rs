//! Cross-origin policy
//!
//! A single configured frontend origin may read responses, with credentials.
//! The browser enforces the policy; the server only advertises it.

use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, VARY,
};
use hyper::{Response, StatusCode};

use crate::routes::{empty_body, BoxBody};
use crate::types::FoodhubError;

const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const MAX_AGE_SECS: &str = "86400";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    origin: HeaderValue,
}

impl CorsPolicy {
    pub fn new(origin: &str) -> Result<Self, FoodhubError> {
        let origin = HeaderValue::from_str(origin.trim())
            .map_err(|e| FoodhubError::Config(format!("Invalid CORS origin '{}': {}", origin, e)))?;
        Ok(Self { origin })
    }

    /// Add the policy headers to a response
    pub fn apply(&self, response: &mut Response<BoxBody>) {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(VARY, HeaderValue::from_static("Origin"));
    }

    /// Response to an OPTIONS preflight
    pub fn preflight(&self) -> Response<BoxBody> {
        let mut response = Response::new(empty_body());
        *response.status_mut() = StatusCode::NO_CONTENT;
        self.apply(&mut response);

        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_headers() {
        let policy = CorsPolicy::new("http://localhost:3000").unwrap();
        let mut response = Response::new(empty_body());
        policy.apply(&mut response);

        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[VARY], "Origin");
        assert!(headers.get(ACCESS_CONTROL_ALLOW_METHODS).is_none());
    }

    #[test]
    fn test_preflight() {
        let policy = CorsPolicy::new("https://foodhub.example").unwrap();
        let response = policy.preflight();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "https://foodhub.example");
    }

    #[test]
    fn test_invalid_origin() {
        assert!(CorsPolicy::new("http://bad\norigin").is_err());
    }
}
