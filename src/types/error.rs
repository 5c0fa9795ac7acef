//! Error types for foodhub

/// Main error type for foodhub infrastructure operations
#[derive(Debug, thiserror::Error)]
pub enum FoodhubError {
    #[error("Database error: {0}")]
    Database(String),

    /// A unique index rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

impl From<std::io::Error> for FoodhubError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for FoodhubError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Auth(format!("JWT error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_internal() {
        let err: FoodhubError =
            std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken").into();
        assert!(matches!(err, FoodhubError::Internal(_)));
        assert_eq!(err.to_string(), "Internal error: port taken");
    }

    #[test]
    fn test_jwt_error_is_auth() {
        let err: FoodhubError =
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidToken).into();
        assert!(matches!(err, FoodhubError::Auth(_)));
        assert!(err.to_string().starts_with("Authentication error: JWT error"));
    }
}
