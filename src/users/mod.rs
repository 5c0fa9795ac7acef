//! Credential store adapter
//!
//! A `UserStore` creates and looks up users by email. The MongoDB store is
//! the production backend; the memory store backs tests and local runs.

mod memory;
mod mongo;

pub use memory::MemoryUserStore;
pub use mongo::MongoUserStore;

use crate::types::FoodhubError;

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Store-assigned identifier (hex ObjectId)
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC hash
    pub password_hash: String,
    pub location: String,
}

/// A user ready to be persisted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub location: String,
}

/// Create/find operations over the users collection, keyed by email
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return it with its assigned id
    ///
    /// Fails with [`FoodhubError::Conflict`] when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<StoredUser, FoodhubError>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, FoodhubError>;
}
