//! In-memory user store

use bson::oid::ObjectId;
use dashmap::{mapref::entry::Entry, DashMap};

use super::{NewUser, StoredUser, UserStore};
use crate::types::FoodhubError;

/// User store held in a concurrent map keyed by email
///
/// The entry API gives the same first-writer-wins behavior as a unique index.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: DashMap<String, StoredUser>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<StoredUser, FoodhubError> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(FoodhubError::Conflict(format!(
                "duplicate key: email {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                let stored = StoredUser {
                    id: ObjectId::new().to_hex(),
                    name: user.name,
                    email: user.email,
                    password_hash: user.password_hash,
                    location: user.location,
                };
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, FoodhubError> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }
}
