//! User document schema
//!
//! Stores account details and the Argon2 password hash. Email is the
//! login key and is unique across the collection.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for users
pub const USER_COLLECTION: &str = "users";

/// User document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(default)]
    pub metadata: Metadata,

    pub name: String,

    pub email: String,

    /// Argon2 PHC hash, never the plaintext
    pub password: String,

    pub location: String,
}

impl UserDoc {
    /// Create a new user document
    pub fn new(name: String, email: String, password_hash: String, location: String) -> Self {
        Self {
            id: None,
            metadata: Metadata::new(),
            name,
            email,
            password: password_hash,
            location,
        }
    }
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "email": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for UserDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
