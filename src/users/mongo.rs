//! MongoDB-backed user store

use bson::doc;

use super::{NewUser, StoredUser, UserStore};
use crate::db::schemas::{UserDoc, USER_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::FoodhubError;

/// User store over the `users` collection
pub struct MongoUserStore {
    collection: MongoCollection<UserDoc>,
}

impl MongoUserStore {
    /// Open the users collection and ensure the unique email index
    pub async fn new(mongo: &MongoClient) -> Result<Self, FoodhubError> {
        let collection = mongo.collection::<UserDoc>(USER_COLLECTION).await?;
        Ok(Self { collection })
    }
}

fn to_stored(user: UserDoc) -> Result<StoredUser, FoodhubError> {
    let id = user
        .id
        .ok_or_else(|| FoodhubError::Database("User document without _id".into()))?;

    Ok(StoredUser {
        id: id.to_hex(),
        name: user.name,
        email: user.email,
        password_hash: user.password,
        location: user.location,
    })
}

#[async_trait::async_trait]
impl UserStore for MongoUserStore {
    async fn create(&self, user: NewUser) -> Result<StoredUser, FoodhubError> {
        let doc = UserDoc::new(user.name, user.email, user.password_hash, user.location);
        let mut saved = doc.clone();

        let id = self.collection.insert_one(doc).await?;
        saved.id = Some(id);

        to_stored(saved)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, FoodhubError> {
        self.collection
            .find_one(doc! { "email": email })
            .await?
            .map(to_stored)
            .transpose()
    }
}
