//! MongoDB client and collection wrapper

use bson::{doc, oid::ObjectId, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::db::schemas::Metadata;
use crate::types::FoodhubError;

/// Server error code for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// Trait for schemas with mutable metadata
pub trait MutMetadata {
    fn mut_metadata(&mut self) -> &mut Metadata;
}

/// Whether a driver error is a unique index violation
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and ping the server
    ///
    /// Server selection and connect timeouts are capped so an unreachable
    /// server fails startup quickly instead of hanging.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, FoodhubError> {
        info!("Connecting to MongoDB database '{}'", db_name);

        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| FoodhubError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| FoodhubError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection, applying its indexes
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>, FoodhubError>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Read every document of an untyped collection
    pub async fn fetch_all(&self, name: &str) -> Result<Vec<Document>, FoodhubError> {
        let cursor = self
            .client
            .database(&self.db_name)
            .collection::<Document>(name)
            .find(doc! {})
            .await
            .map_err(|e| FoodhubError::Database(format!("Find on '{}' failed: {}", name, e)))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| FoodhubError::Database(format!("Reading '{}' failed: {}", name, e)))
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes + MutMetadata,
{
    /// Create a new collection and apply indexes
    pub async fn new(
        client: &Client,
        db_name: &str,
        collection_name: &str,
    ) -> Result<Self, FoodhubError> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<(), FoodhubError> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| FoodhubError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, setting metadata timestamps
    ///
    /// A unique index violation surfaces as [`FoodhubError::Conflict`].
    pub async fn insert_one(&self, mut item: T) -> Result<ObjectId, FoodhubError> {
        let now = DateTime::now();
        let metadata = item.mut_metadata();
        metadata.created_at = Some(now);
        metadata.updated_at = Some(now);

        let result = self.inner.insert_one(item).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                FoodhubError::Conflict(e.to_string())
            } else {
                FoodhubError::Database(format!("Insert failed: {}", e))
            }
        })?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| FoodhubError::Database("Failed to get inserted ID".into()))
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, FoodhubError> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| FoodhubError::Database(format!("Find failed: {}", e)))
    }
}
