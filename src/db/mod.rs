//! MongoDB access for foodhub

pub mod mongo;
pub mod schemas;

pub use mongo::{is_duplicate_key_error, IntoIndexes, MongoClient, MongoCollection, MutMetadata};
