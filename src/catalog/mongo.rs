//! MongoDB catalog reader

use bson::{Bson, Document};
use serde_json::Value;

use super::CatalogReader;
use crate::db::MongoClient;
use crate::types::FoodhubError;

/// Convert a stored document to plain JSON
///
/// Uses relaxed extended JSON, with a top-level `_id` ObjectId flattened to
/// its hex string.
pub fn document_to_json(doc: Document) -> Value {
    let mut value = Bson::Document(doc).into_relaxed_extjson();

    if let Some(obj) = value.as_object_mut() {
        let oid = obj
            .get("_id")
            .and_then(|id| id.get("$oid"))
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(oid) = oid {
            obj.insert("_id".to_string(), Value::String(oid));
        }
    }

    value
}

#[async_trait::async_trait]
impl CatalogReader for MongoClient {
    async fn read_collection(&self, name: &str) -> Result<Vec<Value>, FoodhubError> {
        let docs = self.fetch_all(name).await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }
}
