//! Startup catalog load
//!
//! Each collection read is independent: one failing does not discard the
//! other. Nothing here is fatal to the process.

use serde_json::Value;
use tracing::{info, warn};

use super::{Catalog, CollectionLoad, Fixtures};
use crate::db::schemas::{FOOD_CATEGORY_COLLECTION, FOOD_ITEMS_COLLECTION};
use crate::types::FoodhubError;

/// Reads whole catalog collections as JSON documents
#[async_trait::async_trait]
pub trait CatalogReader: Send + Sync {
    async fn read_collection(&self, name: &str) -> Result<Vec<Value>, FoodhubError>;
}

async fn load_collection(reader: &dyn CatalogReader, name: &str) -> CollectionLoad {
    match reader.read_collection(name).await {
        Ok(docs) => CollectionLoad::Loaded(docs),
        Err(e) => {
            warn!("Failed to read '{}', serving bundled data: {}", name, e);
            CollectionLoad::Failed {
                reason: e.to_string(),
            }
        }
    }
}

/// Build the catalog from an optional database reader
///
/// `None` means the database connection failed; both collections are
/// marked skipped and queries use the fixtures.
pub async fn load_catalog(reader: Option<&dyn CatalogReader>, fixtures: Fixtures) -> Catalog {
    let Some(reader) = reader else {
        warn!("No database connection - catalog will use bundled data");
        return Catalog::fallback_only(fixtures);
    };

    let items = load_collection(reader, FOOD_ITEMS_COLLECTION).await;
    let categories = load_collection(reader, FOOD_CATEGORY_COLLECTION).await;

    info!(
        "Loaded counts - {}: {} ({}), {}: {} ({})",
        FOOD_ITEMS_COLLECTION,
        items.len(),
        items.status(),
        FOOD_CATEGORY_COLLECTION,
        categories.len(),
        categories.status()
    );

    Catalog::new(items, categories, fixtures)
}
