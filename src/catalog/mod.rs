//! Food catalog: startup load and read-only queries
//!
//! The catalog is built once before the server listens and then shared
//! immutably. Each query picks live data when its collection loaded with at
//! least one document, otherwise the bundled fixture.

pub mod fixtures;
pub mod loader;
pub mod mongo;
pub mod paging;

pub use fixtures::Fixtures;
pub use loader::{load_catalog, CatalogReader};
pub use paging::Page;

use serde::Serialize;
use serde_json::Value;

/// Outcome of loading one collection at startup
#[derive(Debug, Clone)]
pub enum CollectionLoad {
    /// Read succeeded (possibly with zero documents)
    Loaded(Vec<Value>),
    /// Read failed; fixture is used
    Failed { reason: String },
    /// No database connection was available
    Skipped,
}

impl CollectionLoad {
    /// Documents worth serving, if any
    pub fn live(&self) -> Option<&[Value]> {
        match self {
            Self::Loaded(docs) if !docs.is_empty() => Some(docs),
            _ => None,
        }
    }

    /// Number of loaded documents
    pub fn len(&self) -> usize {
        match self {
            Self::Loaded(docs) => docs.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short status label for logs and health output
    pub fn status(&self) -> &'static str {
        match self {
            Self::Loaded(docs) if docs.is_empty() => "empty",
            Self::Loaded(_) => "loaded",
            Self::Failed { .. } => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// Which data answered a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// Query result borrowing from the catalog
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    pub data: &'a [Value],
    pub source: DataSource,
}

/// Items and categories loaded at startup, plus the bundled fallback
#[derive(Debug, Clone)]
pub struct Catalog {
    items: CollectionLoad,
    categories: CollectionLoad,
    fixtures: Fixtures,
}

impl Catalog {
    pub fn new(items: CollectionLoad, categories: CollectionLoad, fixtures: Fixtures) -> Self {
        Self {
            items,
            categories,
            fixtures,
        }
    }

    /// Catalog with no live data; every query uses the fixtures
    pub fn fallback_only(fixtures: Fixtures) -> Self {
        Self::new(CollectionLoad::Skipped, CollectionLoad::Skipped, fixtures)
    }

    pub fn items(&self) -> &CollectionLoad {
        &self.items
    }

    pub fn categories(&self) -> &CollectionLoad {
        &self.categories
    }

    /// One page of food items
    pub fn list_items(&self, page: Page) -> Listing<'_> {
        match self.items.live() {
            Some(docs) => Listing {
                data: page.slice(docs),
                source: DataSource::Live,
            },
            None => Listing {
                data: page.slice(&self.fixtures.items),
                source: DataSource::Fallback,
            },
        }
    }

    /// Every food category
    pub fn list_categories(&self) -> Listing<'_> {
        match self.categories.live() {
            Some(docs) => Listing {
                data: docs,
                source: DataSource::Live,
            },
            None => Listing {
                data: &self.fixtures.categories,
                source: DataSource::Fallback,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs(prefix: &str, n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({ "name": format!("{prefix}-{i}") })).collect()
    }

    fn fixtures() -> Fixtures {
        Fixtures::new(docs("fixture-item", 20), docs("fixture-category", 3))
    }

    #[test]
    fn test_live_items_slice() {
        let catalog = Catalog::new(
            CollectionLoad::Loaded(docs("item", 5)),
            CollectionLoad::Skipped,
            fixtures(),
        );

        let listing = catalog.list_items(Page::new(2, 1));
        assert_eq!(listing.source, DataSource::Live);
        assert_eq!(listing.data, &docs("item", 5)[1..3]);

        let beyond = catalog.list_items(Page::new(12, 10));
        assert_eq!(beyond.source, DataSource::Live);
        assert!(beyond.data.is_empty());
    }

    #[test]
    fn test_empty_live_items_fall_back() {
        let catalog = Catalog::new(
            CollectionLoad::Loaded(Vec::new()),
            CollectionLoad::Loaded(Vec::new()),
            fixtures(),
        );

        let listing = catalog.list_items(Page::default());
        assert_eq!(listing.source, DataSource::Fallback);
        assert_eq!(listing.data, &docs("fixture-item", 20)[..12]);

        let offset = catalog.list_items(Page::new(2, 1));
        assert_eq!(offset.data, &docs("fixture-item", 20)[1..3]);
    }

    #[test]
    fn test_failed_load_falls_back() {
        let catalog = Catalog::new(
            CollectionLoad::Failed {
                reason: "boom".into(),
            },
            CollectionLoad::Failed {
                reason: "boom".into(),
            },
            fixtures(),
        );
        assert_eq!(catalog.list_items(Page::default()).source, DataSource::Fallback);
        assert_eq!(catalog.list_categories().data, &docs("fixture-category", 3)[..]);
    }

    #[test]
    fn test_live_categories_verbatim() {
        let live = vec![json!({ "CategoryName": "Soup" }), json!({ "CategoryName": "Salad" })];
        let catalog = Catalog::new(
            CollectionLoad::Skipped,
            CollectionLoad::Loaded(live.clone()),
            fixtures(),
        );

        let listing = catalog.list_categories();
        assert_eq!(listing.source, DataSource::Live);
        assert_eq!(listing.data, &live[..]);
    }

    #[test]
    fn test_fallback_only() {
        let catalog = Catalog::fallback_only(fixtures());
        assert_eq!(catalog.list_categories().source, DataSource::Fallback);
        assert_eq!(catalog.items().status(), "skipped");
        assert!(catalog.items().is_empty());
    }

    #[test]
    fn test_load_status_labels() {
        assert_eq!(CollectionLoad::Loaded(Vec::new()).status(), "empty");
        assert_eq!(CollectionLoad::Loaded(docs("x", 2)).status(), "loaded");
        assert_eq!(CollectionLoad::Loaded(docs("x", 2)).len(), 2);
        assert_eq!(
            CollectionLoad::Failed { reason: "r".into() }.status(),
            "failed"
        );
    }
}
