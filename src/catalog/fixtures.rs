//! Bundled fallback catalog
//!
//! Served when the database is unreachable or its collections are empty.

use serde_json::Value;

use crate::types::FoodhubError;

const FOOD_ITEMS_JSON: &str = include_str!("../../fixtures/food_items.json");
const FOOD_CATEGORY_JSON: &str = include_str!("../../fixtures/food_category.json");

/// Static item and category documents
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub items: Vec<Value>,
    pub categories: Vec<Value>,
}

impl Fixtures {
    pub fn new(items: Vec<Value>, categories: Vec<Value>) -> Self {
        Self { items, categories }
    }

    /// Parse the fixtures compiled into the binary
    pub fn bundled() -> Result<Self, FoodhubError> {
        let items: Vec<Value> = serde_json::from_str(FOOD_ITEMS_JSON)
            .map_err(|e| FoodhubError::Internal(format!("Invalid food item fixture: {}", e)))?;
        let categories: Vec<Value> = serde_json::from_str(FOOD_CATEGORY_JSON)
            .map_err(|e| FoodhubError::Internal(format!("Invalid food category fixture: {}", e)))?;

        Ok(Self { items, categories })
    }
}
