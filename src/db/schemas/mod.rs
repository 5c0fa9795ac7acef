//! Database schemas for foodhub
//!
//! Defines MongoDB document structures and collection names.

mod metadata;
mod user;

pub use metadata::Metadata;
pub use user::{UserDoc, USER_COLLECTION};

/// Collection holding catalog food items
pub const FOOD_ITEMS_COLLECTION: &str = "food_items";

/// Collection holding catalog food categories
pub const FOOD_CATEGORY_COLLECTION: &str = "food_category";
