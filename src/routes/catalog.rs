//! HTTP routes for the food catalog
//!
//! - GET  /                    - First page of food items (accepts limit/skip)
//! - GET  /api/fooditems       - Page of food items
//! - GET  /api/foodcategories  - All food categories
//! - POST /api/foodData        - `[items, categories]` for the storefront page

use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{json_response, BoxBody};
use crate::catalog::{Listing, Page};
use crate::server::AppState;

#[derive(Debug, Serialize)]
struct DataResponse<'a> {
    success: bool,
    data: &'a [Value],
}

fn listing_response(what: &str, listing: Listing<'_>) -> Response<BoxBody> {
    debug!(
        "Serving {} {} from {:?}",
        listing.data.len(),
        what,
        listing.source
    );
    json_response(
        StatusCode::OK,
        &DataResponse {
            success: true,
            data: listing.data,
        },
    )
}

/// GET /
pub fn handle_root(query: Option<&str>, state: &AppState) -> Response<BoxBody> {
    handle_food_items(query, state)
}

/// GET /api/fooditems
pub fn handle_food_items(query: Option<&str>, state: &AppState) -> Response<BoxBody> {
    let page = Page::from_query(query);
    listing_response("food items", state.catalog.list_items(page))
}

/// GET /api/foodcategories
pub fn handle_food_categories(state: &AppState) -> Response<BoxBody> {
    listing_response("food categories", state.catalog.list_categories())
}

/// POST /api/foodData
///
/// Bare two-element array: the default item page, then every category.
pub fn handle_food_data(state: &AppState) -> Response<BoxBody> {
    let items = state.catalog.list_items(Page::default());
    let categories = state.catalog.list_categories();
    json_response(StatusCode::OK, &(items.data, categories.data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CollectionLoad, Fixtures};
    use crate::routes::test_util::body_json;
    use crate::server::{test_state, test_state_with_catalog};
    use serde_json::json;

    fn live_catalog() -> Catalog {
        let items = (0..5).map(|i| json!({ "name": format!("dish-{i}") })).collect();
        Catalog::new(
            CollectionLoad::Loaded(items),
            CollectionLoad::Loaded(vec![json!({ "CategoryName": "Chaat" })]),
            Fixtures::bundled().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_root_defaults_to_first_fixture_page() {
        let state = test_state();
        let body = body_json(handle_root(None, &state)).await;

        assert_eq!(body["success"], true);
        let data = body["data"].as_array().unwrap();
        let fixtures = Fixtures::bundled().unwrap();
        assert_eq!(data.len(), 12);
        assert_eq!(data[0], fixtures.items[0]);
    }

    #[tokio::test]
    async fn test_food_items_paging_over_live_data() {
        let state = test_state_with_catalog(live_catalog());

        let body = body_json(handle_food_items(Some("limit=2&skip=1"), &state)).await;
        assert_eq!(body["data"], json!([{ "name": "dish-1" }, { "name": "dish-2" }]));

        let body = body_json(handle_food_items(Some("skip=10"), &state)).await;
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_bad_paging_values_use_defaults() {
        let state = test_state_with_catalog(live_catalog());
        let body = body_json(handle_root(Some("limit=lots&skip=-3"), &state)).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_categories() {
        let state = test_state_with_catalog(live_catalog());
        let body = body_json(handle_food_categories(&state)).await;
        assert_eq!(body["data"], json!([{ "CategoryName": "Chaat" }]));

        let fallback = test_state();
        let body = body_json(handle_food_categories(&fallback)).await;
        assert_eq!(
            body["data"].as_array().unwrap().len(),
            Fixtures::bundled().unwrap().categories.len()
        );
    }

    #[tokio::test]
    async fn test_food_data_pair() {
        let state = test_state_with_catalog(live_catalog());
        let body = body_json(handle_food_data(&state)).await;

        let pair = body.as_array().unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].as_array().unwrap().len(), 5);
        assert_eq!(pair[1], json!([{ "CategoryName": "Chaat" }]));
    }
}
