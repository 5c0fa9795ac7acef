//! HTTP routes for foodhub

pub mod auth_routes;
pub mod catalog;
pub mod health;

pub use auth_routes::{handle_create_user, handle_login};
pub use catalog::{handle_food_categories, handle_food_data, handle_food_items, handle_root};
pub use health::health_check;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;
use tracing::error;

pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

pub(crate) fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) fn empty_body() -> BoxBody {
    full_body(Bytes::new())
}

fn raw_json(status: StatusCode, body: Vec<u8>) -> Response<BoxBody> {
    let mut response = Response::new(full_body(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Serialize `body` as a JSON response
///
/// A serialization failure becomes a 500 with a generic error body.
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<BoxBody> {
    match serde_json::to_vec(body) {
        Ok(json) => raw_json(status, json),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"success":false,"error":"Internal server error"}"#.to_vec(),
            )
        }
    }
}

/// `{"success": false, "error": ..., "path": ...}` response
pub fn error_response(status: StatusCode, error: &str, path: &str) -> Response<BoxBody> {
    json_response(
        status,
        &serde_json::json!({
            "success": false,
            "error": error,
            "path": path,
        }),
    )
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::BoxBody;
    use http_body_util::BodyExt;
    use hyper::Response;

    /// Collect a response body as JSON
    pub async fn body_json(response: Response<BoxBody>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}
