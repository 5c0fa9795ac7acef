//! HTTP routes for accounts
//!
//! - POST /api/createuser - Create an account
//! - POST /api/login      - Authenticate and get a token

use bytes::Bytes;
use hyper::{Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use super::{json_response, BoxBody};
use crate::auth::FieldViolation;
use crate::server::AppState;
use crate::services::{AuthError, LoginRequest, SignupRequest, UserSummary};

#[derive(Debug, Serialize)]
struct ValidationErrorResponse<'a> {
    success: bool,
    errors: &'a [FieldViolation],
}

#[derive(Debug, Serialize)]
struct MessageResponse<'a> {
    success: bool,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct CreatedResponse<'a> {
    success: bool,
    message: &'a str,
    user: UserSummary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse<'a> {
    success: bool,
    message: &'a str,
    auth_token: String,
}

/// Parse a JSON request body, reporting failure as a `body` field violation
fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AuthError> {
    serde_json::from_slice(body).map_err(|_| {
        AuthError::Validation(vec![FieldViolation {
            field: "body".into(),
            message: "Request body must be a JSON object with string fields".into(),
        }])
    })
}

/// Render an auth failure; `storage_message` replaces any internal cause
fn auth_error_response(err: AuthError, storage_message: &str) -> Response<BoxBody> {
    let status = err.status_code();
    match err {
        AuthError::Validation(errors) => json_response(
            status,
            &ValidationErrorResponse {
                success: false,
                errors: &errors,
            },
        ),
        AuthError::DuplicateEmail | AuthError::InvalidCredentials => json_response(
            status,
            &MessageResponse {
                success: false,
                message: &err.to_string(),
            },
        ),
        AuthError::Storage(_) => json_response(
            status,
            &MessageResponse {
                success: false,
                message: storage_message,
            },
        ),
    }
}

/// POST /api/createuser
pub async fn handle_create_user(body: Bytes, state: &AppState) -> Response<BoxBody> {
    const STORAGE_MESSAGE: &str = "Failed to create user";

    let request: SignupRequest = match parse_json_body(&body) {
        Ok(r) => r,
        Err(e) => return auth_error_response(e, STORAGE_MESSAGE),
    };

    match state.auth.signup(request).await {
        Ok(user) => json_response(
            StatusCode::CREATED,
            &CreatedResponse {
                success: true,
                message: "User created successfully",
                user,
            },
        ),
        Err(e) => auth_error_response(e, STORAGE_MESSAGE),
    }
}

/// POST /api/login
pub async fn handle_login(body: Bytes, state: &AppState) -> Response<BoxBody> {
    const STORAGE_MESSAGE: &str = "Failed to log in user";

    let request: LoginRequest = match parse_json_body(&body) {
        Ok(r) => r,
        Err(e) => return auth_error_response(e, STORAGE_MESSAGE),
    };

    match state.auth.login(request).await {
        Ok(auth_token) => json_response(
            StatusCode::OK,
            &LoginResponse {
                success: true,
                message: "Login successful",
                auth_token,
            },
        ),
        Err(e) => auth_error_response(e, STORAGE_MESSAGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_util::body_json;
    use crate::server::test_state;

    fn signup_body(email: &str) -> Bytes {
        Bytes::from(
            serde_json::json!({
                "name": "Kiran",
                "email": email,
                "password": "pav-bhaji",
                "location": "Mumbai",
            })
            .to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_user() {
        let state = test_state();
        let response = handle_create_user(signup_body("kiran@example.com"), &state).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["user"]["email"], "kiran@example.com");
        assert_eq!(body["user"]["location"], "Mumbai");
        assert!(body["user"]["id"].as_str().is_some());
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate() {
        let state = test_state();
        handle_create_user(signup_body("twice@example.com"), &state).await;
        let response = handle_create_user(signup_body("twice@example.com"), &state).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email already exists");
    }

    #[tokio::test]
    async fn test_create_user_validation_errors() {
        let state = test_state();
        let body = Bytes::from(r#"{"name":"Jo","email":"jo@example.com","password":"abc"}"#);
        let response = handle_create_user(body, &state).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["name", "password", "location"]);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let state = test_state();
        let response = handle_create_user(Bytes::from("not json"), &state).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let state = test_state();
        let created = body_json(handle_create_user(signup_body("in@example.com"), &state).await).await;

        let response = handle_login(
            Bytes::from(r#"{"email":"in@example.com","password":"pav-bhaji"}"#),
            &state,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Login successful");
        let token = body["authToken"].as_str().unwrap();
        let claims = state.auth.issuer().verify(token).unwrap();
        assert_eq!(claims.user.id, created["user"]["id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let state = test_state();
        handle_create_user(signup_body("real@example.com"), &state).await;

        let wrong_password = handle_login(
            Bytes::from(r#"{"email":"real@example.com","password":"wrong-one"}"#),
            &state,
        )
        .await;
        let unknown_email = handle_login(
            Bytes::from(r#"{"email":"ghost@example.com","password":"pav-bhaji"}"#),
            &state,
        )
        .await;

        assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(wrong_password).await, body_json(unknown_email).await);
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic() {
        let state = crate::server::test_state_without_store();
        let response = handle_create_user(signup_body("x@example.com"), &state).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Failed to create user");

        let response = handle_login(
            Bytes::from(r#"{"email":"x@example.com","password":"pav-bhaji"}"#),
            &state,
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Failed to log in user");
    }
}
