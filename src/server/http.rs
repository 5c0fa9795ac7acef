//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo; one task per accepted connection.

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::catalog::Catalog;
use crate::config::Args;
use crate::routes::{self, error_response, BoxBody};
use crate::server::CorsPolicy;
use crate::services::AuthService;
use crate::types::FoodhubError;

/// Largest accepted request body
pub const MAX_BODY_BYTES: usize = 10 * 1024;

/// Shared application state
///
/// Built once at startup, after the catalog load attempt, and read-only
/// while serving.
pub struct AppState {
    pub args: Args,
    pub catalog: Catalog,
    pub auth: AuthService,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(args: Args, catalog: Catalog, auth: AuthService) -> Result<Self, FoodhubError> {
        let cors = CorsPolicy::new(&args.cors_origin)?;
        Ok(Self {
            args,
            catalog,
            auth,
            cors,
        })
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), FoodhubError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!("foodhub listening on {}", state.args.listen);
    info!("CORS origin: {}", state.args.cors_origin);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Read the request body and hand off to [`dispatch`]
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, Infallible> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    info!("[{}] {} {}", addr, parts.method, path);

    let body = match read_body(&state, &path, body).await {
        Ok(body) => body,
        Err(response) => return Ok(response),
    };

    Ok(dispatch(&state, &parts.method, &path, parts.uri.query(), body).await)
}

/// Collect a request body of at most [`MAX_BODY_BYTES`]
///
/// On failure returns the finished error response: 413 when over the limit,
/// 400 when the body could not be read.
pub async fn read_body<B>(state: &AppState, path: &str, body: B) -> Result<Bytes, Response<BoxBody>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let (status, message) = if e.downcast_ref::<LengthLimitError>().is_some() {
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
            } else {
                warn!("Failed to read body for {}: {}", path, e);
                (StatusCode::BAD_REQUEST, "Failed to read request body")
            };
            let mut response = error_response(status, message, path);
            state.cors.apply(&mut response);
            Err(response)
        }
    }
}

/// Route a request and apply the CORS policy to the response
pub async fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<BoxBody> {
    if *method == Method::OPTIONS {
        return state.cors.preflight();
    }

    let mut response = route(state, method, path, query, body).await;
    state.cors.apply(&mut response);
    response
}

async fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: Bytes,
) -> Response<BoxBody> {
    match (method, path) {
        (&Method::GET, "/") => routes::handle_root(query, state),
        (&Method::GET, "/api/health") => routes::health_check(state),

        (&Method::POST, "/api/createuser") => routes::handle_create_user(body, state).await,
        (&Method::POST, "/api/login") => routes::handle_login(body, state).await,

        (&Method::GET, "/api/fooditems") => routes::handle_food_items(query, state),
        (&Method::GET, "/api/foodcategories") => routes::handle_food_categories(state),
        (&Method::POST, "/api/foodData") => routes::handle_food_data(state),

        (_, "/")
        | (_, "/api/health")
        | (_, "/api/createuser")
        | (_, "/api/login")
        | (_, "/api/fooditems")
        | (_, "/api/foodcategories")
        | (_, "/api/foodData") => {
            error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed", path)
        }

        _ => error_response(StatusCode::NOT_FOUND, "Not Found", path),
    }
}
