//! Foodhub - food discovery backend

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foodhub::{
    auth::TokenIssuer,
    catalog::{load_catalog, CatalogReader, Fixtures},
    config::Args,
    db::MongoClient,
    server::{self, AppState},
    services::AuthService,
    users::{MongoUserStore, UserStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("foodhub={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  Foodhub - food discovery backend");
    info!("======================================");
    info!("Listen: {}", args.listen);
    info!("MongoDB: {} (db: {})", args.redacted_mongodb_uri(), args.mongodb_db);
    info!("CORS origin: {}", args.cors_origin);
    info!("Token lifetime: {}s", args.jwt_expiry_seconds);
    info!("======================================");

    // Database is optional: without it the catalog serves fixtures and
    // account endpoints report storage errors
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => {
            info!("MongoDB connected successfully");
            Some(client)
        }
        Err(e) => {
            warn!("MongoDB connection failed (continuing without): {}", e);
            None
        }
    };

    let users: Option<Arc<dyn UserStore>> = match &mongo {
        Some(client) => match MongoUserStore::new(client).await {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("User store unavailable: {}", e);
                None
            }
        },
        None => None,
    };

    let fixtures = Fixtures::bundled()?;
    let catalog = load_catalog(
        mongo.as_ref().map(|client| client as &dyn CatalogReader),
        fixtures,
    )
    .await;

    let secret = args.jwt_secret.clone().unwrap_or_default();
    let issuer = TokenIssuer::new(secret, args.jwt_expiry_seconds)?;
    let auth = AuthService::new(users, issuer);

    let state = AppState::new(args, catalog, auth)?;
    server::run(Arc::new(state)).await?;

    Ok(())
}
