use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod chat;
mod config;
mod error;
mod jwt;
mod middleware;
mod models;
mod repositories;
mod routes;
mod schema;
mod state;
mod storage;
mod validation;

use tokio::net::TcpListener;

use crate::{
    repositories::{
        ActivityRepository, PhotoRepository, TokenRepository, TripRepository, UserRepository,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting PinTrail API");

    let http_config = config::HttpConfig::from_env();

    // Initialize database connection pool
    let db_config = common::database::DatabaseConfig::from_env()?;
    let pool = common::database::init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    schema::init_schema(&pool).await?;

    // Initialize JWT service and object storage
    let jwt_config = jwt::JwtConfig::from_env()?;
    let jwt_service = jwt::JwtService::new(jwt_config);
    let storage = storage::PhotoStorage::from_env().await?;

    // Initialize repositories
    let users = UserRepository::new(pool.clone());
    let trips = TripRepository::new(pool.clone());
    let activities = ActivityRepository::new(pool.clone());
    let photos = PhotoRepository::new(pool.clone());
    let tokens = TokenRepository::new(pool);

    // Revocation records older than the refresh-token lifetime gate nothing.
    let prune_schedule =
        std::env::var("TOKEN_PRUNE_SCHEDULE").unwrap_or_else(|_| "0 0 * * * *".to_string());
    tokens
        .start_pruning(&prune_schedule, jwt_service.refresh_token_expiry())
        .await?;

    let app_state = AppState {
        users,
        trips,
        activities,
        photos,
        tokens,
        jwt: jwt_service,
        storage,
    };

    info!("PinTrail API initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state, &http_config);

    let listener = TcpListener::bind(&http_config.bind_addr).await?;
    info!("PinTrail API listening on {}", http_config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
