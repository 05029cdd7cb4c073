//! HTTP routers for the PinTrail API

pub mod activities;
pub mod chat;
pub mod photos;
pub mod trips;
pub mod users;

use axum::{
    Json, Router,
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    config::HttpConfig,
    error::{ApiError, ApiResult},
    models::Trip,
    state::AppState,
};

/// Create the router for the PinTrail API
pub fn create_router(state: AppState, config: &HttpConfig) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/chat", post(chat::chat))
        .nest("/users", users::router(state.clone()))
        .nest("/trips", trips::router(state.clone()))
        .nest("/activities", activities::router(state.clone()))
        .nest("/photos", photos::router(state))
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Home endpoint
async fn home() -> &'static str {
    "Welcome to PinTrail API!"
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "pintrail-api"
    }))
}

fn cors_layer(config: &HttpConfig) -> CorsLayer {
    match &config.cors_allowed_origins {
        None => CorsLayer::permissive(),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Fetch a trip and require that `user_id` owns it
pub(crate) async fn trip_owned_by(
    state: &AppState,
    trip_id: i32,
    user_id: i32,
) -> ApiResult<Trip> {
    let trip = state
        .trips
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Trip", trip_id))?;

    if trip.user_id != user_id {
        return Err(ApiError::Forbidden);
    }

    Ok(trip)
}
