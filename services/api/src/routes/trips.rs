//! Trip routes

use axum::{
    Extension, Json, Router, middleware,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    models::{NewTrip, Trip, TripDetail, UpdateTrip},
    routes::trip_owned_by,
    state::AppState,
    validation::require_fields,
};

const REQUIRED_TRIP_FIELDS: [&str; 9] = [
    "title",
    "user_id",
    "country",
    "city",
    "start_date",
    "end_date",
    "description",
    "notes",
    "is_public",
];

/// Create the router for trip routes
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/add_trip", post(add_trip))
        .route("/user/:user_id", get(get_trips_by_user))
        .route("/:id", put(update_trip).delete(delete_trip))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(get_trips))
        .route("/:id", get(get_trip))
        .merge(protected)
        .with_state(state)
}

/// Create a trip, atomically inserting any nested activities
async fn add_trip(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    require_fields(&payload, &REQUIRED_TRIP_FIELDS)?;
    let new_trip: NewTrip =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    if new_trip.user_id != auth.id {
        return Err(ApiError::Forbidden);
    }

    let detail = state.trips.create(&new_trip).await?;
    info!(
        "Created trip {} with {} activities",
        detail.id,
        detail.activities.len()
    );

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Get all trips, each with its embedded activities and photos
async fn get_trips(State(state): State<AppState>) -> ApiResult<Json<Vec<TripDetail>>> {
    let trips = state.trips.get_all().await?;

    let mut details = Vec::with_capacity(trips.len());
    for trip in trips {
        details.push(load_detail(&state, trip).await?);
    }

    Ok(Json(details))
}

/// Get a single trip by ID
async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<TripDetail>> {
    let trip = state
        .trips
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Trip", id))?;

    Ok(Json(load_detail(&state, trip).await?))
}

/// Get all trips of a user (owner only)
async fn get_trips_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TripDetail>>> {
    if auth.id != user_id {
        return Err(ApiError::Forbidden);
    }

    let trips = state.trips.find_by_user(user_id).await?;

    let mut details = Vec::with_capacity(trips.len());
    for trip in trips {
        details.push(load_detail(&state, trip).await?);
    }

    Ok(Json(details))
}

/// Update a trip (owner only); only supplied fields change
async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<TripDetail>> {
    trip_owned_by(&state, id, auth.id).await?;

    let changes: UpdateTrip =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let trip = state
        .trips
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Trip", id))?;

    Ok(Json(load_detail(&state, trip).await?))
}

/// Delete a trip (owner only); cascades to its activities and photos
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    trip_owned_by(&state, id, auth.id).await?;

    if state.trips.delete(id).await? {
        info!("Deleted trip {}", id);
        Ok(Json(
            json!({ "message": format!("Trip {} deleted successfully.", id) }),
        ))
    } else {
        Err(ApiError::not_found("Trip", id))
    }
}

async fn load_detail(state: &AppState, trip: Trip) -> ApiResult<TripDetail> {
    let activities = state.activities.find_by_trip(trip.id).await?;
    let photos = state.photos.find_by_trip(trip.id).await?;
    Ok(TripDetail::new(trip, activities, photos))
}
