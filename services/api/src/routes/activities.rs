//! Activity routes

use axum::{
    Extension, Json, Router, middleware,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::{Value, json};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    models::{Activity, NewActivity, UpdateActivity},
    routes::trip_owned_by,
    state::AppState,
    validation::require_fields,
};

/// Create the router for activity routes
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", post(create_activity))
        .route("/:id", put(update_activity).delete(delete_activity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(get_activities))
        .route("/:id", get(get_activity))
        .route("/trip/:trip_id", get(get_activities_by_trip))
        .merge(protected)
        .with_state(state)
}

/// Get all activities
async fn get_activities(State(state): State<AppState>) -> ApiResult<Json<Vec<Activity>>> {
    Ok(Json(state.activities.get_all().await?))
}

/// Get an activity by ID
async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Activity>> {
    let activity = state
        .activities
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity", id))?;

    Ok(Json(activity))
}

/// Get all activities of a trip
async fn get_activities_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<i32>,
) -> ApiResult<Json<Vec<Activity>>> {
    Ok(Json(state.activities.find_by_trip(trip_id).await?))
}

/// Create an activity on a trip the caller owns
async fn create_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    require_fields(&payload, &["name", "trip_id"])?;
    let new_activity: NewActivity =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    trip_owned_by(&state, new_activity.trip_id, auth.id).await?;

    let activity = state.activities.create(&new_activity).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Update an activity (trip owner only); only supplied fields change
async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Activity>> {
    let activity = state
        .activities
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity", id))?;
    trip_owned_by(&state, activity.trip_id, auth.id).await?;

    let changes: UpdateActivity =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let activity = state
        .activities
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity", id))?;

    Ok(Json(activity))
}

/// Delete an activity (trip owner only)
async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let activity = state
        .activities
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity", id))?;
    trip_owned_by(&state, activity.trip_id, auth.id).await?;

    if state.activities.delete(id).await? {
        Ok(Json(json!({ "message": "Activity deleted successfully" })))
    } else {
        Err(ApiError::not_found("Activity", id))
    }
}
