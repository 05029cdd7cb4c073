//! Photo routes, including the multipart upload endpoint

use axum::{
    Extension, Json, Router, middleware,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::{AuthUser, auth_middleware},
    models::{NewPhoto, Photo, UpdatePhoto},
    routes::trip_owned_by,
    state::AppState,
    storage::{self, MAX_UPLOAD_BYTES},
    validation::require_fields,
};

/// Create the router for photo routes
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", post(create_photo))
        .route("/:id", put(update_photo).delete(delete_photo))
        .route("/upload/:trip_id", post(upload_photo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(get_photos))
        .route("/:id", get(get_photo))
        .route("/trip/:trip_id", get(get_photos_by_trip))
        .merge(protected)
        // The handler enforces MAX_UPLOAD_BYTES itself with a 400; the outer
        // limit only stops runaway bodies.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * 2))
        .with_state(state)
}

/// Get all photos
async fn get_photos(State(state): State<AppState>) -> ApiResult<Json<Vec<Photo>>> {
    Ok(Json(state.photos.get_all().await?))
}

/// Get a photo by ID
async fn get_photo(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<Photo>> {
    let photo = state
        .photos
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;

    Ok(Json(photo))
}

/// Get all photos of a trip
async fn get_photos_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<i32>,
) -> ApiResult<Json<Vec<Photo>>> {
    Ok(Json(state.photos.find_by_trip(trip_id).await?))
}

/// Record a photo by URL on a trip the caller owns
async fn create_photo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    require_fields(&payload, &["url", "trip_id"])?;
    let new_photo: NewPhoto =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    trip_owned_by(&state, new_photo.trip_id, auth.id).await?;

    let photo = state.photos.create(&new_photo).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// Upload a photo file to object storage and record its public URL
///
/// Multipart fields: `file` (required) and `caption` (optional). The file
/// must carry an allow-listed image extension and stay under the size cap;
/// nothing is persisted when either check fails.
async fn upload_photo(
    State(state): State<AppState>,
    Path(trip_id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    trip_owned_by(&state, trip_id, auth.id).await?;

    let mut caption = String::new();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("caption") => {
                caption = field
                    .text()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::Validation("No file selected".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(e.to_string()))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| ApiError::Validation("No file provided".to_string()))?;

    let ext = storage::allowed_extension(&filename)
        .ok_or_else(|| ApiError::Validation("Invalid file type".to_string()))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::Validation("File too large".to_string()));
    }

    let key = storage::object_key(trip_id, &ext);
    let url = state
        .storage
        .upload(&key, storage::content_type_for(&ext), bytes)
        .await?;

    let photo = state
        .photos
        .create(&NewPhoto {
            trip_id,
            url,
            caption,
        })
        .await?;
    info!("Uploaded photo {} for trip {}", photo.id, trip_id);

    Ok((StatusCode::CREATED, Json(photo)))
}

/// Update a photo (trip owner only); only supplied fields change
async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Photo>> {
    let photo = state
        .photos
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    trip_owned_by(&state, photo.trip_id, auth.id).await?;

    let changes: UpdatePhoto =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let photo = state
        .photos
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;

    Ok(Json(photo))
}

/// Delete a photo (trip owner only)
async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let photo = state
        .photos
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Photo", id))?;
    trip_owned_by(&state, photo.trip_id, auth.id).await?;

    if state.photos.delete(id).await? {
        Ok(Json(json!({ "message": "Photo deleted successfully" })))
    } else {
        Err(ApiError::not_found("Photo", id))
    }
}
