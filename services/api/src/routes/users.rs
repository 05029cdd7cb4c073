//! User registration, authentication, and account routes

use axum::{
    Extension, Json, Router, middleware,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult, AuthCause},
    jwt::TokenType,
    middleware::{AuthUser, auth_middleware},
    models::{LoginCredentials, NewUser, UpdateUser, UserResponse},
    state::AppState,
    validation::{require_fields, validate_email, validate_username},
};

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Create the router for user routes
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", post(register).get(list_users))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .merge(protected)
        .with_state(state)
}

/// Register a new user
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    require_fields(&payload, &["username", "email", "password"])?;
    let new_user: NewUser =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    validate_username(&new_user.username).map_err(ApiError::Validation)?;
    validate_email(&new_user.email).map_err(ApiError::Validation)?;

    let user = state.users.create(&new_user).await?;
    info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "username": user.username,
            "email": user.email,
        })),
    ))
}

/// Exchange credentials for an access and a refresh token
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<impl IntoResponse> {
    require_fields(&payload, &["email", "password"])?;
    let credentials: LoginCredentials =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    let user = state
        .users
        .find_by_email(&credentials.email)
        .await?
        .ok_or(ApiError::Auth(AuthCause::InvalidCredentials))?;

    if !state
        .users
        .verify_password(&user, &credentials.password)
        .await?
    {
        return Err(ApiError::Auth(AuthCause::InvalidCredentials));
    }

    let access_token = state.jwt.generate_access_token(user.id)?;
    let refresh_token = state.jwt.generate_refresh_token(user.id)?;
    info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.jwt.access_token_expiry(),
        user: user.into(),
    }))
}

/// Revoke the access token used on this request
async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    state.tokens.revoke(&auth.jti).await?;
    info!("User {} logged out", auth.id);

    Ok(Json(json!({ "message": "Successfully logged out" })))
}

/// Mint a new access token from a refresh token
async fn refresh(
    State(state): State<AppState>,
    auth: Option<TypedHeader<Authorization<Bearer>>>,
) -> ApiResult<impl IntoResponse> {
    let TypedHeader(auth) = auth.ok_or(ApiError::Auth(AuthCause::MissingToken))?;

    let claims = state.jwt.validate_token(auth.token())?;
    if claims.token_type != TokenType::Refresh {
        return Err(ApiError::Auth(AuthCause::WrongTokenType));
    }
    if state.tokens.is_revoked(&claims.jti).await? {
        return Err(ApiError::Auth(AuthCause::RevokedToken));
    }

    let access_token = state.jwt.generate_access_token(claims.sub)?;
    Ok(Json(json!({
        "access_token": access_token,
        "expires_in": state.jwt.access_token_expiry(),
    })))
}

/// Get the user behind the presented token
async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", auth.id))?;

    Ok(Json(user.into()))
}

/// Get all users
async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.users.get_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID (owner only)
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<UserResponse>> {
    if auth.id != id {
        return Err(ApiError::Forbidden);
    }

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(user.into()))
}

/// Update a user (owner only); only supplied fields change
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<UserResponse>> {
    if auth.id != id {
        return Err(ApiError::Forbidden);
    }

    let changes: UpdateUser =
        serde_json::from_value(payload).map_err(|e| ApiError::Validation(e.to_string()))?;

    if let Some(username) = &changes.username {
        validate_username(username).map_err(ApiError::Validation)?;
    }
    if let Some(email) = &changes.email {
        validate_email(email).map_err(ApiError::Validation)?;
    }

    let user = state
        .users
        .update(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("User", id))?;

    Ok(Json(user.into()))
}

/// Delete a user (owner only); cascades to their trips
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    if auth.id != id {
        return Err(ApiError::Forbidden);
    }

    if state.users.delete(id).await? {
        Ok(Json(json!({ "message": "User deleted" })))
    } else {
        Err(ApiError::not_found("User", id))
    }
}
