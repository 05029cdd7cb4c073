//! Authentication middleware for JWT validation and revocation checks

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{ApiError, AuthCause},
    jwt::TokenType,
    state::AppState,
};

/// Authenticated user information extracted from a validated access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Token subject
    pub id: i32,
    /// The token's own identifier, needed to revoke it at logout
    pub jti: String,
}

/// Extract the bearer token from the Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Reject the request unless it carries a valid, non-revoked access token
///
/// On success the [`AuthUser`] lands in the request extensions for handlers
/// to pick up.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::Auth(AuthCause::MissingToken))?;

    let claims = state.jwt.validate_token(token)?;

    if claims.token_type != TokenType::Access {
        return Err(ApiError::Auth(AuthCause::WrongTokenType));
    }

    if state.tokens.is_revoked(&claims.jti).await? {
        return Err(ApiError::Auth(AuthCause::RevokedToken));
    }

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        jti: claims.jti,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
