//! User model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// service. Outward-facing code goes through [`UserResponse`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// New user registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// User login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Outward representation of a user
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_has_no_password_material() {
        let user = User {
            id: 1,
            username: "johndoe".to_string(),
            email: "johndoe@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            created_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let body = serde_json::to_string(&response).unwrap();
        assert!(!body.contains("argon2"));
        assert!(!body.contains("password"));
        assert!(body.contains("johndoe@example.com"));
    }

    #[test]
    fn test_update_user_defaults_to_no_changes() {
        let update: UpdateUser = serde_json::from_str("{}").unwrap();
        assert!(update.username.is_none());
        assert!(update.email.is_none());
    }
}
