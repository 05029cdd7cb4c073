//! Idempotent creation of the PinTrail database schema
//!
//! Foreign keys carry `ON DELETE CASCADE` so removing a user deletes their
//! trips, and removing a trip deletes its activities and photos.

use sqlx::PgPool;
use tracing::info;

use crate::error::ApiResult;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username VARCHAR(80) UNIQUE NOT NULL,
    email VARCHAR(120) UNIQUE NOT NULL,
    password_hash VARCHAR(512) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

const CREATE_TRIPS: &str = r#"
CREATE TABLE IF NOT EXISTS trips (
    id SERIAL PRIMARY KEY,
    title VARCHAR(100) NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    country VARCHAR(100) NOT NULL,
    city VARCHAR(100) NOT NULL,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    notes TEXT NOT NULL DEFAULT '',
    is_public BOOLEAN NOT NULL DEFAULT TRUE,
    lat DOUBLE PRECISION,
    lng DOUBLE PRECISION
)
"#;

const CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
    id SERIAL PRIMARY KEY,
    trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
    type VARCHAR(50),
    name VARCHAR(100) NOT NULL,
    location VARCHAR(200),
    cost DOUBLE PRECISION,
    rating INTEGER,
    notes TEXT,
    lat DOUBLE PRECISION,
    lng DOUBLE PRECISION
)
"#;

const CREATE_PHOTOS: &str = r#"
CREATE TABLE IF NOT EXISTS photos (
    id SERIAL PRIMARY KEY,
    trip_id INTEGER NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
    url VARCHAR(255) NOT NULL,
    caption VARCHAR(255) NOT NULL DEFAULT ''
)
"#;

const CREATE_TOKEN_BLACKLIST: &str = r#"
CREATE TABLE IF NOT EXISTS token_blacklist (
    id SERIAL PRIMARY KEY,
    jti VARCHAR(120) UNIQUE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Create all tables if they do not exist yet
pub async fn init_schema(pool: &PgPool) -> ApiResult<()> {
    for statement in [
        CREATE_USERS,
        CREATE_TRIPS,
        CREATE_ACTIVITIES,
        CREATE_PHOTOS,
        CREATE_TOKEN_BLACKLIST,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized");
    Ok(())
}
