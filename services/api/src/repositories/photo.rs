//! Photo repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    error::ApiResult,
    models::{NewPhoto, Photo, UpdatePhoto},
};

/// Photo repository
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a photo for a trip
    pub async fn create(&self, new_photo: &NewPhoto) -> ApiResult<Photo> {
        let row = sqlx::query(
            r#"
            INSERT INTO photos (trip_id, url, caption)
            VALUES ($1, $2, $3)
            RETURNING id, trip_id, url, caption
            "#,
        )
        .bind(new_photo.trip_id)
        .bind(&new_photo.url)
        .bind(&new_photo.caption)
        .fetch_one(&self.pool)
        .await?;

        Ok(photo_from_row(&row))
    }

    /// Get all photos
    pub async fn get_all(&self) -> ApiResult<Vec<Photo>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, url, caption
            FROM photos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(photo_from_row).collect())
    }

    /// Find a photo by ID
    pub async fn find_by_id(&self, id: i32) -> ApiResult<Option<Photo>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, url, caption
            FROM photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| photo_from_row(&row)))
    }

    /// Get all photos belonging to a trip
    pub async fn find_by_trip(&self, trip_id: i32) -> ApiResult<Vec<Photo>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, url, caption
            FROM photos
            WHERE trip_id = $1
            ORDER BY id
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(photo_from_row).collect())
    }

    /// Apply a partial update; absent fields keep their stored values
    pub async fn update(&self, id: i32, changes: &UpdatePhoto) -> ApiResult<Option<Photo>> {
        let row = sqlx::query(
            r#"
            UPDATE photos SET
                url = COALESCE($2, url),
                caption = COALESCE($3, caption)
            WHERE id = $1
            RETURNING id, trip_id, url, caption
            "#,
        )
        .bind(id)
        .bind(&changes.url)
        .bind(&changes.caption)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| photo_from_row(&row)))
    }

    /// Delete a photo
    pub async fn delete(&self, id: i32) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn photo_from_row(row: &PgRow) -> Photo {
    Photo {
        id: row.get("id"),
        trip_id: row.get("trip_id"),
        url: row.get("url"),
        caption: row.get("caption"),
    }
}
