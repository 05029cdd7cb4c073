//! Activity repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    error::ApiResult,
    models::{Activity, NewActivity, UpdateActivity},
};

/// Activity repository
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new activity on an existing trip
    pub async fn create(&self, new_activity: &NewActivity) -> ApiResult<Activity> {
        let row = sqlx::query(
            r#"
            INSERT INTO activities
                (trip_id, name, type, location, cost, rating, notes, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, trip_id, type, name, location, cost, rating, notes, lat, lng
            "#,
        )
        .bind(new_activity.trip_id)
        .bind(&new_activity.name)
        .bind(&new_activity.activity_type)
        .bind(&new_activity.location)
        .bind(new_activity.cost)
        .bind(new_activity.rating)
        .bind(&new_activity.notes)
        .bind(new_activity.lat)
        .bind(new_activity.lng)
        .fetch_one(&self.pool)
        .await?;

        Ok(activity_from_row(&row))
    }

    /// Get all activities
    pub async fn get_all(&self) -> ApiResult<Vec<Activity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, type, name, location, cost, rating, notes, lat, lng
            FROM activities
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(activity_from_row).collect())
    }

    /// Find an activity by ID
    pub async fn find_by_id(&self, id: i32) -> ApiResult<Option<Activity>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, type, name, location, cost, rating, notes, lat, lng
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| activity_from_row(&row)))
    }

    /// Get all activities belonging to a trip
    pub async fn find_by_trip(&self, trip_id: i32) -> ApiResult<Vec<Activity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, type, name, location, cost, rating, notes, lat, lng
            FROM activities
            WHERE trip_id = $1
            ORDER BY id
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(activity_from_row).collect())
    }

    /// Apply a partial update; absent fields keep their stored values
    pub async fn update(&self, id: i32, changes: &UpdateActivity) -> ApiResult<Option<Activity>> {
        let row = sqlx::query(
            r#"
            UPDATE activities SET
                name = COALESCE($2, name),
                type = COALESCE($3, type),
                location = COALESCE($4, location),
                cost = COALESCE($5, cost),
                rating = COALESCE($6, rating),
                notes = COALESCE($7, notes),
                lat = COALESCE($8, lat),
                lng = COALESCE($9, lng)
            WHERE id = $1
            RETURNING id, trip_id, type, name, location, cost, rating, notes, lat, lng
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.activity_type)
        .bind(&changes.location)
        .bind(changes.cost)
        .bind(changes.rating)
        .bind(&changes.notes)
        .bind(changes.lat)
        .bind(changes.lng)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| activity_from_row(&row)))
    }

    /// Delete an activity
    pub async fn delete(&self, id: i32) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn activity_from_row(row: &PgRow) -> Activity {
    Activity {
        id: row.get("id"),
        trip_id: row.get("trip_id"),
        activity_type: row.get("type"),
        name: row.get("name"),
        location: row.get("location"),
        cost: row.get("cost"),
        rating: row.get("rating"),
        notes: row.get("notes"),
        lat: row.get("lat"),
        lng: row.get("lng"),
    }
}
