//! Trip repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::{
    error::ApiResult,
    models::{Activity, NewTrip, Trip, TripDetail, UpdateTrip},
};

/// Trip repository
#[derive(Clone)]
pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    /// Create a new trip repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a trip together with its nested activities
    ///
    /// The trip row and every activity row commit in one transaction; if an
    /// activity insert fails, the trip does not persist either.
    pub async fn create(&self, new_trip: &NewTrip) -> ApiResult<TripDetail> {
        info!("Creating trip '{}' for user {}", new_trip.title, new_trip.user_id);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO trips
                (title, user_id, country, city, start_date, end_date,
                 description, notes, is_public, lat, lng)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, user_id, country, city, start_date, end_date,
                      description, notes, is_public, lat, lng
            "#,
        )
        .bind(&new_trip.title)
        .bind(new_trip.user_id)
        .bind(&new_trip.country)
        .bind(&new_trip.city)
        .bind(new_trip.start_date)
        .bind(new_trip.end_date)
        .bind(&new_trip.description)
        .bind(&new_trip.notes)
        .bind(new_trip.is_public)
        .bind(new_trip.lat)
        .bind(new_trip.lng)
        .fetch_one(&mut *tx)
        .await?;

        let trip = trip_from_row(&row);

        let mut activities = Vec::with_capacity(new_trip.activities.len());
        for activity in &new_trip.activities {
            let row = sqlx::query(
                r#"
                INSERT INTO activities
                    (trip_id, name, type, location, cost, rating, notes, lat, lng)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id, trip_id, type, name, location, cost, rating, notes, lat, lng
                "#,
            )
            .bind(trip.id)
            .bind(&activity.name)
            .bind(&activity.activity_type)
            .bind(&activity.location)
            .bind(activity.cost)
            .bind(activity.rating)
            .bind(&activity.notes)
            .bind(activity.lat)
            .bind(activity.lng)
            .fetch_one(&mut *tx)
            .await?;

            activities.push(Activity {
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
            });
        }

        tx.commit().await?;

        Ok(TripDetail::new(trip, activities, vec![]))
    }

    /// Get all trips
    pub async fn get_all(&self) -> ApiResult<Vec<Trip>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, user_id, country, city, start_date, end_date,
                   description, notes, is_public, lat, lng
            FROM trips
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(trip_from_row).collect())
    }

    /// Find a trip by ID
    pub async fn find_by_id(&self, id: i32) -> ApiResult<Option<Trip>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, user_id, country, city, start_date, end_date,
                   description, notes, is_public, lat, lng
            FROM trips
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| trip_from_row(&row)))
    }

    /// Get all trips owned by a user
    pub async fn find_by_user(&self, user_id: i32) -> ApiResult<Vec<Trip>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, user_id, country, city, start_date, end_date,
                   description, notes, is_public, lat, lng
            FROM trips
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(trip_from_row).collect())
    }

    /// Apply a partial update; absent fields keep their stored values
    pub async fn update(&self, id: i32, changes: &UpdateTrip) -> ApiResult<Option<Trip>> {
        let row = sqlx::query(
            r#"
            UPDATE trips SET
                title = COALESCE($2, title),
                country = COALESCE($3, country),
                city = COALESCE($4, city),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                description = COALESCE($7, description),
                notes = COALESCE($8, notes),
                is_public = COALESCE($9, is_public),
                lat = COALESCE($10, lat),
                lng = COALESCE($11, lng)
            WHERE id = $1
            RETURNING id, title, user_id, country, city, start_date, end_date,
                      description, notes, is_public, lat, lng
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.country)
        .bind(&changes.city)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(&changes.description)
        .bind(&changes.notes)
        .bind(changes.is_public)
        .bind(changes.lat)
        .bind(changes.lng)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| trip_from_row(&row)))
    }

    /// Delete a trip; cascades to its activities and photos
    pub async fn delete(&self, id: i32) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn trip_from_row(row: &PgRow) -> Trip {
    Trip {
        id: row.get("id"),
        title: row.get("title"),
        user_id: row.get("user_id"),
        country: row.get("country"),
        city: row.get("city"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        description: row.get("description"),
        notes: row.get("notes"),
        is_public: row.get("is_public"),
        lat: row.get("lat"),
        lng: row.get("lng"),
    }
}
