//! Trip model and related payloads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Activity, Photo};

/// Trip entity
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub id: i32,
    pub title: String,
    pub user_id: i32,
    pub country: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub notes: String,
    pub is_public: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// New trip creation payload
///
/// Activities supplied here are inserted together with the trip in one
/// transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTrip {
    pub title: String,
    pub user_id: i32,
    pub country: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub notes: String,
    pub is_public: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub activities: Vec<NewTripActivity>,
}

/// Activity supplied inline at trip creation; the trip id is not known yet
#[derive(Debug, Clone, Deserialize)]
pub struct NewTripActivity {
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub cost: Option<f64>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Trip update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTrip {
    pub title: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub is_public: Option<bool>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Trip with its embedded child collections
#[derive(Debug, Clone, Serialize)]
pub struct TripDetail {
    pub id: i32,
    pub title: String,
    pub user_id: i32,
    pub country: String,
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub notes: String,
    pub is_public: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub activities: Vec<Activity>,
    pub photos: Vec<Photo>,
}

impl TripDetail {
    pub fn new(trip: Trip, activities: Vec<Activity>, photos: Vec<Photo>) -> Self {
        TripDetail {
            id: trip.id,
            title: trip.title,
            user_id: trip.user_id,
            country: trip.country,
            city: trip.city,
            start_date: trip.start_date,
            end_date: trip.end_date,
            description: trip.description,
            notes: trip.notes,
            is_public: trip.is_public,
            lat: trip.lat,
            lng: trip.lng,
            activities,
            photos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_trip_parses_iso_dates_and_nested_activities() {
        let payload = json!({
            "title": "Test Trip",
            "user_id": 1,
            "country": "France",
            "city": "Paris",
            "start_date": "2024-07-01",
            "end_date": "2024-07-10",
            "description": "d",
            "notes": "n",
            "is_public": true,
            "activities": [
                { "name": "Eiffel Tower Visit", "type": "Sightseeing", "location": "Paris" }
            ]
        });

        let trip: NewTrip = serde_json::from_value(payload).unwrap();
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(trip.end_date, NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        assert_eq!(trip.activities.len(), 1);
        assert_eq!(trip.activities[0].name, "Eiffel Tower Visit");
        assert_eq!(
            trip.activities[0].activity_type.as_deref(),
            Some("Sightseeing")
        );
        assert!(trip.lat.is_none());
    }

    #[test]
    fn test_new_trip_rejects_malformed_dates() {
        let payload = json!({
            "title": "t", "user_id": 1, "country": "c", "city": "c",
            "start_date": "07/01/2024", "end_date": "2024-07-10",
            "description": "d", "notes": "n", "is_public": true
        });

        assert!(serde_json::from_value::<NewTrip>(payload).is_err());
    }

    #[test]
    fn test_update_trip_leaves_absent_fields_unset() {
        let update: UpdateTrip = serde_json::from_value(json!({ "title": "New" })).unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
        assert!(update.city.is_none());
        assert!(update.start_date.is_none());
        assert!(update.is_public.is_none());
    }

    #[test]
    fn test_update_trip_ignores_unknown_keys() {
        let update: UpdateTrip =
            serde_json::from_value(json!({ "title": "New", "owner": "mallory" })).unwrap();
        assert_eq!(update.title.as_deref(), Some("New"));
    }

    #[test]
    fn test_trip_detail_embeds_children() {
        let trip = Trip {
            id: 9,
            title: "Italy Trip".to_string(),
            user_id: 1,
            country: "Italy".to_string(),
            city: "Rome".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
            description: String::new(),
            notes: String::new(),
            is_public: true,
            lat: Some(41.9),
            lng: Some(12.5),
        };

        let detail = TripDetail::new(trip, vec![], vec![]);
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["start_date"], "2024-05-01");
        assert_eq!(value["activities"], json!([]));
        assert_eq!(value["photos"], json!([]));
    }
}
