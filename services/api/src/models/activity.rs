//! Activity model and related payloads

use serde::{Deserialize, Serialize};

/// Activity entity, always attached to a trip
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: i32,
    pub trip_id: i32,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub name: String,
    pub location: Option<String>,
    pub cost: Option<f64>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// New activity creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub trip_id: i32,
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

/// Activity update payload; only supplied fields change
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub location: Option<String>,
    pub cost: Option<f64>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_keeps_its_wire_name() {
        let activity = Activity {
            id: 1,
            trip_id: 2,
            activity_type: Some("Sightseeing".to_string()),
            name: "Eiffel Tower Visit".to_string(),
            location: Some("Paris".to_string()),
            cost: Some(25.0),
            rating: Some(5),
            notes: None,
            lat: None,
            lng: None,
        };

        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["type"], "Sightseeing");
        assert!(value.get("activity_type").is_none());
    }

    #[test]
    fn test_new_activity_requires_only_name_and_trip() {
        let payload = json!({ "trip_id": 4, "name": "Louvre" });
        let activity: NewActivity = serde_json::from_value(payload).unwrap();
        assert_eq!(activity.trip_id, 4);
        assert_eq!(activity.name, "Louvre");
        assert!(activity.activity_type.is_none());
        assert!(activity.cost.is_none());
    }
}
