//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "event_category")]
pub enum EventCategory {
    Academic,
    Workshop,
    Seminar,
    Conference,
    Sports,
    Cultural,
    Social,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Academic => "Academic",
            EventCategory::Workshop => "Workshop",
            EventCategory::Seminar => "Seminar",
            EventCategory::Conference => "Conference",
            EventCategory::Sports => "Sports",
            EventCategory::Cultural => "Cultural",
            EventCategory::Social => "Social",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub event_date: DateTime<Utc>,
    pub max_capacity: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub category: EventCategory,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether another registration fits given the current participant count
    pub fn has_capacity_for(&self, current_participants: i64) -> bool {
        current_participants < i64::from(self.max_capacity)
    }

    /// Remaining spots, never negative
    pub fn available_spots(&self, current_participants: i64) -> i64 {
        (i64::from(self.max_capacity) - current_participants).max(0)
    }
}

/// Event together with its derived capacity figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetails {
    #[serde(flatten)]
    pub event: Event,
    pub current_participants: i64,
    pub available_spots: i64,
    pub has_available_spots: bool,
}

impl EventDetails {
    pub fn new(event: Event, current_participants: i64) -> Self {
        let available_spots = event.available_spots(current_participants);
        let has_available_spots = event.has_capacity_for(current_participants);
        Self {
            event,
            current_participants,
            available_spots,
            has_available_spots,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 3, max = 200, message = "Title must be between 3 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 2, max = 300, message = "Venue must be between 2 and 300 characters"))]
    pub venue: String,
    pub event_date: DateTime<Utc>,
    #[validate(range(min = 1, max = 10000, message = "Capacity must be between 1 and 10000"))]
    pub max_capacity: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub category: EventCategory,
}

/// Updates overwrite every mutable field, so they share the creation shape
pub type UpdateEventRequest = CreateEventRequest;

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with_capacity(max_capacity: i32) -> Event {
        let now = Utc::now();
        Event {
            id: 1,
            title: "Robotics Workshop".to_string(),
            description: None,
            venue: "Hall B".to_string(),
            event_date: now,
            max_capacity,
            registration_deadline: None,
            category: EventCategory::Workshop,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_capacity_boundaries() {
        let event = event_with_capacity(3);
        assert!(event.has_capacity_for(2));
        assert!(!event.has_capacity_for(3));
        assert_eq!(event.available_spots(2), 1);
        assert_eq!(event.available_spots(3), 0);
        assert_eq!(event.available_spots(7), 0);
    }

    #[test]
    fn test_event_details_flattens_event() {
        let details = EventDetails::new(event_with_capacity(10), 4);
        assert_eq!(details.available_spots, 6);
        assert!(details.has_available_spots);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["title"], "Robotics Workshop");
        assert_eq!(json["current_participants"], 4);
        assert_eq!(json["category"], "Workshop");
    }

    #[test]
    fn test_create_request_validation() {
        let mut request = CreateEventRequest {
            title: "AI".to_string(),
            description: None,
            venue: "Main Auditorium".to_string(),
            event_date: Utc::now(),
            max_capacity: 0,
            registration_deadline: None,
            category: EventCategory::Seminar,
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("max_capacity"));

        request.title = "AI Ethics".to_string();
        request.max_capacity = 10_000;
        assert!(request.validate().is_ok());
    }
}
