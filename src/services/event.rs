//! Event service implementation
//!
//! Owns events: creation, updates, the listing/search/filter queries, and the
//! capacity figures the enrollment manager checks before registering anyone.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use validator::Validate;
use crate::database::EventRepository;
use crate::models::event::{Event, EventCategory, EventDetails, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::{CampusEventsError, Result};
use crate::utils::helpers::search_term;
use crate::utils::logging::log_event_action;

const MAX_UPCOMING_LIMIT: i64 = 100;

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        request.validate()?;

        let event = self.events.create(request).await?;
        log_event_action(event.id, "created", Some(&event.title));
        Ok(event)
    }

    pub async fn get_event(&self, id: i64) -> Result<Option<Event>> {
        debug!(event_id = id, "Getting event by ID");
        self.events.find_by_id(id).await
    }

    /// Event with its participant count and remaining spots
    pub async fn get_event_details(&self, id: i64) -> Result<Option<EventDetails>> {
        let Some(event) = self.events.find_by_id(id).await? else {
            return Ok(None);
        };
        let count = self.events.participant_count(id).await?;
        Ok(Some(EventDetails::new(event, count)))
    }

    /// Overwrite an event's mutable fields; `None` if the event does not exist
    pub async fn update_event(&self, id: i64, request: UpdateEventRequest) -> Result<Option<Event>> {
        request.validate()?;

        let updated = self.events.update(id, request).await?;
        match &updated {
            Some(event) => log_event_action(event.id, "updated", None),
            None => debug!(event_id = id, "Update skipped, event not found"),
        }
        Ok(updated)
    }

    /// Delete an event and everything attached to it; `false` if absent
    pub async fn delete_event(&self, id: i64) -> Result<bool> {
        let deleted = self.events.delete(id).await?;
        if deleted {
            log_event_action(id, "deleted", None);
        }
        Ok(deleted)
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.events.list().await
    }

    /// Case-insensitive search over title, description and venue
    ///
    /// A blank query returns every event.
    pub async fn search_events(&self, query: &str) -> Result<Vec<Event>> {
        match search_term(query) {
            Some(term) => {
                debug!(term = %term, "Searching events");
                self.events.search(term).await
            }
            None => self.events.list().await,
        }
    }

    pub async fn events_by_category(&self, category: EventCategory) -> Result<Vec<Event>> {
        self.events.find_by_category(category).await
    }

    /// Events dated within `[start, end]`
    pub async fn events_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>> {
        self.events.find_in_range(start, end).await
    }

    pub async fn upcoming_events(&self, limit: i64) -> Result<Vec<Event>> {
        if !(1..=MAX_UPCOMING_LIMIT).contains(&limit) {
            return Err(CampusEventsError::InvalidInput(format!(
                "Limit must be between 1 and {}",
                MAX_UPCOMING_LIMIT
            )));
        }
        self.events.find_upcoming(Utc::now(), limit).await
    }

    pub async fn participant_count(&self, event_id: i64) -> Result<i64> {
        self.events.participant_count(event_id).await
    }

    /// Whether the event can take another registration; `false` for unknown events
    pub async fn has_available_capacity(&self, event_id: i64) -> Result<bool> {
        let Some(event) = self.events.find_by_id(event_id).await? else {
            return Ok(false);
        };
        let count = self.events.participant_count(event_id).await?;
        let available = event.has_capacity_for(count);

        if !available {
            info!(event_id = event_id, current = count, max_capacity = event.max_capacity, "Event is full");
        }
        Ok(available)
    }

    /// Remaining spots, floored at zero; `0` for unknown events
    pub async fn available_capacity(&self, event_id: i64) -> Result<i64> {
        let Some(event) = self.events.find_by_id(event_id).await? else {
            return Ok(0);
        };
        let count = self.events.participant_count(event_id).await?;
        Ok(event.available_spots(count))
    }
}
