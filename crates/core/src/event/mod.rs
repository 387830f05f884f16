//! Company events that staff are rostered onto.

use chrono::{NaiveDate, NaiveTime};
use expensa_shared::types::{EventId, UserId};
use serde::{Deserialize, Serialize};

/// An event record. Read-only to this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID.
    pub id: EventId,
    /// Display name.
    pub event_name: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Daily start time.
    pub start_time: NaiveTime,
    /// Daily end time.
    pub end_time: NaiveTime,
    /// Free-text description.
    pub description: String,
    /// Venue.
    pub location: String,
    /// Free-form status label, e.g. `upcoming`.
    pub status: String,
    /// Users rostered onto the event.
    pub staff: Vec<UserId>,
}
