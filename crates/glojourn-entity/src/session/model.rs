//! Consultation session entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::SessionStatus;

/// A scheduled consultation between a client and a coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Unique session identifier.
    pub id: Uuid,
    /// The client attending the consultation.
    pub client_id: Uuid,
    /// The coordinator conducting it, if one is linked.
    pub coordinator_id: Option<Uuid>,
    /// The calendar date of the consultation.
    pub scheduled_date: NaiveDate,
    /// The booked time slot (e.g. "10:00-10:30").
    pub time_slot: String,
    /// Booking status.
    pub status: SessionStatus,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Video meeting link.
    pub meeting_link: Option<String>,
    /// Planned duration in minutes.
    pub duration_minutes: Option<i32>,
    /// The staff member who created the booking.
    pub created_by: Uuid,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// The client attending.
    pub client_id: Uuid,
    /// The coordinator conducting, if known at booking time.
    pub coordinator_id: Option<Uuid>,
    /// The calendar date.
    pub scheduled_date: NaiveDate,
    /// The booked time slot.
    pub time_slot: String,
    /// Planned duration in minutes.
    pub duration_minutes: Option<i32>,
    /// The staff member creating the booking.
    pub created_by: Uuid,
}
