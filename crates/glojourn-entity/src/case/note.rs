//! Case note entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An append-only note attached to a case.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CaseNote {
    /// Unique note identifier.
    pub id: Uuid,
    /// The case this note belongs to.
    pub case_id: Uuid,
    /// The user who wrote the note.
    pub author_id: Uuid,
    /// Note content, stored verbatim.
    pub content: String,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
}
