use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact form submission. Rows are never updated, only deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    /// Assigned by the DB actor at insert time.
    pub timestamp: DateTime<Utc>,
}

/// Insert payload; identity and timestamp are assigned by storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
