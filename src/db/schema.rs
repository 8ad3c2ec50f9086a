//! SQL DDL for initializing the database schema.

/// SQLite schema includes:
/// - `contact_messages` table (one submitted contact form per row)
///
/// `timestamp` is written by the DB actor as whole-second RFC3339 UTC text,
/// so lexical order equals chronological order.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS contact_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    timestamp TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_contact_messages_timestamp ON contact_messages(timestamp);
"#;
