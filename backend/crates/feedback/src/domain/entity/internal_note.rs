use chrono::{DateTime, Utc};

/// Admin-only annotation on a feedback record. Append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNote {
    pub id: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}
