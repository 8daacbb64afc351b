use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted rule award for a bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPoints {
    /// `<kind>:<event id>`, e.g. `match:42`
    pub event_key: String,
    pub bet_id: i64,
    pub user_id: i64,
    /// Rule name as used in league configuration
    pub rule: String,
    pub points: i32,
    pub evaluated_at: DateTime<Utc>,
}

/// Per-user totals for the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStanding {
    pub user_id: i64,
    pub points: i64,
}
