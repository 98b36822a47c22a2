//! Time entry entity - Represents one tracked block of work.
//!
//! Entries are created either manually (already stopped, with an explicit
//! duration) or by the timer engine (running, duration 0 until stopped).
//! The hourly rate is a snapshot captured when the entry is created and is
//! deliberately decoupled from later client or project rate changes.

use super::client::ClientId;
use super::project::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of a [`TimeEntry`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeEntryId(String);

impl TimeEntryId {
    /// Generates a fresh unique id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeEntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Time entry record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    /// Unique identifier for the entry
    pub id: TimeEntryId,
    /// Project the work was done on
    pub project_id: ProjectId,
    /// Owning client, denormalized from the project
    pub client_id: ClientId,
    /// What was worked on
    pub description: String,
    /// When tracking started
    pub start_time: DateTime<Utc>,
    /// When tracking ended; `None` while the entry is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Tracked duration in whole minutes; 0 while running
    pub duration: i64,
    /// Billing rate snapshot captured at creation, immutable thereafter
    pub hourly_rate: f64,
    /// Whether this entry is the currently running timer
    pub is_running: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent mutation
    pub updated_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Billable amount for this entry: `duration / 60 * hourly_rate`,
    /// evaluated in floating point with no intermediate rounding.
    #[must_use]
    pub fn earnings(&self) -> f64 {
        // Cast safety: durations are minutes of tracked work, far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let hours = self.duration as f64 / 60.0;
        hours * self.hourly_rate
    }
}

/// Caller-supplied fields for creating a manual (already stopped)
/// [`TimeEntry`]. Running entries are only created by the timer engine.
#[derive(Clone, Debug)]
pub struct NewTimeEntry {
    pub project_id: ProjectId,
    pub client_id: ClientId,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: i64,
    pub hourly_rate: f64,
}

/// Partial update for a [`TimeEntry`]. The running flag is owned by the
/// timer engine and cannot be patched here.
#[derive(Clone, Debug, Default)]
pub struct TimeEntryUpdate {
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub hourly_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::TimeZone;

    fn entry(duration: i64, hourly_rate: f64) -> TimeEntry {
        let at = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        TimeEntry {
            id: TimeEntryId::generate(),
            project_id: ProjectId::generate(),
            client_id: ClientId::generate(),
            description: "work".to_string(),
            start_time: at,
            end_time: None,
            duration,
            hourly_rate,
            is_running: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_earnings_ninety_minutes_at_hundred() {
        assert_eq!(entry(90, 100.0).earnings(), 150.0);
    }

    #[test]
    fn test_earnings_zero_duration() {
        assert_eq!(entry(0, 100.0).earnings(), 0.0);
    }

    #[test]
    fn test_earnings_no_intermediate_rounding() {
        // 25 minutes at 85/h = 25/60 * 85
        assert_eq!(entry(25, 85.0).earnings(), 25.0 / 60.0 * 85.0);
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let json = serde_json::to_value(entry(30, 50.0)).unwrap();
        assert!(json.get("projectId").is_some());
        assert!(json.get("startTime").is_some());
        assert!(json.get("hourlyRate").is_some());
        assert!(json.get("isRunning").is_some());
        assert!(json.get("createdAt").is_some());
        // end_time is None and skipped entirely
        assert!(json.get("endTime").is_none());
    }
}
