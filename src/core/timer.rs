//! Timer engine - enforces the single-running-timer invariant.
//!
//! Each entry moves `idle -> running -> stopped`, and `stopped` is
//! terminal. At most one entry across the whole collection is running at
//! any time: starting a timer first transitions every running entry to
//! stopped, so the invariant holds even if a caller forgot to stop the
//! previous timer.
//!
//! Durations truncate to whole minutes (floor of elapsed milliseconds /
//! 60000). The hourly rate is whatever the caller passes - typically
//! [`crate::entities::Project::billing_rate`] - and is snapshotted on the
//! new entry.

use crate::entities::{ClientId, ProjectId, TimeEntry, TimeEntryId};
use crate::errors::{Error, Result};
use crate::repo::{ClientRepo, ProjectRepo, TimeEntryRepo};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Starts a new timer at the current instant. See [`start_timer_at`].
pub async fn start_timer(
    entries: &mut TimeEntryRepo,
    projects: &ProjectRepo,
    clients: &ClientRepo,
    project_id: &ProjectId,
    client_id: &ClientId,
    description: &str,
    hourly_rate: f64,
) -> Result<TimeEntry> {
    start_timer_at(
        entries,
        projects,
        clients,
        project_id,
        client_id,
        description,
        hourly_rate,
        Utc::now(),
    )
    .await
}

/// Starts a new timer at `now`: validates the referenced project and
/// client, stops every running entry, then creates and persists a running
/// entry with duration 0 and the given rate snapshot.
#[allow(clippy::too_many_arguments)]
pub async fn start_timer_at(
    entries: &mut TimeEntryRepo,
    projects: &ProjectRepo,
    clients: &ClientRepo,
    project_id: &ProjectId,
    client_id: &ClientId,
    description: &str,
    hourly_rate: f64,
    now: DateTime<Utc>,
) -> Result<TimeEntry> {
    if projects.get(project_id).is_none() {
        return Err(Error::ProjectNotFound {
            id: project_id.to_string(),
        });
    }
    if clients.get(client_id).is_none() {
        return Err(Error::ClientNotFound {
            id: client_id.to_string(),
        });
    }

    let stopped = entries.stop_all_running_at(now).await?;
    if stopped > 0 {
        debug!(stopped, "closed running timers before starting a new one");
    }

    let entry = TimeEntry {
        id: TimeEntryId::generate(),
        project_id: project_id.clone(),
        client_id: client_id.clone(),
        description: description.to_string(),
        start_time: now,
        end_time: None,
        duration: 0,
        hourly_rate,
        is_running: true,
        created_at: now,
        updated_at: now,
    };
    entries.insert_entry(entry.clone()).await?;
    info!(id = %entry.id, project = %entry.project_id, "started timer");
    Ok(entry)
}

/// Stops the timer with `id` at the current instant. See [`stop_timer_at`].
pub async fn stop_timer(entries: &mut TimeEntryRepo, id: &TimeEntryId) -> Result<()> {
    stop_timer_at(entries, id, Utc::now()).await
}

/// Stops the timer with `id` at `now`: sets the end time, truncated
/// duration, and refreshed `updated_at`, then persists. Silent no-op when
/// the entry is absent or already stopped.
pub async fn stop_timer_at(
    entries: &mut TimeEntryRepo,
    id: &TimeEntryId,
    now: DateTime<Utc>,
) -> Result<()> {
    entries.stop_entry_at(id, now).await
}

/// The single running entry, or `None`. Read-only O(n) scan; safe to call
/// from a periodic elapsed-time refresh.
pub fn get_running_timer(entries: &TimeEntryRepo) -> Option<&TimeEntry> {
    entries.running_entry()
}
