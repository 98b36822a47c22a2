//! Time entry repository - CRUD over the `"timeEntries"` collection.
//!
//! Manual entries are created here (already stopped, explicit duration);
//! running entries and the running-to-stopped transition belong to the
//! timer engine in [`crate::core::timer`], which drives the `pub(crate)`
//! transition helpers below.

use super::{ClientRepo, Collection, ProjectRepo, Record};
use crate::entities::{ClientId, NewTimeEntry, ProjectId, TimeEntry, TimeEntryId, TimeEntryUpdate};
use crate::errors::{Error, Result};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

impl Record for TimeEntry {
    const STORE_KEY: &'static str = "timeEntries";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Stops a single entry in place. Shared by the stop-one and stop-all
/// transitions so the duration rule lives in exactly one spot.
fn transition_to_stopped(entry: &mut TimeEntry, now: DateTime<Utc>) {
    entry.is_running = false;
    entry.end_time = Some(now);
    // Whole minutes, truncated (floor of elapsed milliseconds / 60000).
    entry.duration = (now - entry.start_time).num_minutes();
    entry.updated_at = now;
}

/// Repository owning the time entry collection.
pub struct TimeEntryRepo {
    collection: Collection<TimeEntry>,
}

impl TimeEntryRepo {
    /// Loads the collection from the store, recovering to empty on
    /// malformed data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: Collection::load(store).await,
        }
    }

    /// Creates a manual, already-stopped entry after validating that both
    /// the project and the (denormalized) client exist and the duration is
    /// not negative.
    pub async fn create(
        &mut self,
        projects: &ProjectRepo,
        clients: &ClientRepo,
        new: NewTimeEntry,
    ) -> Result<TimeEntry> {
        if projects.get(&new.project_id).is_none() {
            return Err(Error::ProjectNotFound {
                id: new.project_id.to_string(),
            });
        }
        if clients.get(&new.client_id).is_none() {
            return Err(Error::ClientNotFound {
                id: new.client_id.to_string(),
            });
        }
        if new.duration < 0 {
            return Err(Error::validation("duration cannot be negative"));
        }

        let now = Utc::now();
        let entry = TimeEntry {
            id: TimeEntryId::generate(),
            project_id: new.project_id,
            client_id: new.client_id,
            description: new.description,
            start_time: new.start_time,
            end_time: new.end_time,
            duration: new.duration,
            hourly_rate: new.hourly_rate,
            is_running: false,
            created_at: now,
            updated_at: now,
        };
        self.collection.insert(entry.clone()).await?;
        info!(id = %entry.id, minutes = entry.duration, "created time entry");
        Ok(entry)
    }

    /// Merges `updates` into the entry with `id` and refreshes
    /// `updated_at`. Silent no-op when the id is absent.
    pub async fn update(&mut self, id: &TimeEntryId, updates: TimeEntryUpdate) -> Result<()> {
        self.collection
            .update_with(id.as_str(), |entry| {
                if let Some(description) = updates.description {
                    entry.description = description;
                }
                if let Some(start_time) = updates.start_time {
                    entry.start_time = start_time;
                }
                if let Some(end_time) = updates.end_time {
                    entry.end_time = Some(end_time);
                }
                if let Some(duration) = updates.duration {
                    entry.duration = duration;
                }
                if let Some(hourly_rate) = updates.hourly_rate {
                    entry.hourly_rate = hourly_rate;
                }
            })
            .await
    }

    /// Removes the entry with `id`. Silent no-op when absent. Invoices
    /// referencing the entry keep their frozen totals.
    pub async fn delete(&mut self, id: &TimeEntryId) -> Result<()> {
        self.collection.remove(id.as_str()).await
    }

    pub fn get(&self, id: &TimeEntryId) -> Option<&TimeEntry> {
        self.collection.get(id.as_str())
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[TimeEntry] {
        self.collection.items()
    }

    /// All entries tracked against `project_id`, read-only.
    pub fn entries_for_project(&self, project_id: &ProjectId) -> Vec<&TimeEntry> {
        self.collection
            .items()
            .iter()
            .filter(|entry| &entry.project_id == project_id)
            .collect()
    }

    /// All entries tracked for `client_id`, read-only.
    pub fn entries_for_client(&self, client_id: &ClientId) -> Vec<&TimeEntry> {
        self.collection
            .items()
            .iter()
            .filter(|entry| &entry.client_id == client_id)
            .collect()
    }

    /// The single running entry, if any. O(n) scan, read-only.
    pub fn running_entry(&self) -> Option<&TimeEntry> {
        self.collection.items().iter().find(|entry| entry.is_running)
    }

    /// Appends a timer-engine-built entry (the only path that may insert a
    /// running entry).
    pub(crate) async fn insert_entry(&mut self, entry: TimeEntry) -> Result<()> {
        self.collection.insert(entry).await
    }

    /// Transitions every running entry to stopped at `now` and persists
    /// once if anything changed. Returns how many entries were stopped.
    pub(crate) async fn stop_all_running_at(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let mut stopped = 0;
        for entry in self.collection.items_mut() {
            if entry.is_running {
                transition_to_stopped(entry, now);
                stopped += 1;
            }
        }
        if stopped > 0 {
            self.collection.persist().await?;
        }
        Ok(stopped)
    }

    /// Transitions the entry with `id` to stopped at `now`, if it exists
    /// and is running. Silent no-op otherwise.
    pub(crate) async fn stop_entry_at(&mut self, id: &TimeEntryId, now: DateTime<Utc>) -> Result<()> {
        let Some(entry) = self
            .collection
            .items_mut()
            .iter_mut()
            .find(|entry| entry.id == *id && entry.is_running)
        else {
            return Ok(());
        };
        transition_to_stopped(entry, now);
        self.collection.persist().await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_manual_entry_requires_existing_parents() -> Result<()> {
        let (mut ws, client, project) = setup_with_project().await?;

        let bad_project = ws
            .time_entries
            .create(
                &ws.projects,
                &ws.clients,
                NewTimeEntry {
                    project_id: ProjectId::from("missing"),
                    client_id: client.id.clone(),
                    description: "work".to_string(),
                    start_time: Utc::now(),
                    end_time: None,
                    duration: 30,
                    hourly_rate: 100.0,
                },
            )
            .await;
        assert!(matches!(bad_project, Err(Error::ProjectNotFound { .. })));

        let bad_client = ws
            .time_entries
            .create(
                &ws.projects,
                &ws.clients,
                NewTimeEntry {
                    project_id: project.id.clone(),
                    client_id: ClientId::from("missing"),
                    description: "work".to_string(),
                    start_time: Utc::now(),
                    end_time: None,
                    duration: 30,
                    hourly_rate: 100.0,
                },
            )
            .await;
        assert!(matches!(bad_client, Err(Error::ClientNotFound { .. })));
        assert!(ws.time_entries.list().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_manual_entry_is_created_stopped() -> Result<()> {
        let (mut ws, _client, project) = setup_with_project().await?;
        let start = Utc::now() - Duration::minutes(45);
        let entry = ws
            .time_entries
            .create(
                &ws.projects,
                &ws.clients,
                NewTimeEntry {
                    project_id: project.id.clone(),
                    client_id: project.client_id.clone(),
                    description: "retro logged".to_string(),
                    start_time: start,
                    end_time: Some(start + Duration::minutes(45)),
                    duration: 45,
                    hourly_rate: 100.0,
                },
            )
            .await?;

        assert!(!entry.is_running);
        assert_eq!(entry.duration, 45);
        assert!(ws.time_entries.running_entry().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_negative_duration_rejected() -> Result<()> {
        let (mut ws, _client, project) = setup_with_project().await?;
        let result = ws
            .time_entries
            .create(
                &ws.projects,
                &ws.clients,
                NewTimeEntry {
                    project_id: project.id.clone(),
                    client_id: project.client_id.clone(),
                    description: "bad".to_string(),
                    start_time: Utc::now(),
                    end_time: None,
                    duration: -5,
                    hourly_rate: 100.0,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_queries_by_project_and_client() -> Result<()> {
        let (mut ws, client, project) = setup_with_project().await?;
        let other_project = create_test_project(&mut ws, &client.id, "Other").await?;

        create_test_entry(&mut ws, &project, 30).await?;
        create_test_entry(&mut ws, &other_project, 60).await?;

        assert_eq!(ws.time_entries.entries_for_project(&project.id).len(), 1);
        assert_eq!(ws.time_entries.entries_for_client(&client.id).len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_rate_snapshot_is_caller_controlled() -> Result<()> {
        // The stored rate only changes when explicitly patched; client or
        // project rate changes never reach existing entries.
        let (mut ws, client, project) = setup_with_project().await?;
        let entry = create_test_entry(&mut ws, &project, 60).await?;

        ws.clients
            .update(
                &client.id,
                crate::entities::ClientUpdate {
                    hourly_rate: Some(999.0),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(ws.time_entries.get(&entry.id).unwrap().hourly_rate, 100.0);

        ws.time_entries
            .update(
                &entry.id,
                TimeEntryUpdate {
                    hourly_rate: Some(110.0),
                    ..Default::default()
                },
            )
            .await?;
        assert_eq!(ws.time_entries.get(&entry.id).unwrap().hourly_rate, 110.0);
        Ok(())
    }
}
