//! Project repository - CRUD over the `"projects"` collection.
//!
//! Creation validates the owning client against the client repository, so
//! a project can never be created against a dangling client id.

use super::{ClientRepo, Collection, Record};
use crate::entities::{ClientId, NewProject, Project, ProjectId, ProjectUpdate};
use crate::errors::{Error, Result};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

impl Record for Project {
    const STORE_KEY: &'static str = "projects";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Repository owning the project collection.
pub struct ProjectRepo {
    collection: Collection<Project>,
}

impl ProjectRepo {
    /// Loads the collection from the store, recovering to empty on
    /// malformed data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: Collection::load(store).await,
        }
    }

    /// Creates a new project after validating that the referenced client
    /// exists and the name is non-empty.
    pub async fn create(&mut self, clients: &ClientRepo, new: NewProject) -> Result<Project> {
        if new.name.trim().is_empty() {
            return Err(Error::validation("project name cannot be empty"));
        }
        if clients.get(&new.client_id).is_none() {
            return Err(Error::ClientNotFound {
                id: new.client_id.to_string(),
            });
        }

        let now = Utc::now();
        let project = Project {
            id: ProjectId::generate(),
            client_id: new.client_id,
            name: new.name.trim().to_string(),
            description: new.description,
            hourly_rate: new.hourly_rate,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.collection.insert(project.clone()).await?;
        info!(id = %project.id, client = %project.client_id, "created project");
        Ok(project)
    }

    /// Merges `updates` into the project with `id` and refreshes
    /// `updated_at`. Silent no-op when the id is absent.
    pub async fn update(&mut self, id: &ProjectId, updates: ProjectUpdate) -> Result<()> {
        self.collection
            .update_with(id.as_str(), |project| {
                if let Some(name) = updates.name {
                    project.name = name;
                }
                if let Some(description) = updates.description {
                    project.description = Some(description);
                }
                if let Some(hourly_rate) = updates.hourly_rate {
                    project.hourly_rate = Some(hourly_rate);
                }
                if let Some(status) = updates.status {
                    project.status = status;
                }
            })
            .await
    }

    /// Removes the project record; time entries referencing it are left in
    /// place. Silent no-op when absent.
    pub async fn delete(&mut self, id: &ProjectId) -> Result<()> {
        self.collection.remove(id.as_str()).await
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.collection.get(id.as_str())
    }

    /// All projects in insertion order.
    pub fn list(&self) -> &[Project] {
        self.collection.items()
    }

    /// All projects owned by `client_id`, read-only.
    pub fn projects_for_client(&self, client_id: &ClientId) -> Vec<&Project> {
        self.collection
            .items()
            .iter()
            .filter(|project| &project.client_id == client_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use crate::entities::ProjectStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_rejects_unknown_client() {
        let mut ws = setup_workspace().await;
        let result = ws
            .projects
            .create(
                &ws.clients,
                NewProject {
                    client_id: ClientId::from("missing"),
                    name: "Website".to_string(),
                    description: None,
                    hourly_rate: None,
                    status: ProjectStatus::Active,
                },
            )
            .await;
        assert!(matches!(result, Err(Error::ClientNotFound { .. })));
        assert!(ws.projects.list().is_empty());
    }

    #[tokio::test]
    async fn test_create_and_query_by_client() -> Result<()> {
        let (mut ws, client) = setup_with_client().await?;
        let other = create_test_client(&mut ws, "Other").await?;

        let website = create_test_project(&mut ws, &client.id, "Website").await?;
        create_test_project(&mut ws, &other.id, "App").await?;

        let for_client = ws.projects.projects_for_client(&client.id);
        assert_eq!(for_client.len(), 1);
        assert_eq!(for_client[0].id, website.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_and_rate_override() -> Result<()> {
        let (mut ws, _client, project) = setup_with_project().await?;
        ws.projects
            .update(
                &project.id,
                ProjectUpdate {
                    status: Some(ProjectStatus::Completed),
                    hourly_rate: Some(200.0),
                    ..ProjectUpdate::default()
                },
            )
            .await?;

        let updated = ws.projects.get(&project.id).unwrap();
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.hourly_rate, Some(200.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_billing_rate_prefers_project_override() -> Result<()> {
        let (mut ws, client) = setup_with_client().await?;
        let flat = create_test_project(&mut ws, &client.id, "Flat").await?;
        assert_eq!(flat.billing_rate(&client), client.hourly_rate);

        ws.projects
            .update(
                &flat.id,
                ProjectUpdate {
                    hourly_rate: Some(250.0),
                    ..ProjectUpdate::default()
                },
            )
            .await?;
        let overridden = ws.projects.get(&flat.id).unwrap();
        assert_eq!(overridden.billing_rate(&client), 250.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_leaves_other_projects() -> Result<()> {
        let (mut ws, client) = setup_with_client().await?;
        let first = create_test_project(&mut ws, &client.id, "First").await?;
        let second = create_test_project(&mut ws, &client.id, "Second").await?;

        ws.projects.delete(&first.id).await?;
        assert!(ws.projects.get(&first.id).is_none());
        assert!(ws.projects.get(&second.id).is_some());
        Ok(())
    }
}
