//! Shared test utilities for `FreelanceBuddy`.
//!
//! Provides workspace fixtures backed by the in-memory store and helpers
//! for creating test entities with sensible defaults.

use crate::entities::{
    Client, ClientId, InvoiceStatus, NewClient, NewInvoice, NewProject, NewTimeEntry, Project,
    ProjectStatus, TimeEntry, TimeEntryId,
};
use crate::errors::{Error, Result};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::workspace::Workspace;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Creates a workspace backed by a fresh in-memory store.
/// This is the standard setup for all integration tests.
pub async fn setup_workspace() -> Workspace {
    Workspace::load(Arc::new(MemoryStore::new())).await
}

/// Creates a test client with sensible defaults.
///
/// # Defaults
/// * `email`: derived from the name
/// * `hourly_rate`: 100.0
pub async fn create_test_client(ws: &mut Workspace, name: &str) -> Result<Client> {
    ws.clients
        .create(NewClient {
            name: name.to_string(),
            email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
            phone: None,
            company: None,
            address: None,
            hourly_rate: 100.0,
        })
        .await
}

/// Creates a test project for `client_id` with sensible defaults
/// (active, no description, no rate override).
pub async fn create_test_project(
    ws: &mut Workspace,
    client_id: &ClientId,
    name: &str,
) -> Result<Project> {
    ws.projects
        .create(
            &ws.clients,
            NewProject {
                client_id: client_id.clone(),
                name: name.to_string(),
                description: None,
                hourly_rate: None,
                status: ProjectStatus::Active,
            },
        )
        .await
}

/// Creates a stopped test entry on `project` with the given duration in
/// minutes at a rate of 100.0/h, started `minutes` ago.
pub async fn create_test_entry(
    ws: &mut Workspace,
    project: &Project,
    minutes: i64,
) -> Result<TimeEntry> {
    let end = Utc::now();
    let start = end - Duration::minutes(minutes);
    ws.time_entries
        .create(
            &ws.projects,
            &ws.clients,
            NewTimeEntry {
                project_id: project.id.clone(),
                client_id: project.client_id.clone(),
                description: "Test work".to_string(),
                start_time: start,
                end_time: Some(end),
                duration: minutes,
                hourly_rate: 100.0,
            },
        )
        .await
}

/// Builds a `NewInvoice` draft for `client_id` with the given subtotal,
/// no tax, a due date 30 days out, and one placeholder entry reference.
pub fn test_invoice(client_id: &ClientId, subtotal: f64) -> NewInvoice {
    let now = Utc::now();
    NewInvoice {
        client_id: client_id.clone(),
        invoice_number: "INV-000000".to_string(),
        status: InvoiceStatus::Draft,
        issue_date: now,
        due_date: now + Duration::days(30),
        paid_date: None,
        subtotal,
        tax: 0.0,
        total: subtotal,
        time_entries: vec![TimeEntryId::from("entry-1")],
    }
}

/// Sets up a workspace with one client.
/// Returns (workspace, client) for common test scenarios.
pub async fn setup_with_client() -> Result<(Workspace, Client)> {
    let mut ws = setup_workspace().await;
    let client = create_test_client(&mut ws, "Test Client").await?;
    Ok((ws, client))
}

/// Sets up a workspace with a client and one active project.
/// Returns (workspace, client, project) for timer and invoicing tests.
pub async fn setup_with_project() -> Result<(Workspace, Client, Project)> {
    let (mut ws, client) = setup_with_client().await?;
    let project = create_test_project(&mut ws, &client.id, "Test Project").await?;
    Ok((ws, client, project))
}

/// A store whose writes always fail, for exercising persistence-error
/// propagation. Reads succeed and find nothing.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(Error::Storage {
            message: format!("simulated write failure for key {key}"),
        })
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
