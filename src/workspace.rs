//! Workspace - the four repositories loaded from one shared store.
//!
//! This is the handle an embedding application drives: load it once at
//! startup, issue commands against the repositories and the `core`
//! operations, and let each mutation persist itself.

use crate::config::AppConfig;
use crate::errors::Result;
use crate::repo::{ClientRepo, InvoiceRepo, ProjectRepo, TimeEntryRepo};
use crate::storage::{JsonFileStore, KeyValueStore};
use std::sync::Arc;
use tracing::info;

/// All four entity repositories, sharing one backing store.
pub struct Workspace {
    pub clients: ClientRepo,
    pub projects: ProjectRepo,
    pub time_entries: TimeEntryRepo,
    pub invoices: InvoiceRepo,
}

impl Workspace {
    /// Loads every collection from `store`. Malformed stored collections
    /// degrade to empty instead of failing the load.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let workspace = Self {
            clients: ClientRepo::load(Arc::clone(&store)).await,
            projects: ProjectRepo::load(Arc::clone(&store)).await,
            time_entries: TimeEntryRepo::load(Arc::clone(&store)).await,
            invoices: InvoiceRepo::load(store).await,
        };
        info!(
            clients = workspace.clients.list().len(),
            projects = workspace.projects.list().len(),
            time_entries = workspace.time_entries.list().len(),
            invoices = workspace.invoices.list().len(),
            "workspace loaded"
        );
        workspace
    }

    /// Opens the file-backed store under `config.storage_dir` and loads
    /// the workspace from it.
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = Arc::new(JsonFileStore::new(&config.storage_dir).await?);
        Ok(Self::load(store).await)
    }
}
