//! Repository module - One repository per entity kind, each owning the
//! in-memory collection persisted under its fixed store key.
//!
//! All mutations follow the same pattern: update the in-memory collection
//! first, then rewrite the whole serialized collection to the backing
//! store. A persistence failure propagates to the caller without rolling
//! back the in-memory state, so the two can diverge until the next
//! successful write.

pub mod clients;
pub mod invoices;
pub mod projects;
pub mod time_entries;

pub use clients::ClientRepo;
pub use invoices::InvoiceRepo;
pub use projects::ProjectRepo;
pub use time_entries::TimeEntryRepo;

use crate::errors::Result;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// A persisted record: knows its collection's store key, exposes its id,
/// and stamps `updated_at` on mutation.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Fixed key the whole collection is stored under.
    const STORE_KEY: &'static str;

    fn id(&self) -> &str;

    /// Refreshes `updated_at`.
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Generic collection plumbing shared by all repositories: an insertion-
/// ordered `Vec` plus the store handle it persists through.
pub struct Collection<T: Record> {
    store: Arc<dyn KeyValueStore>,
    items: Vec<T>,
}

impl<T: Record> Collection<T> {
    /// Loads the collection from the store. A malformed stored value is
    /// discarded (and removed from the store) in favor of the empty
    /// collection; a store read failure likewise degrades to empty. Load
    /// never fails the caller.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let items = match store.get(T::STORE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(err) => {
                    warn!(key = T::STORE_KEY, %err, "discarding corrupted stored collection");
                    if let Err(err) = store.remove(T::STORE_KEY).await {
                        warn!(key = T::STORE_KEY, %err, "failed to clear corrupted value");
                    }
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = T::STORE_KEY, %err, "failed to load stored collection");
                Vec::new()
            }
        };
        debug!(key = T::STORE_KEY, count = items.len(), "loaded collection");
        Self { store, items }
    }

    /// Rewrites the whole serialized collection to the store.
    pub(crate) async fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.items)?;
        self.store.set(T::STORE_KEY, &raw).await
    }

    /// Appends `item` and persists.
    pub(crate) async fn insert(&mut self, item: T) -> Result<()> {
        self.items.push(item);
        self.persist().await
    }

    /// Applies `apply` to the item with `id`, stamps `updated_at`, and
    /// persists. Silent no-op when the id is absent.
    pub(crate) async fn update_with(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut T),
    ) -> Result<()> {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            debug!(key = T::STORE_KEY, id, "update on missing id ignored");
            return Ok(());
        };
        apply(item);
        item.touch(Utc::now());
        self.persist().await
    }

    /// Removes the item with `id` and persists. Silent no-op when absent;
    /// dependent records in other collections are never touched.
    pub(crate) async fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        if self.items.len() == before {
            debug!(key = T::STORE_KEY, id, "delete on missing id ignored");
            return Ok(());
        }
        self.persist().await
    }

    pub(crate) fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// All items in insertion order.
    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}
