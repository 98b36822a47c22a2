//! Storage module - The persistence boundary of the application.
//!
//! Repositories never talk to a concrete backend; they go through the
//! [`KeyValueStore`] capability so the whole crate can run against an
//! in-memory fake in tests and a file-backed store in production.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use async_trait::async_trait;

/// Asynchronous get/set of named JSON documents.
///
/// Values are opaque strings to the store; repositories serialize whole
/// collections into them. Every operation completes or fails exactly once;
/// there is no retry or timeout model.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`; no-op when absent.
    async fn remove(&self, key: &str) -> Result<()>;
}
