//! Client repository - CRUD over the `"clients"` collection.

use super::{Collection, Record};
use crate::entities::{Client, ClientId, ClientUpdate, NewClient};
use crate::errors::{Error, Result};
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

impl Record for Client {
    const STORE_KEY: &'static str = "clients";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Repository owning the client collection.
pub struct ClientRepo {
    collection: Collection<Client>,
}

impl ClientRepo {
    /// Loads the collection from the store, recovering to empty on
    /// malformed data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: Collection::load(store).await,
        }
    }

    /// Creates a new client, performing input validation.
    ///
    /// The name and email must be non-empty after trimming and the hourly
    /// rate must be positive. Id and timestamps are generated here;
    /// `created_at` and `updated_at` start out equal.
    pub async fn create(&mut self, new: NewClient) -> Result<Client> {
        if new.name.trim().is_empty() {
            return Err(Error::validation("client name cannot be empty"));
        }
        if new.email.trim().is_empty() {
            return Err(Error::validation("client email cannot be empty"));
        }
        if new.hourly_rate <= 0.0 {
            return Err(Error::validation(format!(
                "hourly rate must be positive, got {}",
                new.hourly_rate
            )));
        }

        let now = Utc::now();
        let client = Client {
            id: ClientId::generate(),
            name: new.name.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone,
            company: new.company,
            address: new.address,
            hourly_rate: new.hourly_rate,
            created_at: now,
            updated_at: now,
        };
        self.collection.insert(client.clone()).await?;
        info!(id = %client.id, name = %client.name, "created client");
        Ok(client)
    }

    /// Merges `updates` into the client with `id` and refreshes
    /// `updated_at`. Silent no-op when the id is absent.
    pub async fn update(&mut self, id: &ClientId, updates: ClientUpdate) -> Result<()> {
        self.collection
            .update_with(id.as_str(), |client| {
                if let Some(name) = updates.name {
                    client.name = name;
                }
                if let Some(email) = updates.email {
                    client.email = email;
                }
                if let Some(phone) = updates.phone {
                    client.phone = Some(phone);
                }
                if let Some(company) = updates.company {
                    client.company = Some(company);
                }
                if let Some(address) = updates.address {
                    client.address = Some(address);
                }
                if let Some(hourly_rate) = updates.hourly_rate {
                    client.hourly_rate = hourly_rate;
                }
            })
            .await
    }

    /// Removes the client record only. Projects and time entries that
    /// reference it are left in place (no cascade).
    pub async fn delete(&mut self, id: &ClientId) -> Result<()> {
        self.collection.remove(id.as_str()).await
    }

    pub fn get(&self, id: &ClientId) -> Option<&Client> {
        self.collection.get(id.as_str())
    }

    /// All clients in insertion order.
    pub fn list(&self) -> &[Client] {
        self.collection.items()
    }
}
