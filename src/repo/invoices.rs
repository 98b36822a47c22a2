//! Invoice repository - CRUD over the `"invoices"` collection.
//!
//! Invoices are normally created through the aggregator in
//! [`crate::core::invoicing`], which validates the selection and computes
//! the frozen totals before handing a [`NewInvoice`] to this repository.

use super::{Collection, Record};
use crate::entities::{ClientId, Invoice, InvoiceId, InvoiceUpdate, NewInvoice};
use crate::errors::Result;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

impl Record for Invoice {
    const STORE_KEY: &'static str = "invoices";

    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Repository owning the invoice collection.
pub struct InvoiceRepo {
    collection: Collection<Invoice>,
}

impl InvoiceRepo {
    /// Loads the collection from the store, recovering to empty on
    /// malformed data.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            collection: Collection::load(store).await,
        }
    }

    /// Persists a new invoice. Totals and entry references arrive already
    /// frozen; this only stamps id and timestamps.
    pub async fn create(&mut self, new: NewInvoice) -> Result<Invoice> {
        let now = Utc::now();
        let invoice = Invoice {
            id: InvoiceId::generate(),
            client_id: new.client_id,
            invoice_number: new.invoice_number,
            status: new.status,
            issue_date: new.issue_date,
            due_date: new.due_date,
            paid_date: new.paid_date,
            subtotal: new.subtotal,
            tax: new.tax,
            total: new.total,
            time_entries: new.time_entries,
            created_at: now,
            updated_at: now,
        };
        self.collection.insert(invoice.clone()).await?;
        info!(id = %invoice.id, number = %invoice.invoice_number, total = invoice.total, "created invoice");
        Ok(invoice)
    }

    /// Merges `updates` into the invoice with `id` and refreshes
    /// `updated_at`. Silent no-op when the id is absent. The frozen
    /// amounts are not patchable.
    pub async fn update(&mut self, id: &InvoiceId, updates: InvoiceUpdate) -> Result<()> {
        self.collection
            .update_with(id.as_str(), |invoice| {
                if let Some(invoice_number) = updates.invoice_number {
                    invoice.invoice_number = invoice_number;
                }
                if let Some(status) = updates.status {
                    invoice.status = status;
                }
                if let Some(issue_date) = updates.issue_date {
                    invoice.issue_date = issue_date;
                }
                if let Some(due_date) = updates.due_date {
                    invoice.due_date = due_date;
                }
                if let Some(paid_date) = updates.paid_date {
                    invoice.paid_date = Some(paid_date);
                }
            })
            .await
    }

    /// Removes the invoice with `id`. Silent no-op when absent. The
    /// referenced time entries are untouched.
    pub async fn delete(&mut self, id: &InvoiceId) -> Result<()> {
        self.collection.remove(id.as_str()).await
    }

    pub fn get(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.collection.get(id.as_str())
    }

    /// All invoices in insertion order.
    pub fn list(&self) -> &[Invoice] {
        self.collection.items()
    }

    /// All invoices billed to `client_id`, read-only.
    pub fn invoices_for_client(&self, client_id: &ClientId) -> Vec<&Invoice> {
        self.collection
            .items()
            .iter()
            .filter(|invoice| &invoice.client_id == client_id)
            .collect()
    }
}
