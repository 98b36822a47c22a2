//! Invoice entity - A point-in-time financial snapshot.
//!
//! An invoice references the time entries it billed by id and freezes the
//! subtotal/tax/total computed at creation; later changes to those entries
//! never alter the stored amounts. Overdue is derived where displayed, not
//! stored, so a `sent` invoice past its due date still reads `sent` here.

use super::client::ClientId;
use super::time_entry::TimeEntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of an [`Invoice`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
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

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvoiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Stored lifecycle status of an invoice.
///
/// `Overdue` exists as a stored value for callers that persist it
/// explicitly, but the overdue classification used by views is always
/// derived from the due date via [`crate::core::invoicing::is_overdue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

/// Invoice record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique identifier for the invoice
    pub id: InvoiceId,
    /// Client the invoice bills
    pub client_id: ClientId,
    /// User-editable invoice number; uniqueness is not enforced
    pub invoice_number: String,
    /// Stored lifecycle status
    pub status: InvoiceStatus,
    /// Date the invoice was issued
    pub issue_date: DateTime<Utc>,
    /// Date payment is due
    pub due_date: DateTime<Utc>,
    /// When the invoice was marked paid, if ever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    /// Sum of earnings over the referenced entries, frozen at creation
    pub subtotal: f64,
    /// Absolute tax amount (not a percentage), frozen at creation
    pub tax: f64,
    /// `subtotal + tax`, frozen at creation
    pub total: f64,
    /// Ids of the billed time entries - a snapshot reference, not a live query
    pub time_entries: Vec<TimeEntryId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent mutation
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an [`Invoice`]. Totals are computed
/// by the invoice aggregator before this struct is built.
#[derive(Clone, Debug)]
pub struct NewInvoice {
    pub client_id: ClientId,
    pub invoice_number: String,
    pub status: InvoiceStatus,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub time_entries: Vec<TimeEntryId>,
}

/// Partial update for an [`Invoice`]. The frozen amounts and entry
/// references are not patchable.
#[derive(Clone, Debug, Default)]
pub struct InvoiceUpdate {
    pub invoice_number: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
}
