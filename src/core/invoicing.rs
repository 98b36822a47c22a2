//! Invoice aggregator - turns selected time entries into a frozen invoice.
//!
//! Totals are computed once at creation and stored on the invoice; later
//! changes to the underlying entries never alter them. Overdue is a
//! derived classification computed against a due date, never stored.

use crate::entities::{
    ClientId, Invoice, InvoiceId, InvoiceStatus, InvoiceUpdate, NewInvoice, TimeEntry, TimeEntryId,
};
use crate::errors::{Error, Result};
use crate::repo::{ClientRepo, InvoiceRepo, TimeEntryRepo};
use chrono::{DateTime, Duration, Utc};

/// The amounts frozen into an invoice at creation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvoiceTotals {
    /// Sum of earnings over the selected entries
    pub subtotal: f64,
    /// Absolute tax amount derived from the tax percentage
    pub tax: f64,
    /// `subtotal + tax`
    pub total: f64,
}

/// Caller-supplied parameters for [`create_invoice`].
#[derive(Clone, Debug)]
pub struct InvoiceDraft {
    pub client_id: ClientId,
    pub invoice_number: String,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub selected_entries: Vec<TimeEntryId>,
    /// Flat tax percentage applied to the subtotal (e.g. `8.5`)
    pub tax_percent: f64,
}

/// Stopped entries tracked for `client_id`, the candidates for invoicing.
///
/// Entries already referenced by an earlier invoice are NOT excluded:
/// entries carry no billed flag, so avoiding double billing across
/// invoices is the caller's responsibility. Known gap, kept deliberately.
pub fn unbilled_entries_for_client<'a>(
    entries: &'a TimeEntryRepo,
    client_id: &ClientId,
) -> Vec<&'a TimeEntry> {
    entries
        .entries_for_client(client_id)
        .into_iter()
        .filter(|entry| !entry.is_running)
        .collect()
}

/// Computes the amounts to freeze into an invoice over the entries whose
/// ids appear in `selected`. Ids that match no entry contribute nothing;
/// duplicate ids in the selection count once.
pub fn compute_totals(
    entries: &TimeEntryRepo,
    selected: &[TimeEntryId],
    tax_percent: f64,
) -> InvoiceTotals {
    let subtotal: f64 = entries
        .list()
        .iter()
        .filter(|entry| selected.contains(&entry.id))
        .map(TimeEntry::earnings)
        .sum();
    let tax = subtotal * (tax_percent / 100.0);
    InvoiceTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Creates a draft invoice for `draft.client_id` referencing the selected
/// entries verbatim, with totals computed by [`compute_totals`] and frozen.
///
/// Fails with a validation error when the selection is empty and with
/// [`Error::ClientNotFound`] when the client does not exist; otherwise
/// always succeeds.
pub async fn create_invoice(
    invoices: &mut InvoiceRepo,
    entries: &TimeEntryRepo,
    clients: &ClientRepo,
    draft: InvoiceDraft,
) -> Result<Invoice> {
    if draft.selected_entries.is_empty() {
        return Err(Error::validation(
            "an invoice needs at least one time entry",
        ));
    }
    if clients.get(&draft.client_id).is_none() {
        return Err(Error::ClientNotFound {
            id: draft.client_id.to_string(),
        });
    }

    let totals = compute_totals(entries, &draft.selected_entries, draft.tax_percent);
    invoices
        .create(NewInvoice {
            client_id: draft.client_id,
            invoice_number: draft.invoice_number,
            status: InvoiceStatus::Draft,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            paid_date: None,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            time_entries: draft.selected_entries,
        })
        .await
}

/// Marks the invoice as paid, stamping the paid date with the current
/// instant. Silent no-op when the invoice is absent.
pub async fn mark_as_paid(invoices: &mut InvoiceRepo, id: &InvoiceId) -> Result<()> {
    invoices
        .update(
            id,
            InvoiceUpdate {
                status: Some(InvoiceStatus::Paid),
                paid_date: Some(Utc::now()),
                ..InvoiceUpdate::default()
            },
        )
        .await
}

/// Whether the invoice counts as overdue at `now`: any non-paid invoice
/// whose due date has passed. Paid invoices are never overdue.
#[must_use]
pub fn is_overdue(invoice: &Invoice, now: DateTime<Utc>) -> bool {
    invoice.status != InvoiceStatus::Paid && invoice.due_date < now
}

/// Suggests an invoice number from the current instant: `INV-` plus the
/// last six digits of the epoch milliseconds.
#[must_use]
pub fn suggest_invoice_number(now: DateTime<Utc>) -> String {
    format!("INV-{:06}", now.timestamp_millis().rem_euclid(1_000_000))
}

/// The default due date: `due_days` days after the issue date.
#[must_use]
pub fn default_due_date(issue_date: DateTime<Utc>, due_days: i64) -> DateTime<Utc> {
    issue_date + Duration::days(due_days)
}
