//! Entity module - Contains the persisted data models of the application.
//! Each entity carries a typed id, its business fields, and created/updated
//! timestamps. Serialized field names are camelCase with RFC 3339 dates,
//! matching the persisted JSON layout.

pub mod client;
pub mod invoice;
pub mod project;
pub mod time_entry;

pub use client::{Client, ClientId, ClientUpdate, NewClient};
pub use invoice::{Invoice, InvoiceId, InvoiceStatus, InvoiceUpdate, NewInvoice};
pub use project::{NewProject, Project, ProjectId, ProjectStatus, ProjectUpdate};
pub use time_entry::{NewTimeEntry, TimeEntry, TimeEntryId, TimeEntryUpdate};
