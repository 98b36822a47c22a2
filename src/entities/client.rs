//! Client entity - Represents a billable customer.
//!
//! Each client carries contact details and a default hourly rate that
//! projects may override per engagement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of a [`Client`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
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

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Client record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier for the client
    pub id: ClientId,
    /// Display name of the client
    pub name: String,
    /// Primary contact email address
    pub email: String,
    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Optional postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Default billing rate in currency units per hour (positive)
    pub hourly_rate: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent mutation
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a [`Client`].
/// Id and timestamps are generated by the repository.
#[derive(Clone, Debug)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: f64,
}

/// Partial update for a [`Client`]; `Some` fields are merged in,
/// `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub hourly_rate: Option<f64>,
}
