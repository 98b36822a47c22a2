//! Project entity - Represents an engagement for a client.
//!
//! A project belongs to exactly one client and may carry its own hourly
//! rate; when absent, the client's default rate applies.

use super::client::{Client, ClientId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identifier of a [`Project`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
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

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle status of a project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Paused,
    Completed,
}

/// Project record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier for the project
    pub id: ProjectId,
    /// Owning client; validated to exist at creation time
    pub client_id: ClientId,
    /// Display name of the project
    pub name: String,
    /// Optional free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional rate override; when `None` the client's default rate applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    /// Lifecycle status
    pub status: ProjectStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp of the most recent mutation
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// The rate to bill work on this project at: the project override when
    /// present, otherwise the client's default rate.
    #[must_use]
    pub fn billing_rate(&self, client: &Client) -> f64 {
        self.hourly_rate.unwrap_or(client.hourly_rate)
    }
}

/// Caller-supplied fields for creating a [`Project`].
#[derive(Clone, Debug)]
pub struct NewProject {
    pub client_id: ClientId,
    pub name: String,
    pub description: Option<String>,
    pub hourly_rate: Option<f64>,
    pub status: ProjectStatus,
}

/// Partial update for a [`Project`].
#[derive(Clone, Debug, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub hourly_rate: Option<f64>,
    pub status: Option<ProjectStatus>,
}
