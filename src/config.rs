//! Configuration management and logging setup.
//!
//! Settings come from an optional TOML file (path in the
//! `FREELANCE_BUDDY_CONFIG` environment variable, default
//! `freelance_buddy.toml`) with environment-variable overrides applied on
//! top. A missing file is not an error; every field has a default.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application settings for an embedding shell.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the file-backed store keeps its JSON documents in
    pub storage_dir: PathBuf,
    /// Days between issue date and the suggested due date
    pub default_due_days: i64,
    /// Flat tax percentage pre-filled when drafting an invoice
    pub default_tax_percent: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("data"),
            default_due_days: 30,
            default_tax_percent: 0.0,
        }
    }
}

/// Loads the application configuration: `.env`, then the TOML file (when
/// present), then environment overrides (`STORAGE_DIR`).
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok(); // non-fatal, env vars can be set externally

    let path = std::env::var("FREELANCE_BUDDY_CONFIG")
        .unwrap_or_else(|_| "freelance_buddy.toml".to_string());

    let mut config = match std::fs::read_to_string(&path) {
        Ok(raw) => parse_config(&raw).map_err(|err| Error::Config {
            message: format!("failed to parse {path}: {err}"),
        })?,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(path = %path, "no config file found, using defaults");
            AppConfig::default()
        }
        Err(err) => return Err(err.into()),
    };

    if let Ok(dir) = std::env::var("STORAGE_DIR") {
        config.storage_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn parse_config(raw: &str) -> std::result::Result<AppConfig, toml::de::Error> {
    toml::from_str(raw)
}

/// Initializes tracing with an env-filter (`RUST_LOG`), defaulting to
/// `info`. Call once from the embedding application, as early as possible.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
