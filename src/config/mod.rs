// file: src/config/mod.rs
// version: 1.0.0
// guid: e6a03b84-1d57-4c29-9f6e-5b8d20c47a13

//! Configuration module for the MAAS reimage tool
//!
//! Handles loading and validation of the MAAS connection settings from a
//! TOML file (`maas.toml` by default).

pub mod loader;

pub use loader::ConfigLoader;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "maas.toml";

/// Top-level configuration file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaasConfig {
    pub maas: MaasSection,
}

/// The `[maas]` table of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaasSection {
    /// Base URL of the MAAS region controller, e.g. `http://maas.local:5240/MAAS`
    pub maas_url: String,

    /// File holding the urlsafe-base64 encryption key
    #[serde(default = "default_key_file")]
    pub key_file: PathBuf,

    /// File holding the encrypted MAAS API key
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,

    /// File that user-facing output is appended to
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Connection attempts before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Seconds between status polls while waiting for a state change
    #[serde(default = "default_poll_interval")]
    pub status_poll_interval: u64,

    /// Seconds to wait for a machine to reach an expected status
    #[serde(default = "default_status_timeout")]
    pub status_timeout: u64,
}

fn default_key_file() -> PathBuf {
    PathBuf::from("maas_api.key")
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("maas_api_key.encrypted")
}

fn default_log_file() -> PathBuf {
    PathBuf::from("maas_redeploy.log")
}

fn default_connect_retries() -> u32 {
    3
}

fn default_poll_interval() -> u64 {
    10
}

fn default_status_timeout() -> u64 {
    900
}

impl MaasSection {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.maas_url).map_err(|e| {
            crate::error::ReimageError::config(format!(
                "Invalid maas_url '{}': {}",
                self.maas_url, e
            ))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(crate::error::ReimageError::config(format!(
                "maas_url must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if parsed.host().is_none() {
            return Err(crate::error::ReimageError::config(
                "maas_url must include a host",
            ));
        }

        if self.connect_retries == 0 {
            return Err(crate::error::ReimageError::config(
                "connect_retries must be at least 1",
            ));
        }

        if self.status_poll_interval == 0 {
            return Err(crate::error::ReimageError::config(
                "status_poll_interval must be at least 1 second",
            ));
        }

        Ok(())
    }

    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.status_poll_interval)
    }

    /// Status wait timeout as a [`Duration`]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout)
    }
}
