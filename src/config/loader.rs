// file: src/config/loader.rs
// version: 1.0.0
// guid: 48f7d1c0-9e2b-4a65-8c03-d17b5e94a2f6

//! Configuration file loading and environment variable substitution

use super::MaasConfig;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Create a loader with an explicit environment (for tests)
    pub fn with_env(env_vars: HashMap<String, String>) -> Self {
        Self { env_vars }
    }

    /// Load and validate the MAAS configuration from a TOML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<MaasConfig> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::error::ReimageError::file_not_found(
                path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            crate::error::ReimageError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        let config: MaasConfig = toml::from_str(&expanded)?;

        config.maas.validate()?;

        Ok(config)
    }

    /// Expand `${VAR}` environment variables in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| crate::error::ReimageError::config(format!("Invalid regex: {}", e)))?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(crate::error::ReimageError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
