//! Client configuration management
//!
//! Configuration is loaded from a TOML file, the environment, or both, and
//! then passed by reference into credential resolution, request shaping and
//! logging. Nothing here is global: rotate a key by mutating the struct.

use crate::core::api_type::ApiType;
use crate::core::constants::{defaults, env};
use crate::core::credentials::{CredentialSlot, resolve_credential};
use crate::core::error::Result as ClientResult;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_api_base() -> String {
    defaults::API_BASE.to_string()
}

fn default_api_type() -> String {
    defaults::API_TYPE.to_string()
}

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Primary API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// File holding the primary API key, takes precedence over `api_key`
    #[serde(default)]
    pub api_key_path: Option<PathBuf>,

    /// Amari API key
    #[serde(default)]
    pub amari_api_key: Option<String>,

    /// File holding the Amari API key, takes precedence over `amari_api_key`
    #[serde(default)]
    pub amari_api_key_path: Option<PathBuf>,

    /// Organization sent with every request
    #[serde(default)]
    pub organization: Option<String>,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API type label, see [`ApiType`]
    #[serde(default = "default_api_type")]
    pub api_type: String,

    /// API version tag
    #[serde(default)]
    pub api_version: Option<String>,

    /// Console log level, `"debug"` or `"info"`
    #[serde(default)]
    pub log: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_path: None,
            amari_api_key: None,
            amari_api_key_path: None,
            organization: None,
            api_base: default_api_base(),
            api_type: default_api_type(),
            api_version: None,
            log: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read configuration file")?;

        let mut config: ClientConfig =
            toml::from_str(&content).context("Failed to parse TOML configuration")?;
        config.apply_version_default();

        Ok(config)
    }

    /// Load configuration from the environment
    ///
    /// Reads `.env` if present. When `CONFIG_PATH` is set the TOML file is
    /// loaded first and environment variables override its values.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match std::env::var(env::CONFIG_PATH) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.merge_vars(|name| std::env::var(name).ok());
        config.apply_version_default();

        Ok(config)
    }

    fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env::API_KEY) {
            self.api_key = Some(value);
        }
        if let Some(value) = lookup(env::API_KEY_PATH) {
            self.api_key_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(env::AMARI_API_KEY) {
            self.amari_api_key = Some(value);
        }
        if let Some(value) = lookup(env::AMARI_API_KEY_PATH) {
            self.amari_api_key_path = Some(PathBuf::from(value));
        }
        if let Some(value) = lookup(env::ORGANIZATION) {
            self.organization = Some(value);
        }
        if let Some(value) = lookup(env::API_BASE) {
            self.api_base = value;
        }
        if let Some(value) = lookup(env::API_TYPE) {
            self.api_type = value;
        }
        if let Some(value) = lookup(env::API_VERSION) {
            self.api_version = Some(value);
        }
    }

    /// Azure deployments need a version tag; fill in the service default.
    fn apply_version_default(&mut self) {
        if self.api_version.is_none() && matches!(self.api_type(), Ok(t) if t.is_azure()) {
            self.api_version = Some(defaults::AZURE_API_VERSION.to_string());
        }
    }

    /// Classify the configured API type label
    pub fn api_type(&self) -> ClientResult<ApiType> {
        self.api_type.parse()
    }

    /// Resolve the primary API key for an outbound request
    pub fn default_api_key(&self) -> ClientResult<String> {
        resolve_credential(
            CredentialSlot::Primary,
            self.api_key_path.as_deref(),
            self.api_key.as_deref(),
        )
    }

    /// Resolve the Amari API key for an outbound request
    pub fn default_amari_api_key(&self) -> ClientResult<String> {
        resolve_credential(
            CredentialSlot::Secondary,
            self.amari_api_key_path.as_deref(),
            self.amari_api_key.as_deref(),
        )
    }
}
