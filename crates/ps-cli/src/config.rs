//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Base URL of the workout sync service. Sync is off when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_endpoint: Option<String>,

    /// Bearer token for the workout sync service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("sync_endpoint", &self.sync_endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("padel.db"),
            sync_endpoint: None,
            api_key: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PADEL_*)
        figment = figment.merge(Env::prefixed("PADEL_"));

        figment.extract()
    }

    /// Whether workout sync has an endpoint configured.
    pub const fn sync_enabled(&self) -> bool {
        self.sync_endpoint.is_some()
    }

    /// Builds the workout sync client, or `None` when sync is not configured.
    pub fn sync_client(&self) -> anyhow::Result<Option<ps_sync::Client>> {
        let Some(endpoint) = self.sync_endpoint.as_deref() else {
            return Ok(None);
        };
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("missing workout sync API key (set PADEL_API_KEY or config.toml)")
        })?;
        Ok(Some(ps_sync::Client::new(endpoint, api_key)?))
    }
}

/// Returns the platform-specific config directory for padel.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("padel"))
}

/// Returns the platform-specific data directory for padel.
///
/// On Linux: `~/.local/share/padel`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("padel"))
}
