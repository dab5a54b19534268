//! Configuration types for the search service.
//!
//! Loaded once at startup from an optional TOML file, then overlaid with
//! environment overrides. Nothing below startup reads the environment;
//! the resolved values are passed into constructors.

use std::path::{Path, PathBuf};

use agent_search::{RankConfig, SubgraphConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ServiceError};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "AGENT_SEARCH_CONFIG";
/// Environment variable overriding `subgraph.url`.
pub const SUBGRAPH_URL_ENV: &str = "SUBGRAPH_URL";
/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "PORT";

/// Top-level configuration for the search service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener settings.
    pub server: ServerConfig,
    /// Upstream subgraph settings.
    pub subgraph: SubgraphConfig,
    /// Field weights, blend and result count.
    pub ranking: RankConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ServiceError::Config(format!("invalid config file {}: {e}", path.display()))
        })
    }

    /// Resolve the configuration the way the service binary does.
    ///
    /// Reads the file named by `AGENT_SEARCH_CONFIG` if set (defaults
    /// otherwise), applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the result is invalid.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::from_file(&PathBuf::from(path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `SUBGRAPH_URL` and `PORT` from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if `PORT` is not a valid port number.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(SUBGRAPH_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.subgraph.url = url.trim().to_owned();
        }
        if let Some(port) = lookup(PORT_ENV).filter(|p| !p.trim().is_empty()) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| ServiceError::Config(format!("invalid {PORT_ENV} '{port}': {e}")))?;
        }
        Ok(())
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ServiceError::Config("server.host must not be empty".into()));
        }
        self.subgraph.validate()?;
        self.ranking.validate()?;
        Ok(())
    }
}
