//! Client configuration, loadable from TOML.
//!
//! ```toml
//! hosts = ["prod.imgix.net", "stag.imgix.net"]
//! secure = true
//! token = "FOO123bar"
//! shard_strategy = "crc"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for building a [`crate::Client`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Hosts to shard across, in rotation order.
    pub hosts: Vec<String>,
    /// Use `https` (default) or `http`.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// Signing token; absent or empty disables signing.
    #[serde(default)]
    pub token: Option<String>,
    /// `"crc"` or `"cycle"`; absent means cycle. Validated when the client is built.
    #[serde(default)]
    pub shard_strategy: Option<String>,
}

fn default_secure() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            secure: default_secure(),
            token: None,
            shard_strategy: None,
        }
    }
}

/// Parse a configuration from TOML text.
pub fn from_toml_str(data: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = toml::from_str(data).context("parse client config")?;
    Ok(cfg)
}

/// Load a configuration file from disk.
pub fn load_from_path(path: &Path) -> Result<ClientConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg = from_toml_str(&data).with_context(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), hosts = cfg.hosts.len(), "loaded client config");
    Ok(cfg)
}

/// Write a configuration file, creating parent directories as needed.
pub fn save_to_path(cfg: &ClientConfig, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(cfg).context("serialize client config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("write config {}", path.display()))?;
    tracing::info!("wrote client config to {}", path.display());
    Ok(())
}
