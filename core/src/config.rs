use crate::error::{DashError, DashResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ENV_DATABASE: &str = "STREAMDASH_DB";
pub const ENV_BIND: &str = "STREAMDASH_BIND";
pub const ENV_CACHE_TTL_SECS: &str = "STREAMDASH_CACHE_TTL_SECS";
pub const ENV_ASSETS_DIR: &str = "STREAMDASH_ASSETS_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// SQLite file path (or a `file:` URI).
    pub database_path: String,
    pub bind_addr: String,
    pub cache_ttl_secs: u64,
    /// Directory served under `/assets`.
    pub assets_dir: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            database_path: "streamdash.db".into(),
            bind_addr: "127.0.0.1:8501".into(),
            cache_ttl_secs: 3600,
            assets_dir: "assets".into(),
        }
    }
}

impl DashConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: DashConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `STREAMDASH_*` environment variables.
    pub fn from_env() -> DashResult<Self> {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup` (normally the process environment).
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> DashResult<Self> {
        if let Some(db) = lookup(ENV_DATABASE) {
            self.database_path = db;
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.bind_addr = bind;
        }
        if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS) {
            self.cache_ttl_secs = ttl.trim().parse().map_err(|_| DashError::InvalidConfig {
                reason: format!("{ENV_CACHE_TTL_SECS} must be a whole number of seconds, got {ttl:?}"),
            })?;
        }
        if let Some(dir) = lookup(ENV_ASSETS_DIR) {
            self.assets_dir = dir;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(DashError::InvalidConfig {
                reason: "database_path is empty".into(),
            });
        }
        if self.bind_addr.trim().is_empty() {
            return Err(DashError::InvalidConfig {
                reason: "bind_addr is empty".into(),
            });
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            database_path: ":memory:".into(),
            bind_addr: "127.0.0.1:0".into(),
            cache_ttl_secs: 60,
            assets_dir: "../assets".into(),
        }
    }
}
