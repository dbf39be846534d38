// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::DEFAULT_ENDPOINT;
use crate::form::StalePolicy;

pub const ENV_CONFIG_PATH: &str = "TRUTHGUARD_CONFIG_PATH";
pub const ENV_ENDPOINT: &str = "TRUTHGUARD_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "TRUTHGUARD_TIMEOUT_SECS";
pub const DEFAULT_CONFIG_PATH: &str = "config/truthguard.toml";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_connect_timeout_secs() -> u64 {
    4
}
fn default_discard_stale() -> bool {
    true
}
fn default_show_errors() -> bool {
    false
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Absolute URL of the classification endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request deadline; 0 disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Drop responses to requests that were overtaken by a newer one.
    #[serde(default = "default_discard_stale")]
    pub discard_stale_responses: bool,
    /// Render a failure line on the form; off keeps failures visible only in logs.
    #[serde(default = "default_show_errors")]
    pub show_errors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            discard_stale_responses: default_discard_stale(),
            show_errors: default_show_errors(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(s).context("parsing truthguard config")?;
        cfg.validated()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml_str(&data)
    }

    /// Load config using env var + fallbacks, then apply env overrides:
    /// 1) $TRUTHGUARD_CONFIG_PATH (must exist)
    /// 2) config/truthguard.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if p.exists() {
                Self::load_from_file(&p)?
            } else {
                Self::default()
            }
        };
        base.with_env_overrides()
    }

    /// Replace the endpoint, re-validating it.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        self.endpoint = endpoint.into();
        self.validated()
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(ep) = std::env::var(ENV_ENDPOINT) {
            self.endpoint = ep;
        }
        if let Ok(t) = std::env::var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = t
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.endpoint = self.endpoint.trim().to_string();
        let url = reqwest::Url::parse(&self.endpoint)
            .with_context(|| format!("endpoint '{}' is not an absolute URL", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("endpoint must use http or https, got '{}'", url.scheme());
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn stale_policy(&self) -> StalePolicy {
        if self.discard_stale_responses {
            StalePolicy::LatestIssued
        } else {
            StalePolicy::LastArrival
        }
    }
}
