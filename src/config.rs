use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Known backend deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Host machine as seen from the Android emulator.
    Emulator,
    /// Development machine on the local network.
    Device,
    #[default]
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Emulator => "http://10.0.2.2:5000",
            Environment::Device => "http://192.168.1.100:5000",
            Environment::Production => "http://157.66.55.198:5000",
        }
    }
}

/// Network client settings. Every key is optional in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    /// Upper bound for a whole request, body included.
    pub read_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl ClientConfig {
    pub fn new<S: ToString>(base_url: S) -> Self {
        Self {
            base_url: base_url.to_string(),
            connect_timeout_ms: 30_000,
            read_timeout_ms: 90_000,
            user_agent: concat!("TrackEco-Rust/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn for_environment(env: Environment) -> Self {
        Self::new(env.base_url())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }
}
