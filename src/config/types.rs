use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::flavor::Flavor;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the FoodHub backend (e.g., "http://127.0.0.1:8080").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Application-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Which client variant this build runs as.
    #[serde(default)]
    pub flavor: Flavor,
}

/// Session token persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Persist the auth token between runs (default: true).
    #[serde(default = "default_persist")]
    pub persist: bool,
    /// Override for the token file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_user_agent() -> String {
    format!("foodhub/{}", env!("CARGO_PKG_VERSION"))
}

fn default_persist() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            path: None,
        }
    }
}
