//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use serde::Deserialize;
use strum::{Display, EnumString};

use crate::error::ServiceError;
use crate::status::DEFAULT_STATE;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Status ===
    /// Status value at process start.
    #[serde(default = "default_initial_status")]
    pub initial_status: String,

    // === Observability ===
    /// Log filter (trace, debug, info, warn, error or an EnvFilter directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log format: text or json.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Install the Prometheus recorder and serve /metrics.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_initial_status() -> String {
    DEFAULT_STATE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    LogFormat::Text.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            initial_status: default_initial_status(),
            rust_log: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_true(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.ip_addr()?;
        self.log_format()?;
        Ok(())
    }

    /// Parsed bind address.
    pub fn ip_addr(&self) -> Result<IpAddr, ServiceError> {
        self.host.parse().map_err(|_| {
            ServiceError::InvalidConfig(format!("HOST {:?} is not an IP address", self.host))
        })
    }

    /// Parsed log format.
    pub fn log_format(&self) -> Result<LogFormat, ServiceError> {
        LogFormat::from_str(&self.log_format).map_err(|_| {
            ServiceError::InvalidConfig(format!(
                "LOG_FORMAT must be text or json, got {:?}",
                self.log_format
            ))
        })
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServiceError> {
        Ok(SocketAddr::from((self.ip_addr()?, self.port)))
    }
}
