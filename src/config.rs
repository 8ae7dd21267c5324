//! Server configuration
//!
//! Settings come from an optional TOML file plus `MAQUETTE_` environment
//! overrides (double underscore as the section separator, e.g.
//! `MAQUETTE_SERVER__PORT=9000`).

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,
    /// Session bookkeeping
    #[serde(default)]
    pub canvas: CanvasSettings,
    /// Generative export
    #[serde(default)]
    pub ai: AiSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Session bookkeeping settings
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasSettings {
    /// Session capacity before LRU eviction
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Idle seconds before a session expires
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: i64,
}

/// Generative export settings
#[derive(Debug, Clone, Deserialize)]
pub struct AiSettings {
    /// Master switch for the Gemini export path
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_sessions() -> usize {
    100
}

fn default_session_idle_secs() -> i64 {
    3600
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from the optional config file and environment.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        builder = match path {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("maquette").required(false)),
        };
        let config = builder
            .add_source(Environment::with_prefix("MAQUETTE").separator("__"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
