//! Client configuration.
//!
//! Lives in a TOML file discovered through a fallback chain:
//!
//! 1. `$STEMLIFE_CONFIG` (explicit override)
//! 2. `$XDG_CONFIG_HOME/stemlife/config.toml`
//! 3. `$HOME/.config/stemlife/config.toml`
//!
//! A missing or unreadable file means defaults; a malformed file is warned
//! about and ignored rather than aborting the session.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_SUBPATH: &str = "stemlife/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Hard deadline for any single HTTP request (valid: 1-120).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Pause between a submitted choice and the next event load
    /// (valid: 0-10000).
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_advance_delay_ms() -> u64 {
    2500 // matches the reference client's post-choice pause
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            advance_delay_ms: default_advance_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Discover the config path with the fallback chain. `None` when no
    /// location can even be constructed.
    pub fn discover_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("STEMLIFE_CONFIG") {
            return Some(PathBuf::from(path));
        }
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join(CONFIG_SUBPATH));
        }
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".config").join(CONFIG_SUBPATH));
        }
        None
    }

    /// Load from the discovered path, falling back to defaults.
    pub fn load() -> Self {
        match Self::discover_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, falling back to defaults.
    pub fn load_from(path: &PathBuf) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed config, using defaults");
                Self::default()
            }
        }
    }

    /// Request timeout clamped to its valid range.
    pub fn effective_request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, 120))
    }

    /// Advance delay clamped to its valid range.
    pub fn effective_advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms.clamp(0, 10_000))
    }
}
