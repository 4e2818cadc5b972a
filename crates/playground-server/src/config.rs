//! Server configuration from environment variables.
//!
//! Recognized variables:
//! - `HOST`: listen address (default: "127.0.0.1")
//! - `PORT`: listen port (default: "3000")
//! - `PLAYGROUND_DATA_DIR`: directory holding saved documents (default: "data")
//! - `COOKIE_SECRET`: cookie-signing secret; a random per-process secret is
//!   used (and an error logged) when unset
//! - `COOKIE_NAME` / `COOKIE_VALUE`: when both are set, saves require this cookie

use std::path::PathBuf;

use uuid::Uuid;

use crate::cookie::CookieGate;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be an integer between 0 and 65535")]
    InvalidPort,
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub cookie_secret: CookieSecret,
    pub cookie_gate: Option<CookieGate>,
}

/// Where the cookie-signing secret came from.
#[derive(Clone)]
pub enum CookieSecret {
    Configured(String),
    /// Generated at startup; cookies signed with it do not survive a restart.
    Ephemeral(String),
}

impl CookieSecret {
    pub fn as_str(&self) -> &str {
        match self {
            CookieSecret::Configured(s) | CookieSecret::Ephemeral(s) => s,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, CookieSecret::Ephemeral(_))
    }
}

impl std::fmt::Debug for CookieSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookieSecret::Configured(_) => f.write_str("Configured(<redacted>)"),
            CookieSecret::Ephemeral(_) => f.write_str("Ephemeral(<redacted>)"),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };

        let cookie_secret = match non_empty("COOKIE_SECRET") {
            Some(secret) => CookieSecret::Configured(secret),
            None => {
                tracing::error!("COOKIE_SECRET environment variable not set");
                CookieSecret::Ephemeral(Uuid::new_v4().to_string())
            }
        };

        Ok(ServerConfig {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_dir: non_empty("PLAYGROUND_DATA_DIR")
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            cookie_secret,
            cookie_gate: CookieGate::from_pair(lookup("COOKIE_NAME"), lookup("COOKIE_VALUE")),
        })
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3000");
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert!(cfg.cookie_secret.is_ephemeral());
        assert!(cfg.cookie_gate.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let cfg = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("PLAYGROUND_DATA_DIR", "/srv/playground"),
            ("COOKIE_SECRET", "abc"),
            ("COOKIE_NAME", "editor"),
            ("COOKIE_VALUE", "yes"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.data_dir, PathBuf::from("/srv/playground"));
        assert_eq!(cfg.cookie_secret.as_str(), "abc");
        assert!(!cfg.cookie_secret.is_ephemeral());
        assert_eq!(cfg.cookie_gate.unwrap().name(), "editor");
    }

    #[test]
    fn gate_needs_name_and_value() {
        let cfg = config(&[("COOKIE_NAME", "editor")]).unwrap();
        assert!(cfg.cookie_gate.is_none());
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(matches!(config(&[("PORT", "http")]), Err(ConfigError::InvalidPort)));
        assert!(matches!(config(&[("PORT", "70000")]), Err(ConfigError::InvalidPort)));
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let cfg = config(&[("COOKIE_SECRET", "hunter2")]).unwrap();
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
