//! Server configuration
//!
//! Everything comes from environment variables with per-field defaults.
//! Invalid values surface as typed [`ConfigError`]s rather than panics.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value:?} (expected {expected})")]
    InvalidValue { field: &'static str, value: String, expected: &'static str },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Sled data directory; `None` selects the in-memory engine.
    pub data_dir: Option<PathBuf>,
    pub media: MediaConfig,
}

/// Credentials for the external media-hosting provider. Upload forwarding
/// is disabled until both values are present.
#[derive(Debug, Clone, Default)]
pub struct MediaConfig {
    pub upload_url: Option<String>,
    pub api_key: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_raw = get_env_or_default("PORT", "5000");
        let port = port_raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
            field: "port",
            value: port_raw,
            expected: "a TCP port number",
        })?;

        let data_dir = match env::var("DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => Some(PathBuf::from(dir)),
            _ => None,
        };

        Ok(Self {
            bind_addr: get_env_or_default("BIND_ADDR", "0.0.0.0"),
            port,
            data_dir,
            media: MediaConfig {
                upload_url: env::var("MEDIA_UPLOAD_URL").ok().filter(|v| !v.is_empty()),
                api_key: env::var("MEDIA_API_KEY").ok().filter(|v| !v.is_empty()),
            },
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: None,
            media: MediaConfig::default(),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert!(config.data_dir.is_none());
        assert!(config.media.upload_url.is_none());
    }
}
