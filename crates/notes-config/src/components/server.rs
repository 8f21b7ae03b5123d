//! HTTP server component configuration

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
    /// Origins allowed by the CORS layer. Anything else gets no CORS headers.
    ///
    /// Only the local front-end dev server is allowed by default. A deployment
    /// lists its public front ends here or in `NOTES_ALLOWED_ORIGINS`, e.g.
    ///
    /// ```toml
    /// [server]
    /// allowed_origins = [
    ///     "http://localhost:3000",
    ///     "https://srizan17.github.io",
    ///     "https://srijanbasnet.com",
    ///     "https://srijanbasnet.com.np",
    ///     "https://www.srijanbasnet.com.np",
    ///     "https://api.srijanbasnet.com.np",
    /// ]
    /// ```
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// `host:port` as handed to the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation("server.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        Ok(())
    }
}

/// Split a comma-separated origin list, dropping blank entries
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
