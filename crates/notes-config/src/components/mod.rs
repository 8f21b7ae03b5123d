//! Configuration components
//!
//! One struct per concern, each with sensible defaults so that a partial
//! TOML file (or none at all) yields a runnable configuration.

mod database;
mod server;

pub use database::DatabaseConfig;
pub use server::{parse_origin_list, ServerConfig};

use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Root configuration for the notes API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// HTTP listener and CORS settings
    pub server: ServerConfig,
    /// Document store connection settings
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// Check every component for consistency
    pub fn validate(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.database.validate()
    }
}
