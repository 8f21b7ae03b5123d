//! Document store component configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Connection settings for the SurrealDB document store
///
/// `url` is any connection string understood by the SurrealDB `any` engine:
/// `ws://host:8000`, `https://host`, or `mem://` for an embedded in-memory
/// store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string
    pub url: String,
    /// SurrealDB namespace
    pub namespace: String,
    /// SurrealDB database within the namespace
    pub database: String,
    /// Table holding the note documents
    pub table: String,
    /// Root user for sign-in, if the server requires one
    pub username: Option<String>,
    /// Password for `username`
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_string(),
            namespace: "notes".to_string(),
            database: "notes".to_string(),
            table: "quotes".to_string(),
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .field("table", &self.table)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl DatabaseConfig {
    /// Root credentials, when both halves are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }

    pub(crate) fn validate(&self) -> ConfigResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Validation("database.url must not be empty".into()));
        }
        if self.namespace.is_empty() || self.database.is_empty() {
            return Err(ConfigError::Validation(
                "database.namespace and database.database must not be empty".into(),
            ));
        }
        if !is_identifier(&self.table) {
            return Err(ConfigError::Validation(format!(
                "database.table '{}' is not a valid table name",
                self.table
            )));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(ConfigError::Validation(
                "database.username and database.password must be set together".into(),
            ));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
