//! Layered configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{parse_origin_list, ApiConfig, ConfigError, ConfigResult};

/// Environment variable naming a TOML config file
pub const CONFIG_PATH_VAR: &str = "NOTES_CONFIG";

const HOST_VAR: &str = "NOTES_HOST";
const PORT_VAR: &str = "NOTES_PORT";
const ORIGINS_VAR: &str = "NOTES_ALLOWED_ORIGINS";
const DB_URL_VAR: &str = "NOTES_DB_URL";
const DB_NAMESPACE_VAR: &str = "NOTES_DB_NAMESPACE";
const DB_DATABASE_VAR: &str = "NOTES_DB_DATABASE";
const DB_TABLE_VAR: &str = "NOTES_DB_TABLE";
const DB_USERNAME_VAR: &str = "NOTES_DB_USERNAME";
const DB_PASSWORD_VAR: &str = "NOTES_DB_PASSWORD";

/// Resolves an [`ApiConfig`] from defaults, an optional file and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration using the process environment
    ///
    /// `path` takes precedence over `NOTES_CONFIG`. An explicitly named file
    /// that cannot be read is an error.
    pub fn load(path: Option<&Path>) -> ConfigResult<ApiConfig> {
        let env_path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        let path = path.map(Path::to_path_buf).or(env_path);
        Self::load_with(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Load configuration with an explicit variable lookup
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> ConfigResult<ApiConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => ApiConfig::default(),
        };
        apply_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without applying overrides
    pub fn load_from_file(path: &Path) -> ConfigResult<ApiConfig> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Parse TOML text; absent keys fall back to defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<ApiConfig> {
        Ok(toml::from_str(content)?)
    }
}

fn apply_overrides<F>(config: &mut ApiConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| {
        let value = lookup(key);
        if value.is_some() {
            debug!("Applying override from {key}");
        }
        value
    };

    if let Some(host) = get(HOST_VAR) {
        config.server.host = host;
    }
    if let Some(port) = get(PORT_VAR) {
        config.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidValue {
            key: PORT_VAR.to_string(),
            reason: format!("'{port}' is not a port number: {e}"),
        })?;
    }
    if let Some(origins) = get(ORIGINS_VAR) {
        config.server.allowed_origins = parse_origin_list(&origins);
    }

    let db = &mut config.database;
    if let Some(url) = get(DB_URL_VAR) {
        db.url = url;
    }
    if let Some(namespace) = get(DB_NAMESPACE_VAR) {
        db.namespace = namespace;
    }
    if let Some(database) = get(DB_DATABASE_VAR) {
        db.database = database;
    }
    if let Some(table) = get(DB_TABLE_VAR) {
        db.table = table;
    }
    if let Some(username) = get(DB_USERNAME_VAR) {
        db.username = Some(username);
    }
    if let Some(password) = get(DB_PASSWORD_VAR) {
        db.password = Some(password);
    }

    Ok(())
}
