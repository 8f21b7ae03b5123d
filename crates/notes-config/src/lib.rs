//! # Notes API Configuration
//!
//! Typed configuration for the notes API server and its document store.
//!
//! Values are resolved in layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `NOTES_*` environment variables
//!
//! ```rust,no_run
//! use notes_config::ConfigLoader;
//!
//! let config = ConfigLoader::load(None).expect("valid configuration");
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod components;
mod error;
mod loader;

pub use components::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::*;
