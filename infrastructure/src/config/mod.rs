//! Configuration file loading for notegpt
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `NOTEGPT_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./notegpt.toml` or `./.notegpt.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/notegpt/config.toml`
//! 5. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{FileApiConfig, FileConfig, FileLoggingConfig, FileMarkersConfig};
pub use loader::{ConfigLoader, ENV_PREFIX};
