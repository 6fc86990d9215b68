//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the platform config dir
const APP_DIR: &str = "notegpt";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["notegpt.toml", ".notegpt.toml"];

/// Prefix of environment overrides (`NOTEGPT_API__MODEL` → `api.model`)
pub const ENV_PREFIX: &str = "NOTEGPT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables `NOTEGPT_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./notegpt.toml` or `./.notegpt.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/notegpt/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            debug!("Loading project config: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            debug!("Loading explicit config: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        Self::extract(figment.merge(Self::env()))
    }

    /// Defaults plus environment overrides only (for --no-config)
    pub fn load_defaults() -> Result<FileConfig, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(FileConfig::default()))
                .merge(Self::env()),
        )
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/notegpt/config.toml` if set,
    /// otherwise the platform config dir equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [  ENV] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:>5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./notegpt.toml or ./.notegpt.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    /// Points the global config dir into the jail so a developer's own
    /// config never leaks into a test.
    fn isolate(jail: &mut Jail) {
        let dir = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", dir.display());
    }

    #[test]
    fn test_load_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = ConfigLoader::load_defaults().map_err(|e| e.to_string())?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("notegpt"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file(
                "notegpt.toml",
                r#"
                [api]
                model = "gpt-4o"
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.api.model, "gpt-4o");
            assert_eq!(config.api.connect_timeout_seconds, 30);
            Ok(())
        });
    }

    #[test]
    fn test_layering_global_project_explicit_env() {
        Jail::expect_with(|jail| {
            isolate(jail);
            std::fs::create_dir_all(jail.directory().join("xdg/notegpt"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                "xdg/notegpt/config.toml",
                r#"
                [api]
                api_key = "sk-global"
                model = "global-model"
                endpoint = "https://global.example/v1/chat/completions"
                "#,
            )?;
            jail.create_file(
                ".notegpt.toml",
                r#"
                [api]
                model = "project-model"
                "#,
            )?;
            jail.create_file(
                "explicit.toml",
                r#"
                [api]
                endpoint = "https://explicit.example/v1/chat/completions"
                "#,
            )?;
            jail.set_env("NOTEGPT_API__API_KEY", "sk-env");

            let explicit = jail.directory().join("explicit.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| e.to_string())?;

            assert_eq!(config.api.api_key.as_deref(), Some("sk-env"));
            assert_eq!(config.api.model, "project-model");
            assert_eq!(
                config.api.endpoint,
                "https://explicit.example/v1/chat/completions"
            );
            Ok(())
        });
    }

    #[test]
    fn test_no_config_still_reads_env() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("notegpt.toml", "[api]\nmodel = \"ignored\"")?;
            jail.set_env("NOTEGPT_API__MODEL", "from-env");

            let config = ConfigLoader::load_defaults().map_err(|e| e.to_string())?;
            assert_eq!(config.api.model, "from-env");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let missing = jail.directory().join("nope.toml");
            let result = ConfigLoader::load(Some(&missing));
            assert!(matches!(result, Err(ConfigError::Missing(_))));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_fails_validation() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_file("notegpt.toml", "[api]\nendpoint = \"ftp://nope\"")?;

            let result = ConfigLoader::load(None);
            assert!(matches!(result, Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
