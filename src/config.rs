use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use log::debug;

use crate::layout::InstallLayout;

/// Overrides the primary install root
pub const ROOT_ENV: &str = "INTERP_REGISTRY_ROOT";
/// Overrides the extras root
pub const EXTRAS_ROOT_ENV: &str = "INTERP_REGISTRY_EXTRAS_ROOT";

const APP_DIR: &str = "interp-registry";

/// The global configuration for the interpreter registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding one sub-directory per installed interpreter
    pub interpreter_root: PathBuf,

    /// Directory holding extra modules, one sub-directory per interpreter
    pub extras_root: PathBuf,

    /// Host shell used by the `sh` interpreter
    pub shell_binary: PathBuf,

    /// JVM launcher used by the JVM-hosted interpreters (bsh, jruby)
    pub java_binary: PathBuf,

    /// Log verbosity level
    pub log_level: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        RegistryConfig {
            interpreter_root: base.join("interpreters"),
            extras_root: base.join("extras"),
            shell_binary: PathBuf::from("/bin/sh"),
            java_binary: PathBuf::from("java"),
            log_level: "info".to_string(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        // Check if file exists
        if !config_path.exists() {
            info!("Config file not found at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        // Read the file
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // Parse the TOML
        let config: RegistryConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        // Serialize to TOML
        let config_str = toml::to_string(self)
            .context("Failed to serialize config to TOML")?;

        // Write to file
        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to file: {:?}", config_path))?;

        Ok(())
    }

    /// Get the default config path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR).join("config.toml")
        } else {
            PathBuf::from("./config.toml")
        }
    }

    /// Apply install root overrides from the environment
    pub fn apply_env_overrides(&mut self) {
        // Empty values are ignored
        self.apply_overrides(env::var_os(ROOT_ENV), env::var_os(EXTRAS_ROOT_ENV));
    }

    fn apply_overrides(&mut self, root: Option<std::ffi::OsString>, extras: Option<std::ffi::OsString>) {
        if let Some(root) = root.filter(|value| !value.is_empty()) {
            debug!("Interpreter root overridden to {:?}", root);
            self.interpreter_root = PathBuf::from(root);
        }
        if let Some(extras) = extras.filter(|value| !value.is_empty()) {
            debug!("Extras root overridden to {:?}", extras);
            self.extras_root = PathBuf::from(extras);
        }
    }

    pub fn layout(&self) -> InstallLayout {
        InstallLayout::new(&self.interpreter_root, &self.extras_root)
    }
}

/// Settles the configuration after a load attempt: a broken config file is
/// reported and replaced by the defaults so lookups keep working, then the
/// environment overrides are applied.
pub fn init_config(loaded: Result<RegistryConfig>) -> RegistryConfig {
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config: {:#}, using defaults", e);
            RegistryConfig::default()
        }
    };

    config.apply_env_overrides();
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = RegistryConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = RegistryConfig {
            interpreter_root: PathBuf::from("/opt/interp"),
            extras_root: PathBuf::from("/opt/extras"),
            shell_binary: PathBuf::from("/system/bin/sh"),
            java_binary: PathBuf::from("/usr/lib/jvm/bin/java"),
            log_level: "debug".to_string(),
        };
        config.save(&path).unwrap();

        assert_eq!(RegistryConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "interpreter_root = \"/srv/interp\"\n").unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.interpreter_root, PathBuf::from("/srv/interp"));
        assert_eq!(config.extras_root, RegistryConfig::default().extras_root);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "interpreter_root = [not toml").unwrap();

        let err = RegistryConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_init_config_falls_back_on_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = 3").unwrap();

        let config = init_config(RegistryConfig::load(&path));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_replace_roots() {
        let mut config = RegistryConfig::default();
        config.apply_overrides(Some("/mnt/interp".into()), Some("".into()));

        assert_eq!(config.interpreter_root, PathBuf::from("/mnt/interp"));
        assert_eq!(config.extras_root, RegistryConfig::default().extras_root);
        assert_eq!(config.layout().interpreter_dir("lua"), PathBuf::from("/mnt/interp/lua"));
    }
}
