//! Configuration loading
//!
//! Resolution priority (highest first):
//! 1. Command-line argument / environment variable (handled by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing config file is not fatal: a warning is logged and the compiled
//! defaults apply. A config file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP bind address
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Default database connection pool size
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Database path that selects a private in-memory database
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub bind_address: Option<String>,
    pub database_path: Option<PathBuf>,
    pub max_connections: Option<u32>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub listing: ListingConfig,
}

/// Listing behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// Report real upcoming-show counts in the grouped venue listing and in
    /// search results. Off by default: those counts are reported as zero.
    #[serde(default)]
    pub count_upcoming_shows: bool,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub database_path: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub log_level: String,
    pub listing: ListingConfig,
}

impl Settings {
    /// Resolve settings from overrides, the config file, and defaults
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let config_file = overrides
            .config_file
            .clone()
            .or_else(default_config_file);

        let toml_config = match config_file {
            Some(path) => load_config_file(&path)?,
            None => TomlConfig::default(),
        };

        Ok(Self::merge(overrides, toml_config))
    }

    /// Merge overrides over a parsed config file over compiled defaults
    pub fn merge(overrides: Overrides, toml_config: TomlConfig) -> Self {
        let bind_address = overrides
            .bind_address
            .or(toml_config.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database_path = overrides
            .database_path
            .or(toml_config.database_path)
            .unwrap_or_else(default_database_path);

        Self {
            bind_address,
            database_path,
            max_connections: toml_config
                .max_connections
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            log_level: toml_config
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            listing: toml_config.listing,
        }
    }

    /// True when the configured database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_DATABASE
    }
}

/// Parse a TOML config file
///
/// Returns compiled defaults (with a warning) when the file does not exist.
pub fn load_config_file(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file not found: {} (using defaults)", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

/// Platform config file location, if one exists
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/fyyur/config.toml");
    if cfg!(target_os = "linux") && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join("fyyur.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_defaults() {
        let settings = Settings::merge(Overrides::default(), TomlConfig::default());
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.listing.count_upcoming_shows);
        assert!(settings.database_path.ends_with("fyyur.db"));
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let toml_config = TomlConfig {
            bind_address: Some("0.0.0.0:8080".to_string()),
            database_path: Some(PathBuf::from("/srv/fyyur.db")),
            ..Default::default()
        };
        let overrides = Overrides {
            bind_address: Some("127.0.0.1:9000".to_string()),
            ..Default::default()
        };

        let settings = Settings::merge(overrides, toml_config);
        assert_eq!(settings.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.database_path, PathBuf::from("/srv/fyyur.db"));
    }

    #[test]
    fn test_zero_pool_size_falls_back() {
        let toml_config = TomlConfig {
            max_connections: Some(0),
            ..Default::default()
        };
        let settings = Settings::merge(Overrides::default(), toml_config);
        assert_eq!(settings.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_parse_listing_section() {
        let config: TomlConfig = toml::from_str(
            r#"
            log_level = "debug"

            [listing]
            count_upcoming_shows = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.listing.count_upcoming_shows);
    }

    #[test]
    fn test_in_memory_detection() {
        let overrides = Overrides {
            database_path: Some(PathBuf::from(IN_MEMORY_DATABASE)),
            ..Default::default()
        };
        assert!(Settings::merge(overrides, TomlConfig::default()).is_in_memory());
    }
}
