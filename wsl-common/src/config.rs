//! Configuration loading and store location resolution
//!
//! Bootstrap settings are resolved in priority order:
//! 1. Command-line arguments and environment variables (collected by the
//!    binary into [`ConfigOverrides`])
//! 2. TOML config file
//! 3. Compiled defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Placeholder replaced by the database name in a templated connection string
pub const DATABASE_PLACEHOLDER: &str = "{db}";

/// Marker of an in-memory connection string (`sqlite::memory:`)
const IN_MEMORY: &str = ":memory:";

/// Configuration as read from the TOML file
///
/// Every field is optional; missing values fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Storage connection string (see [`store_url`])
    pub database_url: Option<String>,
    /// Directory holding a built web UI to serve instead of the embedded one
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load a TOML config file
    ///
    /// A missing file is not an error: a warning is logged and defaults are
    /// used. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    /// Explicit TOML config path; the platform default is used when absent
    pub config_file: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub static_dir: Option<PathBuf>,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve configuration from overrides, the TOML file and defaults
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let toml = match overrides.config_file.as_deref() {
            Some(path) => TomlConfig::load(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => TomlConfig::load(&path)?,
                _ => TomlConfig::default(),
            },
        };

        Ok(Self::merge(overrides, toml))
    }

    /// Merge overrides over TOML values over compiled defaults
    pub fn merge(overrides: ConfigOverrides, toml: TomlConfig) -> Self {
        Self {
            host: overrides
                .host
                .or(toml.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            database_url: overrides
                .database_url
                .or(toml.database_url)
                .unwrap_or_else(default_database_url),
            static_dir: overrides.static_dir.or(toml.static_dir),
            log_level: overrides.log_level.unwrap_or(toml.logging.level),
        }
    }

    /// Socket address string to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection URL of the named database
    pub fn store_url(&self, database_name: &str) -> String {
        store_url(&self.database_url, database_name)
    }
}

/// Build the connection URL of one database from the configured connection string
///
/// A connection string containing `{db}` has the placeholder replaced by the
/// database name. `sqlite::memory:` gives each database a named in-memory
/// store, shared by every connection in the process that uses the name.
/// Otherwise it names a directory and each database is a
/// file `<directory>/<name>.db` in it; a query string on the base is kept,
/// defaulting to `mode=rwc` so the file is created on first use.
///
/// # Examples
/// ```
/// use wsl_common::config::store_url;
///
/// assert_eq!(
///     store_url("sqlite://data", "worship_songs_db"),
///     "sqlite://data/worship_songs_db.db?mode=rwc"
/// );
/// assert_eq!(
///     store_url("sqlite://data/{db}.sqlite", "worship_songs_db"),
///     "sqlite://data/worship_songs_db.sqlite"
/// );
/// assert_eq!(
///     store_url("sqlite::memory:", "worship_songs_db"),
///     "sqlite:file:worship_songs_db?mode=memory"
/// );
/// ```
pub fn store_url(base: &str, database_name: &str) -> String {
    if base.contains(DATABASE_PLACEHOLDER) {
        return base.replace(DATABASE_PLACEHOLDER, database_name);
    }
    if base.contains(IN_MEMORY) {
        return format!("sqlite:file:{}?mode=memory", database_name);
    }

    let (path, query) = match base.split_once('?') {
        Some((path, query)) => (path, query),
        None => (base, "mode=rwc"),
    };

    format!("{}/{}.db?{}", path.trim_end_matches('/'), database_name, query)
}

/// Directory that holds the database files of a directory-style connection string
///
/// Returns `None` for templated or in-memory connection strings.
pub fn sqlite_directory(base: &str) -> Option<PathBuf> {
    if base.contains(DATABASE_PLACEHOLDER) || base.contains(IN_MEMORY) {
        return None;
    }

    let rest = base
        .strip_prefix("sqlite://")
        .or_else(|| base.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);

    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Platform config file location (`<config_dir>/worship-songs/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("worship-songs").join("config.toml"))
}

/// Default connection string: a directory under the platform data dir
pub fn default_database_url() -> String {
    format!("sqlite://{}", default_data_dir().display())
}

/// OS-dependent default data folder
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("worship-songs"))
        .unwrap_or_else(|| PathBuf::from("./worship_songs_data"))
}
