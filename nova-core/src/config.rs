//! Nova configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{NovaError, NovaResult};
use crate::event::EventColor;
use crate::external::DEFAULT_WINDOW_DAYS;
use crate::grid::{DEFAULT_MAX_EVENT_DOTS, GridOptions};
use crate::store::FileStore;

static DEFAULT_DATA_DIR: &str = "~/.nova";
static DEFAULT_STORAGE_PREFIX: &str = "nova-";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_prefix() -> String {
    DEFAULT_STORAGE_PREFIX.to_string()
}

fn default_window_days() -> u64 {
    DEFAULT_WINDOW_DAYS
}

fn default_external_color() -> EventColor {
    EventColor::Purple
}

fn default_max_event_dots() -> usize {
    DEFAULT_MAX_EVENT_DOTS
}

/// Configuration at ~/.config/nova/config.toml, overridable with `NOVA_*`
/// environment variables (`NOVA_SERVER__PORT=8080` for nested keys).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NovaConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Prefix for every key written to the store
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,

    /// ICS feed: file path, http(s):// or webcal:// URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_calendar: Option<String>,

    #[serde(default = "default_window_days")]
    pub external_window_days: u64,

    #[serde(default = "default_external_color")]
    pub external_color: EventColor,

    #[serde(default = "default_max_event_dots")]
    pub max_event_dots: usize,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,

    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,

    /// How often the external feed is re-fetched
    #[serde(default = "ServerConfig::default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        4096
    }

    fn default_refresh_interval_secs() -> u64 {
        300
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: Self::default_host(),
            port: Self::default_port(),
            refresh_interval_secs: Self::default_refresh_interval_secs(),
        }
    }
}

impl Default for NovaConfig {
    fn default() -> Self {
        NovaConfig {
            data_dir: default_data_dir(),
            storage_prefix: default_storage_prefix(),
            external_calendar: None,
            external_window_days: default_window_days(),
            external_color: default_external_color(),
            max_event_dots: default_max_event_dots(),
            server: ServerConfig::default(),
        }
    }
}

impl NovaConfig {
    pub fn config_path() -> NovaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NovaError::Config("Could not determine config directory".into()))?
            .join("nova");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default path plus `NOVA_*` environment overrides.
    pub fn load() -> NovaResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (missing file is fine) plus environment overrides.
    pub fn load_from(path: &Path) -> NovaResult<Self> {
        let config: NovaConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("NOVA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| NovaError::Config(e.to_string()))?;

        Ok(config)
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.data_path())
    }

    /// Store key for the local event list, e.g. `nova-events`.
    pub fn events_key(&self) -> String {
        format!("{}events", self.storage_prefix)
    }

    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            max_event_dots: self.max_event_dots,
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> NovaResult<()> {
        let defaults = NovaConfig::default();
        let contents = format!(
            "\
# nova configuration

# Where local events are stored:
# data_dir = \"{data_dir}\"

# Prefix for storage keys:
# storage_prefix = \"{prefix}\"

# External calendar feed (file path, https:// or webcal:// URL):
# external_calendar = \"webcal://example.com/calendar.ics\"

# Days ahead to keep external events for:
# external_window_days = {window}

# Color for external events (blue, green, purple, red):
# external_color = \"{color}\"

# Event dots shown per day in the month grid:
# max_event_dots = {dots}

# [server]
# host = \"{host}\"
# port = {port}
# refresh_interval_secs = {refresh}
",
            data_dir = DEFAULT_DATA_DIR,
            prefix = defaults.storage_prefix,
            window = defaults.external_window_days,
            color = defaults.external_color,
            dots = defaults.max_event_dots,
            host = defaults.server.host,
            port = defaults.server.port,
            refresh = defaults.server.refresh_interval_secs,
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                NovaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| NovaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
