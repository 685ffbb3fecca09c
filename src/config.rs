use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::models::MatchOptions;
use crate::services::DataFiles;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 4001 }

/// Location of the reference CSV tables
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_states_file")]
    pub states_file: String,
    #[serde(default = "default_cities_file")]
    pub cities_file: String,
    #[serde(default = "default_bands_file")]
    pub bands_file: String,
    #[serde(default = "default_types_file")]
    pub types_file: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            states_file: default_states_file(),
            cities_file: default_cities_file(),
            bands_file: default_bands_file(),
            types_file: default_types_file(),
        }
    }
}

impl DataSettings {
    pub fn files(&self) -> DataFiles {
        DataFiles {
            states: self.dir.join(&self.states_file),
            cities: self.dir.join(&self.cities_file),
            bands: self.dir.join(&self.bands_file),
            types: self.dir.join(&self.types_file),
        }
    }
}

fn default_data_dir() -> PathBuf { PathBuf::from("data") }
fn default_states_file() -> String { "states_and_union_territories.csv".to_string() }
fn default_cities_file() -> String { "cities.csv".to_string() }
fn default_bands_file() -> String { "city_budget_duration.csv".to_string() }
fn default_types_file() -> String { "cities_type_data.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_deduplicate")]
    pub deduplicate_cities: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            deduplicate_cities: default_deduplicate(),
        }
    }
}

impl MatchingSettings {
    pub fn options(&self) -> MatchOptions {
        MatchOptions {
            deduplicate_cities: self.deduplicate_cities,
        }
    }
}

fn default_deduplicate() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with TRIPMATCH__)
    /// 5. PORT, as set by most hosting platforms
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TRIPMATCH__SERVER__PORT -> server.port
            .add_source(environment());

        with_port_override(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("TRIPMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn with_port_override(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    match std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => builder.set_override("server.port", i64::from(port)),
        None => Ok(builder),
    }
}
