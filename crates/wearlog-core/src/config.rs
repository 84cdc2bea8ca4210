use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather lookup settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Local post/hashtag storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Identity injected into every saved post
    #[serde(default)]
    pub user: UserConfig,
}

/// How the current location is resolved before a weather lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Use the configured latitude/longitude
    Fixed,
    /// Ask an IP geolocation endpoint
    #[default]
    Ip,
    /// Never resolve a location (lookups silently never complete)
    Denied,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub mode: LocationMode,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

// Seoul City Hall
fn default_latitude() -> f64 {
    37.5665
}

fn default_longitude() -> f64 {
    126.978
}

fn default_ip_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            mode: LocationMode::default(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL of the OpenWeather-compatible API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// API key (can also be set via `OPENWEATHER_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Unit system passed to the API ("metric" yields °C)
    #[serde(default = "default_units")]
    pub units: String,

    /// Language for condition descriptions
    #[serde(default = "default_lang")]
    pub lang: String,

    /// How long the CLI waits for the first snapshot before giving up
    #[serde(default = "default_startup_wait_secs")]
    pub startup_wait_secs: u64,

    #[serde(default)]
    pub location: LocationConfig,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "kr".to_string()
}

fn default_startup_wait_secs() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            units: default_units(),
            lang: default_lang(),
            startup_wait_secs: default_startup_wait_secs(),
            location: LocationConfig::default(),
        }
    }
}

impl WeatherConfig {
    /// The key from the environment wins over the file.
    pub fn effective_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file name, relative to `config_dir` unless absolute
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

fn default_database_file() -> String {
    "wearlog.db".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub user_id: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wearlog");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            storage: StorageConfig::default(),
            user: UserConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, creating a default one if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; errors fail the load.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.location.mode == LocationMode::Ip {
            self.validate_url(
                &self.weather.location.ip_lookup_url,
                "weather.location.ip_lookup_url",
                &mut result,
            );
        }

        if self.weather.effective_api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured (set {API_KEY_ENV}) - weather will be unavailable"),
            );
        }

        let location = &self.weather.location;
        if !(-90.0..=90.0).contains(&location.latitude) {
            result.add_error("weather.location.latitude", "Latitude must be within -90..90");
        }
        if !(-180.0..=180.0).contains(&location.longitude) {
            result.add_error(
                "weather.location.longitude",
                "Longitude must be within -180..180",
            );
        }

        if self.weather.units != "metric" {
            result.add_warning(
                "weather.units",
                "Clothing recommendations assume metric (°C) temperatures",
            );
        }

        if self.storage.database_file.trim().is_empty() {
            result.add_error("storage.database_file", "Database file name cannot be empty");
        }

        if self.user.user_id.trim().is_empty() {
            result.add_error("user.user_id", "User id cannot be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Resolved path of the SQLite database
    pub fn database_path(&self) -> PathBuf {
        let file = PathBuf::from(&self.storage.database_file);
        if file.is_absolute() {
            file
        } else {
            self.config_dir.join(file)
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wearlog");

        Ok(config_dir.join("config.toml"))
    }
}
