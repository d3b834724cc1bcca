//! Configuration management for the Climascope client
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. Threshold
//! values that the risk classifier applies live here as named settings
//! rather than literals scattered through the code.

use crate::ClimascopeError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Production backend used when no explicit base URL is configured
const PRODUCTION_BASE_URL: &str = "https://weather-analysis.zeabur.app";
/// Local development backend
const LOCAL_BASE_URL: &str = "http://localhost:8000";

/// Root configuration structure for the Climascope client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClimascopeConfig {
    /// Backend API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Analysis parameter bounds and defaults
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Risk classification thresholds
    #[serde(default)]
    pub thresholds: RiskThresholds,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit base URL override; takes precedence over the environment
    pub base_url: Option<String>,
    /// Deployment environment: "development" or "production"
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Timeout for the lightweight health probe, in seconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_seconds: u64,
    /// Timeout for the full analysis call, in seconds. The upstream
    /// aggregation is expensive, so this budget is deliberately long.
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_seconds: u64,
    /// Timeout for assistant calls, in seconds
    #[serde(default = "default_assistant_timeout")]
    pub assistant_timeout_seconds: u64,
    /// Timeout for place-search lookups, in seconds
    #[serde(default = "default_geocode_timeout")]
    pub geocode_timeout_seconds: u64,
    /// Debounce window for keystroke-triggered suggestion lookups, in ms
    #[serde(default = "default_suggest_debounce")]
    pub suggest_debounce_ms: u64,
}

/// Analysis parameter bounds and defaults
///
/// Earlier revisions of the dashboard bounded the year count at 10; the
/// backend later accepted up to 50. 50 is canonical here, with the bound
/// kept configurable so a stricter deployment can restore the old limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum accepted year count
    #[serde(default = "default_min_years")]
    pub min_years: u32,
    /// Maximum accepted year count
    #[serde(default = "default_max_years")]
    pub max_years: u32,
    /// Default historical-average year count
    #[serde(default = "default_years")]
    pub default_history_years: u32,
    /// Default trend-lookback year count
    #[serde(default = "default_years")]
    pub default_trend_years: u32,
}

/// Fixed thresholds for risk tiers and weather-type derivation
///
/// All comparisons are strict: a value exactly at a threshold stays in
/// the lower tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// Max temperature above which risk is High (°C)
    #[serde(default = "default_temp_high")]
    pub max_temp_high: f64,
    /// Max temperature above which risk is Medium (°C)
    #[serde(default = "default_temp_medium")]
    pub max_temp_medium: f64,
    /// Precipitation probability above which risk is High (%)
    #[serde(default = "default_precip_high")]
    pub precipitation_high: f64,
    /// Precipitation probability above which risk is Medium (%)
    #[serde(default = "default_precip_medium")]
    pub precipitation_medium: f64,
    /// Wind speed above which risk is High (km/h)
    #[serde(default = "default_wind_high")]
    pub wind_high: f64,
    /// Wind speed above which risk is Medium (km/h)
    #[serde(default = "default_wind_medium")]
    pub wind_medium: f64,
    /// Humidity above which risk is High (%)
    #[serde(default = "default_humidity_high")]
    pub humidity_high: f64,
    /// Humidity above which risk is Medium (%)
    #[serde(default = "default_humidity_medium")]
    pub humidity_medium: f64,

    /// Max temperature contributing to a Hot classification (°C)
    #[serde(default = "default_hot_max_temp")]
    pub hot_max_temp: f64,
    /// Humidity contributing to a Hot classification (%)
    #[serde(default = "default_hot_humidity")]
    pub hot_humidity: f64,
    /// Min temperature below which conditions are Cold (°C)
    #[serde(default = "default_cold_min_temp")]
    pub cold_min_temp: f64,
    /// Precipitation probability contributing to Humid (%)
    #[serde(default = "default_humid_precip")]
    pub humid_precipitation: f64,
    /// Humidity contributing to Humid (%)
    #[serde(default = "default_humid_humidity")]
    pub humid_humidity: f64,
    /// Wind speed above which conditions are Windy (km/h)
    #[serde(default = "default_windy_wind")]
    pub windy_wind: f64,
    /// Lower bound of the Muggy average-temperature band (°C, inclusive)
    #[serde(default = "default_muggy_avg_low")]
    pub muggy_avg_temp_low: f64,
    /// Upper bound of the Muggy average-temperature band (°C, inclusive)
    #[serde(default = "default_muggy_avg_high")]
    pub muggy_avg_temp_high: f64,
    /// Humidity contributing to Muggy (%)
    #[serde(default = "default_muggy_humidity")]
    pub muggy_humidity: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_environment() -> String {
    "development".to_string()
}

fn default_health_timeout() -> u64 {
    10
}

fn default_analysis_timeout() -> u64 {
    30
}

fn default_assistant_timeout() -> u64 {
    30
}

fn default_geocode_timeout() -> u64 {
    10
}

fn default_suggest_debounce() -> u64 {
    300
}

fn default_min_years() -> u32 {
    1
}

fn default_max_years() -> u32 {
    50
}

fn default_years() -> u32 {
    5
}

fn default_temp_high() -> f64 {
    35.0
}

fn default_temp_medium() -> f64 {
    30.0
}

fn default_precip_high() -> f64 {
    70.0
}

fn default_precip_medium() -> f64 {
    40.0
}

fn default_wind_high() -> f64 {
    25.0
}

fn default_wind_medium() -> f64 {
    15.0
}

fn default_humidity_high() -> f64 {
    85.0
}

fn default_humidity_medium() -> f64 {
    70.0
}

fn default_hot_max_temp() -> f64 {
    30.0
}

fn default_hot_humidity() -> f64 {
    60.0
}

fn default_cold_min_temp() -> f64 {
    10.0
}

fn default_humid_precip() -> f64 {
    5.0
}

fn default_humid_humidity() -> f64 {
    80.0
}

fn default_windy_wind() -> f64 {
    20.0
}

fn default_muggy_avg_low() -> f64 {
    25.0
}

fn default_muggy_avg_high() -> f64 {
    30.0
}

fn default_muggy_humidity() -> f64 {
    70.0
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            environment: default_environment(),
            health_timeout_seconds: default_health_timeout(),
            analysis_timeout_seconds: default_analysis_timeout(),
            assistant_timeout_seconds: default_assistant_timeout(),
            geocode_timeout_seconds: default_geocode_timeout(),
            suggest_debounce_ms: default_suggest_debounce(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_years: default_min_years(),
            max_years: default_max_years(),
            default_history_years: default_years(),
            default_trend_years: default_years(),
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            max_temp_high: default_temp_high(),
            max_temp_medium: default_temp_medium(),
            precipitation_high: default_precip_high(),
            precipitation_medium: default_precip_medium(),
            wind_high: default_wind_high(),
            wind_medium: default_wind_medium(),
            humidity_high: default_humidity_high(),
            humidity_medium: default_humidity_medium(),
            hot_max_temp: default_hot_max_temp(),
            hot_humidity: default_hot_humidity(),
            cold_min_temp: default_cold_min_temp(),
            humid_precipitation: default_humid_precip(),
            humid_humidity: default_humid_humidity(),
            windy_wind: default_windy_wind(),
            muggy_avg_temp_low: default_muggy_avg_low(),
            muggy_avg_temp_high: default_muggy_avg_high(),
            muggy_humidity: default_muggy_humidity(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ApiConfig {
    /// Resolve the effective base URL
    ///
    /// Precedence: explicit override, then the production default when the
    /// environment says so, then the local development default.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.clone();
        }
        if self.environment == "production" {
            PRODUCTION_BASE_URL.to_string()
        } else {
            LOCAL_BASE_URL.to_string()
        }
    }

    /// Health probe timeout budget
    #[must_use]
    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_seconds)
    }

    /// Analysis call timeout budget
    #[must_use]
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_seconds)
    }

    /// Assistant call timeout budget
    #[must_use]
    pub fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.assistant_timeout_seconds)
    }

    /// Place-search timeout budget
    #[must_use]
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_seconds)
    }

    /// Suggestion debounce window
    #[must_use]
    pub fn suggest_debounce(&self) -> Duration {
        Duration::from_millis(self.suggest_debounce_ms)
    }
}

impl ClimascopeConfig {
    /// Load configuration from the default file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from the specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. CLIMASCOPE_API__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix("CLIMASCOPE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: ClimascopeConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api()?;
        self.validate_analysis()?;
        self.validate_thresholds()?;
        self.validate_logging()?;
        Ok(())
    }

    fn validate_api(&self) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(ClimascopeError::config(
                    "Base URL must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        let valid_environments = ["development", "production"];
        if !valid_environments.contains(&self.api.environment.as_str()) {
            return Err(ClimascopeError::config(format!(
                "Invalid environment '{}'. Must be one of: {}",
                self.api.environment,
                valid_environments.join(", ")
            ))
            .into());
        }

        if self.api.analysis_timeout_seconds == 0 || self.api.analysis_timeout_seconds > 120 {
            return Err(ClimascopeError::config(
                "Analysis timeout must be between 1 and 120 seconds",
            )
            .into());
        }

        if self.api.health_timeout_seconds == 0 || self.api.health_timeout_seconds > 60 {
            return Err(ClimascopeError::config(
                "Health probe timeout must be between 1 and 60 seconds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_analysis(&self) -> Result<()> {
        if self.analysis.min_years == 0 {
            return Err(ClimascopeError::config("Minimum year count must be at least 1").into());
        }

        if self.analysis.max_years < self.analysis.min_years {
            return Err(ClimascopeError::config(
                "Maximum year count cannot be below the minimum",
            )
            .into());
        }

        let in_bounds = |v: u32| v >= self.analysis.min_years && v <= self.analysis.max_years;
        if !in_bounds(self.analysis.default_history_years)
            || !in_bounds(self.analysis.default_trend_years)
        {
            return Err(ClimascopeError::config(
                "Default year counts must lie within the configured bounds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_thresholds(&self) -> Result<()> {
        let t = &self.thresholds;
        let ordered = [
            (t.max_temp_medium, t.max_temp_high, "max temperature"),
            (t.precipitation_medium, t.precipitation_high, "precipitation"),
            (t.wind_medium, t.wind_high, "wind speed"),
            (t.humidity_medium, t.humidity_high, "humidity"),
        ];

        for (medium, high, name) in ordered {
            if medium >= high {
                return Err(ClimascopeError::config(format!(
                    "The {name} Medium threshold must be below the High threshold"
                ))
                .into());
            }
        }

        if t.muggy_avg_temp_low > t.muggy_avg_temp_high {
            return Err(ClimascopeError::config(
                "Muggy temperature band is inverted",
            )
            .into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimascopeError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClimascopeError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
