//! TOML-based application configuration.
//!
//! Stores analytics preferences:
//! - Time zone used to read hours and calendar dates
//! - Energy trend and optimal-hour sample minimums
//! - Goal velocity window and trend banding
//!
//! Configuration is stored at `~/.config/dayforge/config.toml`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::energy::{
    EnergyAnalyzer, DEFAULT_TREND_MIN_SAMPLES, MIN_RELIABLE_SAMPLES, MIN_TREND_SAMPLES,
};
use crate::error::{ConfigError, CoreError, ParseError, Result};
use crate::goals::{GoalProgressAnalyzer, DEFAULT_ACCELERATING_RATIO, DEFAULT_VELOCITY_WINDOW_DAYS};

/// Returns `~/.config/dayforge[-dev]/` based on DAYFORGE_ENV.
///
/// Set DAYFORGE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYFORGE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayforge-dev")
    } else {
        base_dir.join("dayforge")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Parse an IANA zone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> Result<Tz, ParseError> {
    Tz::from_str(name.trim()).map_err(|_| ParseError::UnknownTimeZone(name.to_string()))
}

/// Settings shared by all analyzers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// IANA zone used to read hour-of-day and calendar dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Energy analytics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    #[serde(default = "default_trend_min_samples")]
    pub trend_min_samples: usize,
    #[serde(default = "default_optimal_min_samples")]
    pub optimal_min_samples: u32,
}

/// Goal progress configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_velocity_window_days")]
    pub velocity_window_days: u32,
    #[serde(default = "default_accelerating_ratio")]
    pub accelerating_ratio: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayforge/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub energy: EnergyConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

// Default functions
fn default_timezone() -> String {
    "UTC".into()
}
fn default_trend_min_samples() -> usize {
    DEFAULT_TREND_MIN_SAMPLES
}
fn default_optimal_min_samples() -> u32 {
    MIN_RELIABLE_SAMPLES
}
fn default_velocity_window_days() -> u32 {
    DEFAULT_VELOCITY_WINDOW_DAYS
}
fn default_accelerating_ratio() -> f64 {
    DEFAULT_ACCELERATING_RATIO
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            trend_min_samples: default_trend_min_samples(),
            optimal_min_samples: default_optimal_min_samples(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            velocity_window_days: default_velocity_window_days(),
            accelerating_ratio: default_accelerating_ratio(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::MissingKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        }
                    }
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            debug!(path = %path.display(), "wrote default configuration");
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load and validate a config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory. Call [`Config::save`] to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// into the field's type, or the result fails validation. The config is
    /// left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        parse_timezone(&self.analytics.timezone)
            .map_err(|e| invalid("analytics.timezone", &e.to_string()))?;
        if self.energy.trend_min_samples < MIN_TREND_SAMPLES {
            return Err(invalid("energy.trend_min_samples", "must be at least 2"));
        }
        if self.energy.optimal_min_samples < MIN_RELIABLE_SAMPLES {
            return Err(invalid("energy.optimal_min_samples", "must be at least 2"));
        }
        if self.goals.velocity_window_days == 0 {
            return Err(invalid("goals.velocity_window_days", "must be greater than zero"));
        }
        if !self.goals.accelerating_ratio.is_finite() || self.goals.accelerating_ratio < 1.0 {
            return Err(invalid("goals.accelerating_ratio", "must be a number >= 1.0"));
        }
        Ok(())
    }

    /// Configured time zone.
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.analytics.timezone).map_err(CoreError::from)
    }

    /// Energy analyzer built from this configuration.
    pub fn energy_analyzer(&self) -> Result<EnergyAnalyzer> {
        Ok(EnergyAnalyzer::with_settings(
            self.timezone()?,
            self.energy.trend_min_samples,
            self.energy.optimal_min_samples,
        ))
    }

    /// Goal progress analyzer built from this configuration.
    pub fn goal_analyzer(&self) -> Result<GoalProgressAnalyzer> {
        Ok(GoalProgressAnalyzer::with_settings(
            self.timezone()?,
            self.goals.velocity_window_days,
            self.goals.accelerating_ratio,
        ))
    }
}
