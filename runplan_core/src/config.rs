//! Configuration file support for runplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/runplan/config.toml`.
//! Every section is optional:
//!
//! ```toml
//! [calendar]
//! today = 2026-02-17   # pin "today" instead of reading the clock (quoted works too)
//!
//! [plan]
//! default_weeks = 16
//!
//! [output]
//! format = "json"
//! ```

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Calendar configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct CalendarConfig {
    /// Fixed reference date used as "today"
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_today"
    )]
    pub today: Option<NaiveDate>,
}

/// Accept a bare TOML local date (`2026-02-17`) or a `YYYY-MM-DD` string
fn deserialize_today<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    match toml::Value::deserialize(deserializer)? {
        toml::Value::String(raw) => crate::calendar::parse_date(&raw)
            .map(Some)
            .map_err(D::Error::custom),
        toml::Value::Datetime(dt) => match (dt.date, dt.time) {
            (Some(date), None) => NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date {}", dt))),
            _ => Err(D::Error::custom(format!(
                "expected a date without a time, got {}",
                dt
            ))),
        },
        other => Err(D::Error::custom(format!(
            "expected a date, got {}",
            other.type_str()
        ))),
    }
}

/// Plan defaults
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    #[serde(default = "default_weeks")]
    pub default_weeks: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_weeks: default_weeks(),
        }
    }
}

/// How commands print their results
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_weeks() -> u32 {
    12
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("runplan").join("config.toml")
    }

    /// Save the configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.plan.default_weeks == 0 {
            return Err(Error::Config("plan.default_weeks must be at least 1".into()));
        }
        Ok(())
    }

    /// The date to treat as "today": the configured override, else the local clock
    pub fn today(&self) -> NaiveDate {
        self.calendar
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
