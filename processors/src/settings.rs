use std::{env::VarError, path::PathBuf, time::Duration};

use config::{Config, File};
use serde::Deserialize;
use snafu::{OptionExt, ResultExt};
use strum::{AsRefStr, EnumString};
use voyage_core::{
    ConfigurationError, GeofenceKind, MinimumStay, ProximityConfig, SegmenterConfig,
    configuration_error::OutOfRangeSnafu,
};

use crate::{
    Result,
    error::error::{SettingsSnafu, UnknownEnvironmentSnafu},
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    pub num_workers: u32,
    pub proximity: ProximitySettings,
    pub segmentation: SegmentationSettings,
    #[serde(with = "humantime_serde")]
    pub min_stay: Duration,
    pub input: InputSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProximitySettings {
    pub max_speed_knots: f64,
    pub radius_nautical_miles: f64,
    #[serde(default)]
    pub geofence: GeofenceKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmentationSettings {
    #[serde(with = "humantime_serde")]
    pub gap_threshold: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    pub pings: PathBuf,
    pub ports: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Environment {
    #[default]
    Local,
    Test,
    Production,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Settings {
    /// Loads `config/<APP_ENVIRONMENT>` overlaid with `VOYAGE_PROCESSORS__*` variables.
    /// An unset `APP_ENVIRONMENT` means `local`.
    pub fn new() -> Result<Self> {
        Self::load(environment_from(std::env::var("APP_ENVIRONMENT"))?)
    }

    pub fn load(environment: Environment) -> Result<Self> {
        Config::builder()
            .add_source(File::with_name(&format!("config/{}", environment.as_ref())).required(true))
            .add_source(config::Environment::with_prefix("VOYAGE_PROCESSORS").separator("__"))
            .set_override("environment", environment.as_ref())
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .context(SettingsSnafu)
    }

    pub fn proximity_config(&self) -> std::result::Result<ProximityConfig, ConfigurationError> {
        ProximityConfig::new(
            self.proximity.max_speed_knots,
            self.proximity.radius_nautical_miles,
        )
    }

    pub fn segmenter_config(&self) -> std::result::Result<SegmenterConfig, ConfigurationError> {
        SegmenterConfig::new(chrono_duration(
            "gap_threshold",
            self.segmentation.gap_threshold,
        )?)
    }

    pub fn minimum_stay(&self) -> std::result::Result<MinimumStay, ConfigurationError> {
        MinimumStay::new(chrono_duration("min_stay", self.min_stay)?)
    }
}

fn environment_from(variable: std::result::Result<String, VarError>) -> Result<Environment> {
    match variable {
        Ok(value) => value
            .trim()
            .parse()
            .ok()
            .context(UnknownEnvironmentSnafu { value }),
        Err(VarError::NotPresent) => Ok(Environment::default()),
        Err(VarError::NotUnicode(value)) => UnknownEnvironmentSnafu {
            value: value.to_string_lossy(),
        }
        .fail(),
    }
}

fn chrono_duration(
    name: &'static str,
    duration: Duration,
) -> std::result::Result<chrono::Duration, ConfigurationError> {
    chrono::Duration::from_std(duration)
        .ok()
        .context(OutOfRangeSnafu {
            name,
            value: duration.as_secs_f64() / 3600.0,
        })
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
