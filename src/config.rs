use crate::error::SliderError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_RADIUS_DELTA: f64 = 50.0;
pub const DEFAULT_LEVEL_COUNT: usize = 3;
pub const DEFAULT_OPTION_COUNT: usize = 5;
pub const DEFAULT_START_LEVEL: usize = 2;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SliderConfig {
    pub radius_delta: f64,
    pub level_count: usize,
    pub option_count: usize,
    pub start_level: Option<usize>,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            radius_delta: DEFAULT_RADIUS_DELTA,
            level_count: DEFAULT_LEVEL_COUNT,
            option_count: DEFAULT_OPTION_COUNT,
            start_level: None,
        }
    }
}

impl SliderConfig {
    pub fn validate(&self) -> Result<(), SliderError> {
        if self.level_count < 1 {
            return Err(SliderError::invalid("level_count", "must be at least 1"));
        }
        if self.option_count < 1 {
            return Err(SliderError::invalid("option_count", "must be at least 1"));
        }
        if !self.radius_delta.is_finite() || self.radius_delta <= 0.0 {
            return Err(SliderError::invalid(
                "radius_delta",
                format!("must be a positive number, got {}", self.radius_delta),
            ));
        }
        if let Some(level) = self.start_level
            && level >= self.level_count
        {
            return Err(SliderError::invalid(
                "start_level",
                format!("must be below level_count {}, got {}", self.level_count, level),
            ));
        }
        Ok(())
    }

    /// Level every marker is bound to at construction.
    pub fn start_level(&self) -> usize {
        self.start_level
            .unwrap_or_else(|| DEFAULT_START_LEVEL.min(self.level_count.saturating_sub(1)))
    }

    /// Radius of `level`; levels grow outwards by `radius_delta`.
    pub fn level_radius(&self, level: usize) -> f64 {
        level as f64 * self.radius_delta + self.radius_delta
    }

    pub fn outer_radius(&self) -> f64 {
        self.level_radius(self.level_count.saturating_sub(1))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Invalid(#[from] SliderError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "polyslider", "polyslider").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads the config file layered with `POLYSLIDER_*` environment variables.
pub fn load_config() -> Result<SliderConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("POLYSLIDER").try_parsing(true))
        .build()?;

    finish(s)
}

pub fn parse_config(toml: &str) -> Result<SliderConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(s)
}

fn finish(s: config::Config) -> Result<SliderConfig, ConfigError> {
    let config: SliderConfig = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default() -> SliderConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default configuration: {}", e);
            SliderConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
