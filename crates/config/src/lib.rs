//! Configuration models and loaders for the orrery simulation.

use std::fs::File;
use std::path::Path;

use orrery_core::constants::{
    DEFAULT_GRAVITY_CONSTANT, DEFAULT_MIN_SEPARATION, DEFAULT_SOFTENING_SQ, DEFAULT_STAR_MASS,
    DEFAULT_SUBSTEPS, DEFAULT_TIME_SCALE, DEFAULT_VELOCITY_PROBE_DT,
};
use orrery_core::time::SimulationClock;
use serde::Deserialize;
use thiserror::Error;

/// Top-level simulation configuration. Every table and field is optional.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub clock: ClockConfig,
}

/// Tuning for the N-body integrator.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity_constant: f64,
    pub softening_sq: f64,
    pub min_separation: f64,
    pub star_mass: f64,
    pub velocity_probe_dt: f64,
    pub substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_constant: DEFAULT_GRAVITY_CONSTANT,
            softening_sq: DEFAULT_SOFTENING_SQ,
            min_separation: DEFAULT_MIN_SEPARATION,
            star_mass: DEFAULT_STAR_MASS,
            velocity_probe_dt: DEFAULT_VELOCITY_PROBE_DT,
            substeps: DEFAULT_SUBSTEPS,
        }
    }
}

/// Initial state of the simulation clock.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    pub time_scale: f64,
    pub start_time: f64,
    pub paused: bool,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            start_time: 0.0,
            paused: false,
        }
    }
}

impl ClockConfig {
    /// Build a clock in the configured initial state.
    pub fn build_clock(&self) -> SimulationClock {
        let mut clock = SimulationClock::new(self.time_scale);
        clock.set_time(self.start_time);
        clock.set_paused(self.paused);
        clock
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {value}")]
    Invalid { field: &'static str, value: f64 },
}

impl SimulationConfig {
    /// Check that every tuning value is usable by the integrator and clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        let positive = [
            ("physics.gravity_constant", physics.gravity_constant),
            ("physics.star_mass", physics.star_mass),
            ("physics.velocity_probe_dt", physics.velocity_probe_dt),
        ];
        let non_negative = [
            ("physics.softening_sq", physics.softening_sq),
            ("physics.min_separation", physics.min_separation),
            ("clock.time_scale", self.clock.time_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if !self.clock.start_time.is_finite() {
            return Err(ConfigError::Invalid {
                field: "clock.start_time",
                value: self.clock.start_time,
            });
        }
        Ok(())
    }
}

/// Load and validate a simulation config. `.toml` files are read as TOML, anything else as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig, ConfigError> {
    let path = path.as_ref();
    let config: SimulationConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}
