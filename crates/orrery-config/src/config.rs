//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulation clock settings.
    pub simulation: SimulationConfig,
    /// Orbit line tessellation.
    pub orbits: OrbitConfig,
    /// Where the body catalog comes from.
    pub catalog: CatalogConfig,
    /// Headless run settings.
    pub run: RunConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time acceleration relative to real time.
    pub speed: f64,
    /// Lower bound of the speed control.
    pub min_speed: f64,
    /// Upper bound of the speed control.
    pub max_speed: f64,
    /// Start with the clock paused.
    pub paused: bool,
    /// Simulated days per real second at speed 1.
    pub days_per_second: f64,
}

/// Orbit path configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Line segments per orbit path.
    pub segments: u32,
}

/// Body catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// RON catalog file; `None` uses the built-in solar system.
    pub path: Option<PathBuf>,
}

/// How the headless driver reports its final ephemeris.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Headless run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Frames to simulate.
    pub frames: u32,
    /// Real seconds between frames.
    pub frame_dt: f64,
    /// Report format.
    pub format: OutputFormat,
    /// Body the report centres on, like a camera target.
    pub focus: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: 50.0,
            min_speed: 1.0,
            max_speed: 2000.0,
            paused: false,
            days_per_second: 1.0,
        }
    }
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self { segments: 256 }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_dt: 1.0 / 60.0,
            format: OutputFormat::Table,
            focus: "Sun".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Configured speed clamped into `[min_speed, max_speed]`.
    pub fn clamped_speed(&self) -> f64 {
        if self.speed.is_nan() {
            return self.min_speed;
        }
        self.speed.clamp(self.min_speed, self.max_speed)
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        if !(sim.min_speed.is_finite() && sim.max_speed.is_finite()) || sim.min_speed < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.min_speed",
                reason: format!("speed bounds must be finite and non-negative, got {}..{}", sim.min_speed, sim.max_speed),
            });
        }
        if sim.min_speed > sim.max_speed {
            return Err(ConfigError::InvalidValue {
                field: "simulation.max_speed",
                reason: format!("{} is below min_speed {}", sim.max_speed, sim.min_speed),
            });
        }
        if !(sim.days_per_second.is_finite() && sim.days_per_second > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "simulation.days_per_second",
                reason: format!("must be positive, got {}", sim.days_per_second),
            });
        }
        if self.orbits.segments == 0 {
            return Err(ConfigError::InvalidValue {
                field: "orbits.segments",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.run.frame_dt.is_finite() && self.run.frame_dt >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "run.frame_dt",
                reason: format!("must be a non-negative number of seconds, got {}", self.run.frame_dt),
            });
        }
        Ok(())
    }
}
