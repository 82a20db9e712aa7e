//! Configuration system for Orrery.
//!
//! Runtime settings persist to disk as `config.ron`. Missing sections and
//! fields fall back to defaults, unknown fields are ignored, and CLI flags
//! parsed with clap override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CatalogConfig, Config, DebugConfig, OrbitConfig, OutputFormat, RunConfig, SimulationConfig,
};
pub use error::ConfigError;
