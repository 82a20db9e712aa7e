//! Command-line argument parsing for Orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, OutputFormat};

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Headless Keplerian orrery")]
pub struct CliArgs {
    /// Time acceleration relative to real time.
    #[arg(long)]
    pub speed: Option<f64>,

    /// Start with the clock paused.
    #[arg(long)]
    pub paused: Option<bool>,

    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Real seconds per frame.
    #[arg(long)]
    pub frame_dt: Option<f64>,

    /// Line segments per orbit path.
    #[arg(long)]
    pub segments: Option<u32>,

    /// RON body catalog to load instead of the built-in solar system.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Body to centre the report on.
    #[arg(long)]
    pub focus: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.speed {
            self.simulation.speed = speed;
        }
        if let Some(paused) = args.paused {
            self.simulation.paused = paused;
        }
        if let Some(frames) = args.frames {
            self.run.frames = frames;
        }
        if let Some(dt) = args.frame_dt {
            self.run.frame_dt = dt;
        }
        if let Some(segments) = args.segments {
            self.orbits.segments = segments;
        }
        if let Some(ref path) = args.catalog {
            self.catalog.path = Some(path.clone());
        }
        if let Some(format) = args.format {
            self.run.format = format;
        }
        if let Some(ref focus) = args.focus {
            self.run.focus = focus.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
