//! Run orchestration: config, logging, catalog, frames, report.

use orrery_config::{CliArgs, Config, OutputFormat};
use orrery_orbit::{BodyCatalog, orbit_paths};
use tracing::{info, warn};

use crate::error::AppError;
use crate::frame_loop::FrameLoop;
use crate::platform::PlatformDirs;
use crate::report::{render_json, render_table};

/// Full CLI run: prints the final report on stdout.
pub fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::rooted_at(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    config.validate()?;

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    let catalog = load_catalog(&config)?;
    let report = simulate(&config, &catalog)?;
    println!("{report}");
    Ok(())
}

/// The configured catalog file, or the built-in solar system.
pub fn load_catalog(config: &Config) -> Result<BodyCatalog, AppError> {
    let catalog = match &config.catalog.path {
        Some(path) => BodyCatalog::load(path)?,
        None => BodyCatalog::solar_system()?,
    };
    info!(
        bodies = catalog.len(),
        focusable = catalog.focusable().count(),
        "Catalog ready"
    );
    Ok(catalog)
}

/// Run the configured number of frames and render the final ephemeris.
pub fn simulate(config: &Config, catalog: &BodyCatalog) -> Result<String, AppError> {
    let sim = &config.simulation;
    let speed = sim.clamped_speed();
    if speed != sim.speed {
        warn!(
            "Speed {} outside [{}, {}], using {speed}",
            sim.speed, sim.min_speed, sim.max_speed
        );
    }

    let paths = orbit_paths(catalog, config.orbits.segments);
    info!(
        paths = paths.len(),
        segments = config.orbits.segments,
        "Tessellated orbit paths"
    );

    let mut frames = FrameLoop::new(sim.days_per_second);
    let mut ephemeris = frames.tick(0.0, speed, sim.paused, catalog);
    for _ in 0..config.run.frames {
        ephemeris = frames.tick(config.run.frame_dt, speed, sim.paused, catalog);
    }
    info!(
        frames = frames.frame_count(),
        elapsed_days = frames.elapsed_days(),
        "{}",
        ephemeris.summary
    );

    let focus_name = config.run.focus.as_str();
    let focus = match catalog.get(focus_name) {
        Some(body) if body.focusable => ephemeris.state(focus_name),
        Some(_) => {
            warn!("Body `{focus_name}` is not focusable");
            None
        }
        None => {
            warn!("Focus target `{focus_name}` is not in the catalog");
            None
        }
    };

    let report = match config.run.format {
        OutputFormat::Table => render_table(&ephemeris, focus, &paths),
        OutputFormat::Json => render_json(&ephemeris, focus, &paths)?,
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_simulate_advances_by_speed() {
        let mut config = Config::default();
        config.run.frames = 60;
        config.run.format = OutputFormat::Json;
        let catalog = BodyCatalog::solar_system().unwrap();

        let report = simulate(&config, &catalog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        let days = value["elapsed_days"].as_f64().unwrap();
        assert!((days - 50.0).abs() < 1e-9, "days = {days}");
        assert_eq!(value["focus"], "Sun");
    }

    #[test]
    fn test_simulate_paused_stays_at_epoch() {
        let mut config = Config::default();
        config.simulation.paused = true;
        config.run.frames = 30;
        let catalog = BodyCatalog::solar_system().unwrap();

        let report = simulate(&config, &catalog).unwrap();
        assert!(report.starts_with("Epoch + 0.00 days"));
    }

    #[test]
    fn test_unfocusable_target_is_dropped() {
        let mut config = Config::default();
        config.run.frames = 1;
        config.run.focus = "Moon".to_string();
        let catalog = BodyCatalog::solar_system().unwrap();

        let report = simulate(&config, &catalog).unwrap();
        assert!(!report.contains("Focus:"));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.ron");
        std::fs::write(
            &path,
            r#"[
                (name: "A"),
                (name: "B", orbit: Some((semi_major_axis: 0.5, parent: Some("A")))),
            ]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.catalog.path = Some(path);
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let mut config = Config::default();
        config.catalog.path = Some(PathBuf::from("/nonexistent/orrery/bodies.ron"));
        assert!(matches!(
            load_catalog(&config),
            Err(AppError::Catalog(orrery_orbit::CatalogError::ReadError(_)))
        ));
    }
}
