//! Headless Orrery driver.
//!
//! Stands in for a renderer: resolves platform directories, loads config and
//! the body catalog, ticks the simulation clock once per frame and reports
//! the resulting ephemeris.

pub mod app;
pub mod error;
pub mod frame_loop;
pub mod platform;
pub mod report;

pub use app::{load_catalog, run, simulate};
pub use error::AppError;
