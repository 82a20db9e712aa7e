//! Application error type.

use orrery_config::ConfigError;
use orrery_orbit::CatalogError;

use crate::platform::PlatformError;

/// Everything that can abort a run before or after the simulation itself.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Failed to encode the JSON report.
    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
