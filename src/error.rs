//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, raster, and serialization errors, and provides
//! semantic variants for discovery and representative-sample failures.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No GeoTIFF files found in {root:?}")]
    Discovery { root: PathBuf },

    #[error("Raster error: {0}")]
    Raster(#[from] crate::io::RasterError),

    #[error("All {failed} discovered files failed metadata extraction; no sample available")]
    NoSampleAvailable { failed: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
