//! Error types for neurospatial-spatial

use thiserror::Error;

/// Errors that can occur in spatial relationship operations
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Core library error (shape, calibration, bounds)
    #[error("core error: {0}")]
    Core(#[from] neurospatial_core::Error),

    /// Raster backend error
    #[error("raster error: {0}")]
    Raster(#[from] neurospatial_raster::RasterError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
