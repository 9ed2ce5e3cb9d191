//! Error types for neurospatial-raster

use thiserror::Error;

/// Errors that can occur in raster backend primitives
#[derive(Debug, Error)]
pub enum RasterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] neurospatial_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The backend could not complete a primitive (e.g. resource exhaustion)
    #[error("backend failure in {operation}: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

/// Result type for raster operations
pub type RasterResult<T> = Result<T, RasterError>;
