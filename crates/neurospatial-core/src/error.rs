//! Error types for neurospatial-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Calibration and shape problems are always reported as errors; no
//! operation falls back to a default pixel size or a cropped shape.

use thiserror::Error;

/// neurospatial error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid map dimensions
    #[error("invalid map dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Two rasters that must be co-registered have different shapes
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Two rasters that must share a calibration do not
    #[error("calibration mismatch: expected {expected} um/px, got {actual} um/px")]
    CalibrationMismatch { expected: f64, actual: f64 },

    /// A physical-unit quantity was requested from an uncalibrated map
    #[error("image must be calibrated: pixel size is {pixel_size_um} um")]
    Uncalibrated { pixel_size_um: f64 },

    /// Raw buffer length does not match width x height
    #[error("buffer length {len} does not match {width}x{height}")]
    BufferLength { len: usize, width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A mask holds a value other than 0 or 1
    #[error("not a binary mask: value {value} at ({x}, {y})")]
    NotBinary { x: u32, y: u32, value: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
