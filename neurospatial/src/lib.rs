//! Neurospatial - Spatial relationships between segmented cell populations
//!
//! Works on label maps produced by an upstream segmentation step (one
//! integer id per cell, 0 for background) and answers how cells relate in
//! space.
//!
//! # Overview
//!
//! - Touching-neighbor counts within a population and across a
//!   reference/marker pair
//! - Marker positivity by overlap fraction
//! - Subsetting, intersection and co-expression combinations of populations
//! - Per-region cell counts and region areas in square microns
//!
//! Raster work goes through the [`raster::RasterBackend`] trait;
//! [`raster::CpuBackend`] is the in-process implementation.
//!
//! # Example
//!
//! ```
//! use neurospatial::{LabelMap, Radius};
//! use neurospatial::raster::CpuBackend;
//! use neurospatial::spatial::{NeighborOptions, touching_neighbor_count};
//!
//! // Two cells with a five-pixel gap, 0.5 um per pixel
//! let mut map = LabelMap::new(20, 20).unwrap().with_pixel_size(0.5).to_mut();
//! map.set_pixel(7, 10, 1).unwrap();
//! map.set_pixel(13, 10, 2).unwrap();
//! let map: LabelMap = map.into();
//!
//! let options = NeighborOptions::new(Radius::Microns(1.5));
//! let ncm = touching_neighbor_count(&CpuBackend::new(), &map, &options, None).unwrap();
//! assert_eq!(ncm.counts(), &[0, 1, 1]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use neurospatial_core::*;

// Re-export capability crates as modules to avoid name conflicts
pub use neurospatial_raster as raster;
pub use neurospatial_spatial as spatial;
