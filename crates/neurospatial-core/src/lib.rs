//! neurospatial core - data structures for label-map spatial analysis
//!
//! This crate provides the value types shared by every other crate of the
//! workspace:
//!
//! - [`LabelMap`] / [`LabelMapMut`] - Integer label raster (immutable / mutable)
//! - [`BinaryMask`] - {0, 1} raster used as an intermediate or restricting region
//! - [`PositivitySet`] - Per-label boolean flags
//! - [`RegionAdjacencyGraph`] - Undirected "touches" relation between labels
//! - [`Radius`] - Expansion radius in pixels or microns
//!
//! Label `0` is background everywhere and is never reported as a result.

pub mod error;
pub mod graph;
pub mod label_map;
pub mod mask;
pub mod positivity;
pub mod radius;

pub use error::{Error, Result};
pub use graph::RegionAdjacencyGraph;
pub use label_map::{LabelMap, LabelMapMut};
pub use mask::BinaryMask;
pub use positivity::PositivitySet;
pub use radius::Radius;
