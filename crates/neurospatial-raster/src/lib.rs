//! neurospatial-raster - Raster primitives for label-map analysis
//!
//! This crate provides the low-level capability set the spatial engine
//! depends on:
//!
//! - **Label dilation** - nearest-label isotropic growth with lower-id ties
//! - **Distance transform** - exact squared distance to the nearest label
//! - **Binarization and masking** - `> 0` masks and elementwise zeroing
//! - **Connected component relabeling** - deterministic contiguous ids
//! - **Label statistics** - pixel counts, centroids, bounds; centroid reduction
//! - **Region adjacency** - which labels touch
//!
//! The [`RasterBackend`] trait bundles these behind a typed interface and
//! [`CpuBackend`] implements it in-process.
//!
//! # Examples
//!
//! ```
//! use neurospatial_raster::{ConnectivityType, connected_component_relabel};
//! use neurospatial_core::{BinaryMask, LabelMap};
//!
//! let map = LabelMap::from_vec(5, 1, vec![1, 1, 0, 1, 0]).unwrap();
//! let mask = BinaryMask::from_label_map(map).unwrap();
//! let labeled = connected_component_relabel(&mask, ConnectivityType::FourWay).unwrap();
//! assert_eq!(labeled.row_data(0), &[1, 1, 0, 2, 0]);
//! ```

pub mod adjacency;
pub mod backend;
pub mod conncomp;
pub mod dilate;
pub mod distance;
pub mod error;
pub mod mask;
pub mod stats;

// Re-export core types
pub use neurospatial_core;

pub use error::{RasterError, RasterResult};

pub use adjacency::region_adjacency;
pub use backend::{CpuBackend, RasterBackend};
pub use conncomp::{ConnectivityType, connected_component_relabel};
pub use dilate::{MAX_DILATION_RADIUS, dilate_labels};
pub use distance::{UNREACHABLE, squared_distance_to_labels};
pub use mask::{binarize, multiply};
pub use stats::{
    Bounds, ComponentStats, centroid_points, label_pixel_counts, label_stats,
    reduce_to_centroids,
};
