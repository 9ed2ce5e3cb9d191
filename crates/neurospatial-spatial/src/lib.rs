//! neurospatial-spatial - Spatial relationships between labeled cell populations
//!
//! This crate is the analysis engine. It works on co-registered label maps
//! and asks a [`RasterBackend`](neurospatial_raster::RasterBackend) for every
//! raster primitive it needs:
//!
//! - **Neighbor counting** - touching neighbors within one population and
//!   across a reference/marker pair
//! - **Overlap gating** - label positivity by covered-area fraction
//! - **Label set algebra** - subsetting, intersection and area filtering with
//!   contiguous relabeling
//! - **Region aggregation** - per-region member counts and areas
//! - **Marker combinatorics** - co-expressing populations of marker sets
//!
//! Inputs are never modified; every operation returns fresh values.
//!
//! # Examples
//!
//! ```
//! use neurospatial_core::{LabelMap, Radius};
//! use neurospatial_raster::CpuBackend;
//! use neurospatial_spatial::{NeighborOptions, touching_neighbor_count};
//!
//! let map = LabelMap::from_vec(5, 1, vec![1, 0, 2, 0, 3]).unwrap();
//! let options = NeighborOptions::new(Radius::Pixels(1));
//! let ncm = touching_neighbor_count(&CpuBackend::new(), &map, &options, None).unwrap();
//! assert_eq!(ncm.counts(), &[0, 1, 2, 1]);
//! ```

pub mod algebra;
pub mod analysis;
pub mod combinations;
pub mod error;
pub mod gate;
pub mod neighbor;
pub mod region;

pub use error::{SpatialError, SpatialResult};

pub use algebra::{count_labels, filter_by_area, intersect, intersect_all, subset};
pub use analysis::{MarkerRow, PairReport, ReferenceRow, analyse_pair};
pub use combinations::{MAX_MARKERS, MarkerCombination, marker_combinations};
pub use gate::{GateOptions, OverlapStats, overlap_gate, overlap_stats};
pub use neighbor::{
    NeighborCountMap, NeighborOptions, marker_around_ref, marker_positive_labels,
    ref_around_marker, touching_neighbor_count,
};
pub use region::{RegionAggregate, RegionRow, aggregate_regions, keep_regions_with_min_members};
