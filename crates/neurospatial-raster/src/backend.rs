//! Raster backend capability interface
//!
//! The spatial engine never manipulates rasters directly for dilation,
//! relabeling, centroid reduction or adjacency; it asks a [`RasterBackend`].
//! [`CpuBackend`] is the in-process implementation built on this crate's
//! functions. Every primitive reads its inputs and returns a fresh value;
//! intermediates live only inside the call that made them.

use crate::adjacency::region_adjacency;
use crate::conncomp::{ConnectivityType, connected_component_relabel};
use crate::dilate::dilate_labels;
use crate::error::RasterResult;
use crate::mask::{binarize, multiply};
use crate::stats::{centroid_points, reduce_to_centroids};
use neurospatial_core::{BinaryMask, LabelMap, RegionAdjacencyGraph};

/// The raster primitives the spatial engine depends on
pub trait RasterBackend {
    /// Grow every label by `radius_px`; nearest label wins, ties to the lower id.
    fn dilate_labels(&self, map: &LabelMap, radius_px: u32) -> RasterResult<LabelMap>;

    /// 1 where `raster > 0`, 0 elsewhere.
    fn binarize(&self, raster: &LabelMap) -> RasterResult<BinaryMask>;

    /// Contiguous ids from 1 in scan order of each component's first pixel.
    fn connected_component_relabel(&self, mask: &BinaryMask) -> RasterResult<LabelMap>;

    /// One pixel per label at its rounded centroid, holding the label id.
    fn reduce_to_centroids(&self, map: &LabelMap) -> RasterResult<LabelMap>;

    /// Rounded centroid `(x, y, label)` of every label, collisions included.
    fn centroid_points(&self, map: &LabelMap) -> RasterResult<Vec<(u32, u32, u32)>> {
        Ok(centroid_points(map))
    }

    /// Undirected touches-relation between the labels of `map`.
    fn region_adjacency(&self, map: &LabelMap) -> RasterResult<RegionAdjacencyGraph>;

    /// Zero `raster` outside `mask`.
    fn multiply(&self, raster: &LabelMap, mask: &BinaryMask) -> RasterResult<LabelMap>;
}

/// In-process raster backend
///
/// # Examples
///
/// ```
/// use neurospatial_raster::{ConnectivityType, CpuBackend, RasterBackend};
/// use neurospatial_core::LabelMap;
///
/// let backend = CpuBackend::default().with_adjacency_connectivity(ConnectivityType::EightWay);
/// let map = LabelMap::from_vec(3, 1, vec![1, 0, 2]).unwrap();
/// let dilated = backend.dilate_labels(&map, 1).unwrap();
/// assert_eq!(dilated.row_data(0), &[1, 1, 2]);
/// assert_eq!(backend.region_adjacency(&dilated).unwrap().edge_count(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuBackend {
    /// Connectivity used when relabeling binary masks
    pub relabel_connectivity: ConnectivityType,
    /// Connectivity used when extracting region adjacency
    pub adjacency_connectivity: ConnectivityType,
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self {
            relabel_connectivity: ConnectivityType::EightWay,
            adjacency_connectivity: ConnectivityType::FourWay,
        }
    }
}

impl CpuBackend {
    /// Create a backend with default connectivities
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relabeling connectivity
    pub fn with_relabel_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.relabel_connectivity = connectivity;
        self
    }

    /// Set the adjacency connectivity
    pub fn with_adjacency_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.adjacency_connectivity = connectivity;
        self
    }
}

impl RasterBackend for CpuBackend {
    fn dilate_labels(&self, map: &LabelMap, radius_px: u32) -> RasterResult<LabelMap> {
        dilate_labels(map, radius_px)
    }

    fn binarize(&self, raster: &LabelMap) -> RasterResult<BinaryMask> {
        Ok(binarize(raster))
    }

    fn connected_component_relabel(&self, mask: &BinaryMask) -> RasterResult<LabelMap> {
        connected_component_relabel(mask, self.relabel_connectivity)
    }

    fn reduce_to_centroids(&self, map: &LabelMap) -> RasterResult<LabelMap> {
        reduce_to_centroids(map)
    }

    fn region_adjacency(&self, map: &LabelMap) -> RasterResult<RegionAdjacencyGraph> {
        region_adjacency(map, self.adjacency_connectivity)
    }

    fn multiply(&self, raster: &LabelMap, mask: &BinaryMask) -> RasterResult<LabelMap> {
        multiply(raster, mask)
    }
}
