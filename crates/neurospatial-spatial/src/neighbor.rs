//! Neighbor counting
//!
//! Every count here is taken on the region adjacency graph of a dilated
//! population: labels are grown by the expansion radius, optionally
//! restricted to a mask, and two labels are neighbors when their grown
//! footprints touch.
//!
//! Three directions are provided:
//!
//! - [`touching_neighbor_count`] - same population
//! - [`ref_around_marker`] - for each marker cell, the same-population count
//!   of the reference region its centroid falls in
//! - [`marker_around_ref`] - for each reference cell, how many touching
//!   reference cells carry the marker

use crate::error::SpatialResult;
use neurospatial_core::{BinaryMask, LabelMap, PositivitySet, Radius};
use neurospatial_raster::RasterBackend;

/// Options for neighbor counting
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NeighborOptions {
    /// Expansion radius applied to the reference population
    pub radius: Radius,
}

impl NeighborOptions {
    /// Create options with the given radius
    pub fn new(radius: Radius) -> Self {
        Self { radius }
    }

    /// Set the radius
    pub fn with_radius(mut self, radius: Radius) -> Self {
        self.radius = radius;
        self
    }
}

/// Same-population neighbor counts, per label and painted as a raster
///
/// Every pixel of a label's dilated (and masked) footprint holds that
/// label's count; background holds 0.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborCountMap {
    map: LabelMap,
    counts: Vec<u32>,
}

impl NeighborCountMap {
    /// The painted count raster.
    pub fn as_label_map(&self) -> &LabelMap {
        &self.map
    }

    /// Consume, returning the painted count raster.
    pub fn into_label_map(self) -> LabelMap {
        self.map
    }

    /// Counts indexed by label id; index 0 is 0.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Count of one label; 0 for unknown labels.
    pub fn count(&self, label: u32) -> u32 {
        self.counts.get(label as usize).copied().unwrap_or(0)
    }

    /// Count at pixel (x, y); `None` out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.map.get_pixel(x, y)
    }
}

/// Dilate `population` by the configured radius and restrict it to `mask`.
pub(crate) fn dilate_restricted<B: RasterBackend + ?Sized>(
    backend: &B,
    population: &LabelMap,
    options: &NeighborOptions,
    mask: Option<&BinaryMask>,
) -> SpatialResult<LabelMap> {
    if let Some(mask) = mask {
        population.check_same_geometry(mask.as_label_map())?;
    }
    let radius_px = options.radius.to_pixels(population)?;
    let dilated = backend.dilate_labels(population, radius_px)?;
    let restricted = match mask {
        Some(mask) => backend.multiply(&dilated, mask)?,
        None => dilated,
    };
    tracing::debug!(radius_px, masked = mask.is_some(), "prepared dilated population");
    Ok(restricted)
}

fn count_map_from_dilated<B: RasterBackend + ?Sized>(
    backend: &B,
    dilated: &LabelMap,
    max_label: u32,
) -> SpatialResult<NeighborCountMap> {
    let rag = backend.region_adjacency(dilated)?;
    let counts: Vec<u32> = (0..=max_label).map(|id| rag.degree(id)).collect();

    let mut painted = dilated.to_mut();
    for v in painted.data_mut().iter_mut() {
        if *v != 0 {
            *v = counts.get(*v as usize).copied().unwrap_or(0);
        }
    }

    Ok(NeighborCountMap {
        map: painted.into(),
        counts,
    })
}

/// Count touching same-population neighbors of every label
///
/// # Arguments
///
/// * `backend` - Raster backend
/// * `population` - Label map of one population
/// * `options` - Expansion radius
/// * `mask` - Optional restricting region; dilated pixels outside it are dropped
///
/// # Errors
///
/// Fails on a micron radius without calibration, a mask that is not
/// co-registered with `population`, or a backend failure.
pub fn touching_neighbor_count<B: RasterBackend + ?Sized>(
    backend: &B,
    population: &LabelMap,
    options: &NeighborOptions,
    mask: Option<&BinaryMask>,
) -> SpatialResult<NeighborCountMap> {
    let dilated = dilate_restricted(backend, population, options, mask)?;
    let ncm = count_map_from_dilated(backend, &dilated, population.max_label())?;
    tracing::debug!(
        labels = population.max_label(),
        with_neighbors = ncm.counts.iter().filter(|&&c| c > 0).count(),
        "counted touching neighbors"
    );
    Ok(ncm)
}

/// For each marker cell, count the reference cells around it
///
/// Each marker label is reduced to its centroid pixel and the reference
/// population's [`NeighborCountMap`] is sampled there. Labels sharing a
/// centroid pixel each read that pixel. A centroid outside
/// every dilated reference footprint reads 0, meaning "no covering
/// reference cell", not "no neighbors".
///
/// # Returns
///
/// Counts indexed by marker label id; index 0 is 0.
pub fn ref_around_marker<B: RasterBackend + ?Sized>(
    backend: &B,
    reference: &LabelMap,
    marker: &LabelMap,
    options: &NeighborOptions,
    mask: Option<&BinaryMask>,
) -> SpatialResult<Vec<u32>> {
    reference.check_same_geometry(marker)?;
    let ncm = touching_neighbor_count(backend, reference, options, mask)?;
    let centroids = backend.centroid_points(marker)?;

    let mut out = vec![0u32; marker.max_label() as usize + 1];
    for &(x, y, id) in &centroids {
        if let Some(slot) = out.get_mut(id as usize) {
            *slot = ncm.map.get_pixel(x, y).unwrap_or(0);
        }
    }
    out[0] = 0;

    tracing::debug!(
        markers = marker.max_label(),
        sampled = centroids.len(),
        "sampled reference counts at marker centroids"
    );
    Ok(out)
}

/// Flag every reference label with at least one marker-positive pixel
/// under its own (undilated) footprint.
pub fn marker_positive_labels(
    reference: &LabelMap,
    marker: &LabelMap,
) -> SpatialResult<PositivitySet> {
    reference.check_same_geometry(marker)?;
    let mut positive = PositivitySet::new(reference.max_label());
    for (&r, &m) in reference.data().iter().zip(marker.data()) {
        if r != 0 && m != 0 {
            positive.set(r, true);
        }
    }
    Ok(positive)
}

/// For each reference cell, count touching reference cells that carry the marker
///
/// A reference label carries the marker when any marker pixel lies under
/// its undilated footprint. The count is the number of distinct
/// RAG-adjacent reference labels that carry it, so several marker fragments
/// over one neighbor count once.
///
/// # Returns
///
/// Counts indexed by reference label id; index 0 is 0.
pub fn marker_around_ref<B: RasterBackend + ?Sized>(
    backend: &B,
    reference: &LabelMap,
    marker: &LabelMap,
    options: &NeighborOptions,
    mask: Option<&BinaryMask>,
) -> SpatialResult<Vec<u32>> {
    reference.check_same_geometry(marker)?;
    let dilated = dilate_restricted(backend, reference, options, mask)?;
    let marker_mask = backend.binarize(marker)?;
    let positive = marker_positive_labels(reference, marker_mask.as_label_map())?;
    let rag = backend.region_adjacency(&dilated)?;

    let out: Vec<u32> = (0..=reference.max_label())
        .map(|id| {
            if id == 0 {
                return 0;
            }
            rag.neighbors(id)
                .filter(|&q| positive.is_positive(q))
                .count() as u32
        })
        .collect();

    tracing::debug!(
        references = reference.max_label(),
        marker_positive = positive.positive_count(),
        "counted marker-carrying neighbors"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurospatial_core::Error as CoreError;
    use neurospatial_raster::CpuBackend;
    use neurospatial_test::fixtures::{MapBuilder, map_from_rows, mask_from_rows};

    fn px(r: u32) -> NeighborOptions {
        NeighborOptions::new(Radius::Pixels(r))
    }

    #[test]
    fn test_isolated_seeds_by_radius() {
        // Five background pixels between the seeds
        let map = MapBuilder::new(20, 20).point(7, 10, 1).point(13, 10, 2).build();
        let backend = CpuBackend::new();

        let ncm = touching_neighbor_count(&backend, &map, &px(2), None).unwrap();
        assert_eq!(ncm.counts(), &[0, 0, 0]);

        let ncm = touching_neighbor_count(&backend, &map, &px(3), None).unwrap();
        assert_eq!(ncm.counts(), &[0, 1, 1]);
        assert_eq!(ncm.get_pixel(7, 10), Some(1));
        assert_eq!(ncm.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_count_is_degree() {
        // 2 touches 1 and 3; 1 and 3 do not touch
        let map = map_from_rows(&[&[1, 1, 2, 3, 3]]);
        let ncm = touching_neighbor_count(&CpuBackend::new(), &map, &px(0), None).unwrap();
        assert_eq!(ncm.counts(), &[0, 1, 2, 1]);
        assert_eq!(ncm.as_label_map().row_data(0), &[1, 1, 2, 1, 1]);
    }

    #[test]
    fn test_mask_cuts_adjacency() {
        let map = MapBuilder::new(20, 20).point(7, 10, 1).point(13, 10, 2).build();
        // Only the left half of the image is inside the mask
        let mask = MapBuilder::new(20, 20).rect(0, 0, 10, 20, 1).build_mask();
        let ncm =
            touching_neighbor_count(&CpuBackend::new(), &map, &px(3), Some(&mask)).unwrap();
        assert_eq!(ncm.counts(), &[0, 0, 0]);
        assert_eq!(ncm.get_pixel(13, 10), Some(0));
    }

    #[test]
    fn test_micron_radius_requires_calibration() {
        let map = MapBuilder::new(10, 10).point(2, 2, 1).build();
        let opts = NeighborOptions::new(Radius::Microns(5.0));
        let err = touching_neighbor_count(&CpuBackend::new(), &map, &opts, None).unwrap_err();
        assert!(matches!(
            err,
            crate::SpatialError::Core(CoreError::Uncalibrated { .. })
        ));
    }

    #[test]
    fn test_micron_radius_converted() {
        let map = MapBuilder::new(20, 20)
            .pixel_size(0.5)
            .point(7, 10, 1)
            .point(13, 10, 2)
            .build();
        let opts = NeighborOptions::new(Radius::Microns(1.5));
        let ncm = touching_neighbor_count(&CpuBackend::new(), &map, &opts, None).unwrap();
        assert_eq!(ncm.counts(), &[0, 1, 1]);
    }

    #[test]
    fn test_mask_shape_mismatch() {
        let map = MapBuilder::new(10, 10).point(2, 2, 1).build();
        let mask = MapBuilder::new(10, 9).build_mask();
        let err =
            touching_neighbor_count(&CpuBackend::new(), &map, &px(1), Some(&mask)).unwrap_err();
        assert!(matches!(
            err,
            crate::SpatialError::Core(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_population() {
        let map = LabelMap::new(8, 8).unwrap();
        let backend = CpuBackend::new();
        let ncm = touching_neighbor_count(&backend, &map, &px(2), None).unwrap();
        assert_eq!(ncm.counts(), &[0]);
        assert!(ncm.as_label_map().is_empty());
        let marker = LabelMap::new(8, 8).unwrap();
        assert_eq!(
            ref_around_marker(&backend, &map, &marker, &px(2), None).unwrap(),
            vec![0]
        );
        assert_eq!(
            marker_around_ref(&backend, &map, &marker, &px(2), None).unwrap(),
            vec![0]
        );
    }

    #[test]
    fn test_ref_around_marker_uncovered_centroid() {
        let reference = map_from_rows(&[&[1, 2, 0, 0, 0, 0]]);
        let marker = map_from_rows(&[&[0, 0, 0, 0, 0, 3]]);
        let counts =
            ref_around_marker(&CpuBackend::new(), &reference, &marker, &px(0), None).unwrap();
        assert_eq!(counts, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ref_around_marker_shared_centroid() {
        // Marker 3 is a ring around marker 5; both centroids land on (2, 3)
        let reference = MapBuilder::new(8, 6)
            .rect(0, 0, 4, 6, 1)
            .rect(4, 0, 4, 6, 2)
            .build();
        let marker = MapBuilder::new(8, 6)
            .rect(1, 2, 3, 3, 3)
            .point(2, 3, 5)
            .build();
        let counts =
            ref_around_marker(&CpuBackend::new(), &reference, &marker, &px(0), None).unwrap();
        assert_eq!(counts, vec![0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_marker_around_ref_with_mask() {
        let reference = map_from_rows(&[&[1, 1, 2, 2, 3, 3]]);
        let marker = map_from_rows(&[&[5, 0, 0, 0, 0, 6]]);
        let backend = CpuBackend::new();
        let counts = marker_around_ref(&backend, &reference, &marker, &px(0), None).unwrap();
        assert_eq!(counts, vec![0, 0, 2, 0]);

        // The mask cuts 2-3 and hides the marker pixel over cell 1
        let mask = mask_from_rows(&[&[0, 1, 1, 1, 0, 1]]);
        let counts =
            marker_around_ref(&backend, &reference, &marker, &px(0), Some(&mask)).unwrap();
        assert_eq!(counts, vec![0, 0, 1, 0]);
    }

    #[test]
    fn test_marker_around_ref_counts_cells_not_fragments() {
        // Reference row: 1 | 2 | 3, marker has two fragments over cell 2
        let reference = map_from_rows(&[&[1, 1, 2, 2, 2, 3, 3]]);
        let marker = map_from_rows(&[&[0, 0, 5, 0, 6, 0, 0]]);
        let counts =
            marker_around_ref(&CpuBackend::new(), &reference, &marker, &px(0), None).unwrap();
        assert_eq!(counts, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_marker_positive_labels() {
        let reference = map_from_rows(&[&[1, 1, 2, 2]]);
        let marker = map_from_rows(&[&[0, 9, 0, 0]]);
        let positive = marker_positive_labels(&reference, &marker).unwrap();
        assert_eq!(positive.positive_ids().collect::<Vec<_>>(), vec![1]);
    }
}
