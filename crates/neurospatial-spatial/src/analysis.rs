//! Pairwise spatial report
//!
//! Runs every neighbor count for a (reference, marker) pair with one set of
//! options and collects the per-label results.

use crate::error::SpatialResult;
use crate::neighbor::{
    NeighborOptions, marker_around_ref, ref_around_marker, touching_neighbor_count,
};
use neurospatial_core::{BinaryMask, LabelMap};
use neurospatial_raster::{RasterBackend, label_pixel_counts};

/// Neighbor counts of a reference/marker population pair
///
/// Every vector is indexed by label id of the population named in its
/// field; index 0 is background and always 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReport {
    /// Same-population neighbor count of each reference label
    pub reference_neighbors: Vec<u32>,
    /// Same-population neighbor count of each marker label
    pub marker_neighbors: Vec<u32>,
    /// Reference neighbors around each marker label
    pub ref_around_marker: Vec<u32>,
    /// Marker-carrying reference neighbors of each reference label
    pub marker_around_ref: Vec<u32>,
    reference_present: Vec<bool>,
    marker_present: Vec<bool>,
}

/// One reference label's row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRow {
    pub label: u32,
    pub neighbors: u32,
    pub marker_neighbors: u32,
}

/// One marker label's row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRow {
    pub label: u32,
    pub neighbors: u32,
    pub reference_neighbors: u32,
}

impl PairReport {
    /// Rows for reference labels present in the image, ascending by id.
    pub fn reference_rows(&self) -> impl Iterator<Item = ReferenceRow> + '_ {
        present_ids(&self.reference_present).map(|id| ReferenceRow {
            label: id,
            neighbors: self.reference_neighbors[id as usize],
            marker_neighbors: self.marker_around_ref[id as usize],
        })
    }

    /// Rows for marker labels present in the image, ascending by id.
    pub fn marker_rows(&self) -> impl Iterator<Item = MarkerRow> + '_ {
        present_ids(&self.marker_present).map(|id| MarkerRow {
            label: id,
            neighbors: self.marker_neighbors[id as usize],
            reference_neighbors: self.ref_around_marker[id as usize],
        })
    }
}

fn present_ids(present: &[bool]) -> impl Iterator<Item = u32> + '_ {
    present
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, &p)| p)
        .map(|(id, _)| id as u32)
}

fn presence(map: &LabelMap) -> Vec<bool> {
    label_pixel_counts(map).into_iter().map(|c| c > 0).collect()
}

/// Run all four neighbor counts for a reference/marker pair
///
/// Both populations are dilated with the same radius and restricted to the
/// same optional mask.
///
/// # Errors
///
/// Fails on the first error of any count; no partial report is returned.
pub fn analyse_pair<B: RasterBackend + ?Sized>(
    backend: &B,
    reference: &LabelMap,
    marker: &LabelMap,
    options: &NeighborOptions,
    mask: Option<&BinaryMask>,
) -> SpatialResult<PairReport> {
    reference.check_same_geometry(marker)?;
    let reference_neighbors =
        touching_neighbor_count(backend, reference, options, mask)?.counts().to_vec();
    let marker_neighbors =
        touching_neighbor_count(backend, marker, options, mask)?.counts().to_vec();
    let ref_around = ref_around_marker(backend, reference, marker, options, mask)?;
    let marker_around = marker_around_ref(backend, reference, marker, options, mask)?;

    tracing::info!(
        references = reference.max_label(),
        markers = marker.max_label(),
        "analysed population pair"
    );
    Ok(PairReport {
        reference_neighbors,
        marker_neighbors,
        ref_around_marker: ref_around,
        marker_around_ref: marker_around,
        reference_present: presence(reference),
        marker_present: presence(marker),
    })
}
