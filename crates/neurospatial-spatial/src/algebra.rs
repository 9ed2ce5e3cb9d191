//! Label set algebra
//!
//! Selection and intersection of label populations. Every result is
//! renumbered by binarizing the surviving pixels and running connected
//! component labeling on the binary image, so the output ids are always
//! the contiguous range `1..=K`.
//!
//! # Merging
//!
//! Relabeling works on the binary image, not on the original ids. Two
//! distinct surviving labels whose pixels touch become one component and
//! one new id. Counts taken with [`count_labels`] after a subset or an
//! intersection are counts of connected components.

use crate::error::{SpatialError, SpatialResult};
use neurospatial_core::{BinaryMask, LabelMap, PositivitySet};
use neurospatial_raster::{RasterBackend, label_pixel_counts};

/// Keep the labels flagged in `keep` and renumber the survivors
///
/// Labels past the end of `keep` are dropped. Touching kept labels merge
/// (see the module docs).
///
/// # Examples
///
/// ```
/// use neurospatial_core::{LabelMap, PositivitySet};
/// use neurospatial_raster::CpuBackend;
/// use neurospatial_spatial::algebra::subset;
///
/// let map = LabelMap::from_vec(5, 1, vec![4, 0, 5, 0, 6]).unwrap();
/// let keep = PositivitySet::from_ids(6, [5, 6]);
/// let out = subset(&CpuBackend::new(), &map, &keep).unwrap();
/// assert_eq!(out.row_data(0), &[0, 0, 1, 0, 2]);
/// ```
pub fn subset<B: RasterBackend + ?Sized>(
    backend: &B,
    map: &LabelMap,
    keep: &PositivitySet,
) -> SpatialResult<LabelMap> {
    let selected = BinaryMask::from_predicate(map, |id| keep.is_positive(id));
    let relabeled = backend.connected_component_relabel(&selected)?;
    tracing::debug!(
        input_labels = map.max_label(),
        kept = keep.positive_count(),
        components = relabeled.max_label(),
        "subset population"
    );
    Ok(relabeled)
}

/// Pixel-wise AND of two populations, renumbered
///
/// A pixel survives when both inputs are nonzero there.
///
/// # Errors
///
/// Returns an error if the maps are not co-registered.
pub fn intersect<B: RasterBackend + ?Sized>(
    backend: &B,
    a: &LabelMap,
    b: &LabelMap,
) -> SpatialResult<LabelMap> {
    a.check_same_geometry(b)?;
    let mask_a = backend.binarize(a)?;
    let mask_b = backend.binarize(b)?;
    let both = mask_a.and(&mask_b)?;
    let relabeled = backend.connected_component_relabel(&both)?;
    tracing::debug!(
        pixels = both.count(),
        components = relabeled.max_label(),
        "intersected populations"
    );
    Ok(relabeled)
}

/// Intersect every map in `maps` by repeated pairwise AND
///
/// A single map is renumbered on its own.
///
/// # Errors
///
/// Returns [`SpatialError::InvalidParameters`] for an empty slice.
pub fn intersect_all<B: RasterBackend + ?Sized>(
    backend: &B,
    maps: &[&LabelMap],
) -> SpatialResult<LabelMap> {
    let (first, rest) = maps.split_first().ok_or_else(|| {
        SpatialError::InvalidParameters("intersect_all needs at least one map".into())
    })?;

    let mut acc = backend.connected_component_relabel(&backend.binarize(first)?)?;
    for map in rest {
        acc = intersect(backend, &acc, map)?;
    }
    Ok(acc)
}

/// Population size of a label map: its largest label id.
///
/// Meaningful as a count once the map has been contiguously relabeled.
#[inline]
pub fn count_labels(map: &LabelMap) -> u32 {
    map.max_label()
}

/// Keep labels whose physical area lies in `[min_um2, max_um2]`, renumbered
///
/// Area is pixel count times pixel size squared. `max_um2 = None` leaves
/// the range open above.
///
/// # Errors
///
/// Fails when the map is uncalibrated or the bounds are negative, not
/// finite, or inverted.
pub fn filter_by_area<B: RasterBackend + ?Sized>(
    backend: &B,
    map: &LabelMap,
    min_um2: f64,
    max_um2: Option<f64>,
) -> SpatialResult<LabelMap> {
    let pixel_size = map.require_pixel_size()?;
    if !min_um2.is_finite() || min_um2 < 0.0 {
        return Err(SpatialError::InvalidParameters(format!(
            "minimum area must be finite and >= 0, got {min_um2}"
        )));
    }
    if let Some(max) = max_um2 {
        if max.is_nan() || max < min_um2 {
            return Err(SpatialError::InvalidParameters(format!(
                "maximum area {max} is below minimum area {min_um2}"
            )));
        }
    }

    let pixel_area = pixel_size * pixel_size;
    let counts = label_pixel_counts(map);
    let mut keep = PositivitySet::new(map.max_label());
    for (id, &count) in counts.iter().enumerate().skip(1) {
        if count == 0 {
            continue;
        }
        let area = count as f64 * pixel_area;
        let in_range = area >= min_um2 && max_um2.is_none_or(|max| area <= max);
        keep.set(id as u32, in_range);
    }

    tracing::debug!(
        min_um2,
        max_um2 = ?max_um2,
        kept = keep.positive_count(),
        "filtered labels by area"
    );
    subset(backend, map, &keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurospatial_core::Error as CoreError;
    use neurospatial_raster::CpuBackend;
    use neurospatial_test::fixtures::{MapBuilder, map_from_rows};

    /// Seven isolated 2x2 blocks with ids 1..7 along a row.
    fn seven_blocks() -> LabelMap {
        let mut builder = MapBuilder::new(22, 4);
        for id in 1..=7u32 {
            builder = builder.rect(1 + (id - 1) * 3, 1, 2, 2, id);
        }
        builder.build()
    }

    #[test]
    fn test_subset_relabels_contiguously() {
        let map = seven_blocks();
        let keep = PositivitySet::from_ids(7, [2, 5, 7]);
        let out = subset(&CpuBackend::new(), &map, &keep).unwrap();
        assert_eq!(count_labels(&out), 3);
        assert_eq!(out.get_pixel(4, 1), Some(1));
        assert_eq!(out.get_pixel(13, 1), Some(2));
        assert_eq!(out.get_pixel(19, 1), Some(3));
        assert_eq!(out.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_subset_merges_touching_labels() {
        // 1 and 2 share an edge; both kept, they become one component
        let map = map_from_rows(&[&[1, 1, 2, 2, 0, 3]]);
        let keep = PositivitySet::from_ids(3, [1, 2, 3]);
        let out = subset(&CpuBackend::new(), &map, &keep).unwrap();
        assert_eq!(out.row_data(0), &[1, 1, 1, 1, 0, 2]);
        assert_eq!(count_labels(&out), 2);
    }

    #[test]
    fn test_subset_short_keep_set() {
        let map = map_from_rows(&[&[1, 0, 9]]);
        let keep = PositivitySet::from_ids(1, [1]);
        let out = subset(&CpuBackend::new(), &map, &keep).unwrap();
        assert_eq!(out.row_data(0), &[1, 0, 0]);
    }

    #[test]
    fn test_intersect_of_gated_sets() {
        let map = seven_blocks();
        let backend = CpuBackend::new();
        let a = subset(&backend, &map, &PositivitySet::from_ids(7, [1, 3, 5])).unwrap();
        let b = subset(&backend, &map, &PositivitySet::from_ids(7, [3, 5, 7])).unwrap();
        let both = intersect(&backend, &a, &b).unwrap();
        assert_eq!(count_labels(&both), 2);
        // Old label 3 sits at x=7, old label 5 at x=13
        assert_eq!(both.get_pixel(7, 1), Some(1));
        assert_eq!(both.get_pixel(13, 1), Some(2));
        assert_eq!(both.get_pixel(1, 1), Some(0));
        assert_eq!(both.get_pixel(19, 1), Some(0));
    }

    #[test]
    fn test_intersect_shape_mismatch() {
        let a = map_from_rows(&[&[1, 1]]);
        let b = map_from_rows(&[&[1], &[1]]);
        let err = intersect(&CpuBackend::new(), &a, &b).unwrap_err();
        assert!(matches!(
            err,
            SpatialError::Core(CoreError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_intersect_all() {
        let backend = CpuBackend::new();
        let a = map_from_rows(&[&[1, 1, 1, 0, 2]]);
        let b = map_from_rows(&[&[0, 3, 3, 0, 4]]);
        let c = map_from_rows(&[&[0, 0, 5, 0, 6]]);
        let out = intersect_all(&backend, &[&a, &b, &c]).unwrap();
        assert_eq!(out.row_data(0), &[0, 0, 1, 0, 2]);

        let single = intersect_all(&backend, &[&b]).unwrap();
        assert_eq!(single.row_data(0), &[0, 1, 1, 0, 2]);

        assert!(matches!(
            intersect_all(&backend, &[]).unwrap_err(),
            SpatialError::InvalidParameters(_)
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let backend = CpuBackend::new();
        let empty = LabelMap::new(4, 4).unwrap();
        let out = subset(&backend, &empty, &PositivitySet::new(0)).unwrap();
        assert_eq!(count_labels(&out), 0);
        let out = intersect(&backend, &empty, &empty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_filter_by_area() {
        // Areas at 0.5 um/px: label 1 = 1 px = 0.25, label 2 = 4 px = 1.0,
        // label 3 = 9 px = 2.25
        let map = MapBuilder::new(12, 4)
            .pixel_size(0.5)
            .point(0, 0, 1)
            .rect(2, 0, 2, 2, 2)
            .rect(6, 0, 3, 3, 3)
            .build();
        let backend = CpuBackend::new();

        let out = filter_by_area(&backend, &map, 1.0, None).unwrap();
        assert_eq!(count_labels(&out), 2);
        assert_eq!(out.get_pixel(0, 0), Some(0));

        let out = filter_by_area(&backend, &map, 0.0, Some(1.0)).unwrap();
        assert_eq!(count_labels(&out), 2);
        assert_eq!(out.get_pixel(6, 0), Some(0));
    }

    #[test]
    fn test_filter_by_area_errors() {
        let backend = CpuBackend::new();
        let uncalibrated = map_from_rows(&[&[1]]);
        assert!(matches!(
            filter_by_area(&backend, &uncalibrated, 0.0, None).unwrap_err(),
            SpatialError::Core(CoreError::Uncalibrated { .. })
        ));

        let map = MapBuilder::new(2, 2).pixel_size(1.0).point(0, 0, 1).build();
        assert!(filter_by_area(&backend, &map, 2.0, Some(1.0)).is_err());
        assert!(filter_by_area(&backend, &map, -1.0, None).is_err());
    }
}
