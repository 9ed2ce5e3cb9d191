//! Marker co-expression combinatorics
//!
//! Given several gated marker populations, builds the co-expressing
//! population of every combination of two or more markers by repeated
//! pairwise intersection.

use crate::algebra::{count_labels, intersect};
use crate::error::{SpatialError, SpatialResult};
use neurospatial_core::LabelMap;
use neurospatial_raster::RasterBackend;

/// Maximum number of markers accepted by [`marker_combinations`]
pub const MAX_MARKERS: usize = 16;

/// Co-expressing population of one marker combination
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCombination {
    /// Marker names in input order
    pub markers: Vec<String>,
    /// Contiguously relabeled intersection
    pub map: LabelMap,
    /// Number of labels in `map`
    pub count: u32,
}

impl MarkerCombination {
    /// Marker names joined with `+`, e.g. `"ChAT+Calb"`.
    pub fn name(&self) -> String {
        self.markers.join("+")
    }
}

/// Intersect every combination of two or more markers
///
/// Combinations are ordered by size, then lexicographically by marker
/// position in `markers`. Fewer than two markers yield no rows.
///
/// # Errors
///
/// Fails on more than [`MAX_MARKERS`] markers, maps that are not
/// co-registered, or a backend failure.
pub fn marker_combinations<B: RasterBackend + ?Sized>(
    backend: &B,
    markers: &[(&str, &LabelMap)],
) -> SpatialResult<Vec<MarkerCombination>> {
    if markers.len() > MAX_MARKERS {
        return Err(SpatialError::InvalidParameters(format!(
            "at most {MAX_MARKERS} markers can be combined, got {}",
            markers.len()
        )));
    }

    let mut out = Vec::new();
    for size in 2..=markers.len() {
        for indices in index_combinations(markers.len(), size) {
            let mut acc = intersect(backend, markers[indices[0]].1, markers[indices[1]].1)?;
            for &i in &indices[2..] {
                acc = intersect(backend, &acc, markers[i].1)?;
            }
            let count = count_labels(&acc);
            let names: Vec<String> = indices.iter().map(|&i| markers[i].0.to_string()).collect();
            tracing::trace!(combination = %names.join("+"), count, "intersected markers");
            out.push(MarkerCombination {
                markers: names,
                map: acc,
                count,
            });
        }
    }

    tracing::debug!(markers = markers.len(), combinations = out.len(), "built marker combinations");
    Ok(out)
}

/// All `k`-element index sets of `0..n` in lexicographic order.
fn index_combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut current: Vec<usize> = (0..k).collect();
    loop {
        out.push(current.clone());
        // Rightmost position that can still advance
        let Some(pos) = (0..k).rev().find(|&i| current[i] < n - k + i) else {
            break;
        };
        current[pos] += 1;
        for i in pos + 1..k {
            current[i] = current[i - 1] + 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurospatial_raster::CpuBackend;
    use neurospatial_test::fixtures::map_from_rows;

    #[test]
    fn test_index_combinations() {
        assert_eq!(
            index_combinations(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(index_combinations(3, 3), vec![vec![0, 1, 2]]);
        assert!(index_combinations(2, 3).is_empty());
    }

    #[test]
    fn test_three_markers() {
        let a = map_from_rows(&[&[1, 0, 2, 0, 3, 0, 0]]);
        let b = map_from_rows(&[&[1, 0, 2, 0, 0, 0, 3]]);
        let c = map_from_rows(&[&[0, 0, 1, 0, 2, 0, 3]]);
        let rows =
            marker_combinations(&CpuBackend::new(), &[("A", &a), ("B", &b), ("C", &c)]).unwrap();

        let summary: Vec<(String, u32)> = rows.iter().map(|r| (r.name(), r.count)).collect();
        assert_eq!(
            summary,
            vec![
                ("A+B".to_string(), 2),
                ("A+C".to_string(), 2),
                ("B+C".to_string(), 2),
                ("A+B+C".to_string(), 1),
            ]
        );
        assert_eq!(rows[3].map.row_data(0), &[0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_too_few_or_too_many() {
        let a = map_from_rows(&[&[1]]);
        let backend = CpuBackend::new();
        assert!(marker_combinations(&backend, &[("A", &a)]).unwrap().is_empty());

        let many: Vec<(&str, &LabelMap)> = (0..=MAX_MARKERS).map(|_| ("M", &a)).collect();
        assert!(matches!(
            marker_combinations(&backend, &many).unwrap_err(),
            SpatialError::InvalidParameters(_)
        ));
    }
}
