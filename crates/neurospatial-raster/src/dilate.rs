//! Label dilation
//!
//! Grows every label isotropically by up to `radius` pixels. A background
//! pixel takes the label of the nearest labeled pixel whose Euclidean
//! distance is at most `radius`; among equally near labels the lowest id
//! wins. Labeled pixels never change.
//!
//! An exact distance transform gives each background pixel its squared
//! distance to the nearest label; only pixels within reach are resolved, by
//! scanning the one ring of disk offsets at exactly that distance.

use crate::distance::squared_distance_to_labels;
use crate::error::{RasterError, RasterResult};
use neurospatial_core::LabelMap;

/// Largest radius accepted by [`dilate_labels`].
pub const MAX_DILATION_RADIUS: u32 = 1024;

/// Offsets within a disk, grouped by squared distance.
struct DiskRings {
    /// `(dx, dy)` sorted by squared distance, origin excluded
    offsets: Vec<(i64, i64)>,
    /// End index into `offsets` of each ring of equal squared distance
    ring_ends: Vec<usize>,
    /// Squared distance of each ring, ascending
    ring_d2: Vec<i64>,
}

impl DiskRings {
    fn new(radius: u32) -> Self {
        let r = radius as i64;
        let mut with_dist: Vec<(i64, i64, i64)> = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 > 0 && d2 <= r * r {
                    with_dist.push((d2, dy, dx));
                }
            }
        }
        with_dist.sort_unstable();

        let mut ring_ends = Vec::new();
        let mut ring_d2 = Vec::new();
        for (i, pair) in with_dist.windows(2).enumerate() {
            if pair[0].0 != pair[1].0 {
                ring_ends.push(i + 1);
                ring_d2.push(pair[0].0);
            }
        }
        if let Some(&(d2, _, _)) = with_dist.last() {
            ring_ends.push(with_dist.len());
            ring_d2.push(d2);
        }

        Self {
            offsets: with_dist.into_iter().map(|(_, dy, dx)| (dx, dy)).collect(),
            ring_ends,
            ring_d2,
        }
    }

    /// Offsets at exactly squared distance `d2`, if that distance occurs.
    fn ring_at(&self, d2: i64) -> Option<&[(i64, i64)]> {
        let i = self.ring_d2.binary_search(&d2).ok()?;
        let start = if i == 0 { 0 } else { self.ring_ends[i - 1] };
        Some(&self.offsets[start..self.ring_ends[i]])
    }

    #[cfg(test)]
    fn rings(&self) -> impl Iterator<Item = &[(i64, i64)]> {
        let mut start = 0;
        self.ring_ends.iter().map(move |&end| {
            let ring = &self.offsets[start..end];
            start = end;
            ring
        })
    }
}

/// Dilate every label of `map` by `radius` pixels
///
/// # Arguments
///
/// * `map` - Input label map
/// * `radius` - Expansion radius in pixels; 0 returns an identical map
///
/// # Errors
///
/// Returns [`RasterError::InvalidParameters`] if `radius` exceeds
/// [`MAX_DILATION_RADIUS`].
pub fn dilate_labels(map: &LabelMap, radius: u32) -> RasterResult<LabelMap> {
    if radius > MAX_DILATION_RADIUS {
        return Err(RasterError::InvalidParameters(format!(
            "dilation radius {radius} exceeds {MAX_DILATION_RADIUS}"
        )));
    }
    if radius == 0 || map.is_empty() {
        return Ok(map.to_mut().into());
    }

    let rings = DiskRings::new(radius);
    let reach = u64::from(radius) * u64::from(radius);
    let dist = squared_distance_to_labels(map);
    let (width, height) = (map.width() as i64, map.height() as i64);
    let src = map.data();
    let mut out = map.to_mut();
    let dst = out.data_mut();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let d2 = dist[idx];
            if d2 == 0 || d2 > reach {
                continue;
            }
            let Some(ring) = rings.ring_at(d2 as i64) else {
                continue;
            };
            let mut best = 0u32;
            for &(dx, dy) in ring {
                let (sx, sy) = (x + dx, y + dy);
                if sx < 0 || sx >= width || sy < 0 || sy >= height {
                    continue;
                }
                let label = src[(sy * width + sx) as usize];
                if label != 0 && (best == 0 || label < best) {
                    best = label;
                }
            }
            dst[idx] = best;
        }
    }

    tracing::trace!(radius, "dilated labels");
    Ok(out.into())
}
