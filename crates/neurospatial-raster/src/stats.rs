//! Per-label statistics and centroid reduction
//!
//! One raster pass accumulates pixel count, coordinate sums and bounds for
//! every label. Results are indexed by label id.

use crate::error::RasterResult;
use neurospatial_core::LabelMap;

/// Axis-aligned bounding box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Statistics of one label
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Label id
    pub label: u32,
    /// Number of pixels
    pub pixel_count: u32,
    /// Bounding box
    pub bounds: Bounds,
    /// Mean X coordinate
    pub centroid_x: f64,
    /// Mean Y coordinate
    pub centroid_y: f64,
}

impl ComponentStats {
    /// Centroid rounded half-up to a pixel and clamped to `width` x `height`.
    pub fn centroid_pixel(&self, width: u32, height: u32) -> (u32, u32) {
        let round = |v: f64, max: u32| -> u32 {
            let r = (v + 0.5).floor();
            if r <= 0.0 {
                0
            } else {
                (r as u32).min(max.saturating_sub(1))
            }
        };
        (round(self.centroid_x, width), round(self.centroid_y, height))
    }
}

/// Compute statistics for every label present in `map`
///
/// # Returns
///
/// A vector of length `max_label + 1`; entry `id` is `None` when label `id`
/// does not occur (entry 0 is always `None`).
pub fn label_stats(map: &LabelMap) -> Vec<Option<ComponentStats>> {
    #[derive(Clone, Copy)]
    struct Accum {
        count: u32,
        sum_x: u64,
        sum_y: u64,
        min_x: u32,
        min_y: u32,
        max_x: u32,
        max_y: u32,
    }

    let max_label = map.max_label() as usize;
    let mut accums: Vec<Option<Accum>> = vec![None; max_label + 1];

    for (x, y, label) in map.labeled_pixels() {
        let acc = accums[label as usize].get_or_insert(Accum {
            count: 0,
            sum_x: 0,
            sum_y: 0,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        });
        acc.count += 1;
        acc.sum_x += u64::from(x);
        acc.sum_y += u64::from(y);
        acc.min_x = acc.min_x.min(x);
        acc.min_y = acc.min_y.min(y);
        acc.max_x = acc.max_x.max(x);
        acc.max_y = acc.max_y.max(y);
    }

    accums
        .into_iter()
        .enumerate()
        .map(|(label, acc)| {
            acc.map(|acc| ComponentStats {
                label: label as u32,
                pixel_count: acc.count,
                bounds: Bounds {
                    x: acc.min_x,
                    y: acc.min_y,
                    w: acc.max_x - acc.min_x + 1,
                    h: acc.max_y - acc.min_y + 1,
                },
                centroid_x: acc.sum_x as f64 / f64::from(acc.count),
                centroid_y: acc.sum_y as f64 / f64::from(acc.count),
            })
        })
        .collect()
}

/// Pixel count of every label, indexed by label id (entry 0 is 0).
pub fn label_pixel_counts(map: &LabelMap) -> Vec<u64> {
    let mut counts = vec![0u64; map.max_label() as usize + 1];
    for &label in map.data() {
        if label != 0 {
            counts[label as usize] += 1;
        }
    }
    counts
}

/// Reduce every label to a single pixel at its rounded centroid
///
/// The pixel holds the original label id. When two labels round to the same
/// pixel the lower id is kept.
pub fn reduce_to_centroids(map: &LabelMap) -> RasterResult<LabelMap> {
    let (width, height) = map.dimensions();
    let mut out = map.create_template().to_mut();

    for stats in label_stats(map).into_iter().flatten() {
        let (cx, cy) = stats.centroid_pixel(width, height);
        if out.get_pixel_unchecked(cx, cy) == 0 {
            out.set_pixel_unchecked(cx, cy, stats.label);
        } else {
            tracing::debug!(
                label = stats.label,
                x = cx,
                y = cy,
                "centroid collides with a lower label"
            );
        }
    }

    Ok(out.into())
}

/// Rounded centroid pixel of every label, as `(x, y, label)` in label order
///
/// Unlike [`reduce_to_centroids`], labels whose centroids land on the same
/// pixel are all reported.
pub fn centroid_points(map: &LabelMap) -> Vec<(u32, u32, u32)> {
    let (width, height) = map.dimensions();
    label_stats(map)
        .into_iter()
        .flatten()
        .map(|stats| {
            let (cx, cy) = stats.centroid_pixel(width, height);
            (cx, cy, stats.label)
        })
        .collect()
}
