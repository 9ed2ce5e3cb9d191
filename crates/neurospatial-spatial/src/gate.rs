//! Overlap-fraction gating
//!
//! Decides, per label, whether enough of its area is covered by a second
//! signal. One raster pass; no backend primitive is involved.

use crate::error::{SpatialError, SpatialResult};
use neurospatial_core::{LabelMap, PositivitySet};

/// Options for overlap gating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateOptions {
    /// Minimum covered fraction, inclusive, in `[0, 1]`
    pub threshold: f64,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self { threshold: 0.4 }
    }
}

impl GateOptions {
    /// Create options with the given threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Check that the threshold lies in `[0, 1]`.
    pub fn validate(&self) -> SpatialResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SpatialError::InvalidParameters(format!(
                "overlap threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Per-label pixel totals and covered pixel counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapStats {
    /// Pixel count of each label, indexed by label id
    pub total: Vec<u64>,
    /// Pixel count of each label where the second raster is nonzero
    pub hit: Vec<u64>,
}

impl OverlapStats {
    /// Covered fraction of `label`; `None` when the label has no pixels.
    pub fn fraction(&self, label: u32) -> Option<f64> {
        let idx = label as usize;
        match self.total.get(idx) {
            Some(&total) if total > 0 => Some(self.hit[idx] as f64 / total as f64),
            _ => None,
        }
    }

    /// Largest label id covered.
    pub fn max_label(&self) -> u32 {
        self.total.len().saturating_sub(1) as u32
    }
}

/// Count, per label of `population`, its pixels and the pixels where
/// `signal` is nonzero
///
/// # Errors
///
/// Returns an error if the two rasters are not co-registered.
pub fn overlap_stats(population: &LabelMap, signal: &LabelMap) -> SpatialResult<OverlapStats> {
    population.check_same_geometry(signal)?;
    let len = population.max_label() as usize + 1;
    let mut total = vec![0u64; len];
    let mut hit = vec![0u64; len];

    for (&id, &s) in population.data().iter().zip(signal.data()) {
        if id == 0 {
            continue;
        }
        total[id as usize] += 1;
        if s != 0 {
            hit[id as usize] += 1;
        }
    }

    Ok(OverlapStats { total, hit })
}

/// Keep every label whose covered fraction is at least the threshold
///
/// # Arguments
///
/// * `population` - Labels to gate (e.g. a pan-neuronal population)
/// * `signal` - Raster read as positive where nonzero (marker labels or mask)
/// * `options` - Inclusive threshold
///
/// # Returns
///
/// A [`PositivitySet`] of length `max_label(population) + 1`. Labels without
/// pixels are never kept.
pub fn overlap_gate(
    population: &LabelMap,
    signal: &LabelMap,
    options: &GateOptions,
) -> SpatialResult<PositivitySet> {
    options.validate()?;
    let stats = overlap_stats(population, signal)?;
    let mut keep = PositivitySet::new(stats.max_label());

    for id in 1..=stats.max_label() {
        if let Some(fraction) = stats.fraction(id) {
            keep.set(id, fraction >= options.threshold);
        }
    }

    tracing::debug!(
        labels = stats.max_label(),
        kept = keep.positive_count(),
        threshold = options.threshold,
        "gated population by overlap"
    );
    Ok(keep)
}
