//! Region aggregation
//!
//! Assigns every cell of a population to the region under its centroid and
//! reports, per region, the member count and physical area.

use crate::error::{SpatialError, SpatialResult};
use neurospatial_core::{BinaryMask, LabelMap};
use neurospatial_raster::{label_pixel_counts, label_stats};

/// Per-region member counts and areas, indexed by region id
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    /// Population labels whose centroid falls in each region
    pub count_per_region: Vec<u32>,
    /// Region area in square microns
    pub area_um2_per_region: Vec<f64>,
}

/// One reported region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionRow {
    pub region: u32,
    pub count: u32,
    pub area_um2: f64,
}

impl RegionAggregate {
    /// Member count of `region`; 0 for unknown ids.
    pub fn count(&self, region: u32) -> u32 {
        self.count_per_region
            .get(region as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Area of `region` in square microns; 0 for unknown ids.
    pub fn area_um2(&self, region: u32) -> f64 {
        self.area_um2_per_region
            .get(region as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Largest region id covered.
    pub fn max_region(&self) -> u32 {
        self.count_per_region.len().saturating_sub(1) as u32
    }

    /// Population labels assigned to any region.
    pub fn total_count(&self) -> u64 {
        self.count_per_region.iter().map(|&c| u64::from(c)).sum()
    }

    /// Reportable rows, ascending by region id
    ///
    /// Region 0 is never reported, and neither is a region with zero
    /// members and zero area.
    pub fn rows(&self) -> impl Iterator<Item = RegionRow> + '_ {
        (1..=self.max_region()).filter_map(|region| {
            let row = RegionRow {
                region,
                count: self.count(region),
                area_um2: self.area_um2(region),
            };
            (row.count > 0 || row.area_um2 > 0.0).then_some(row)
        })
    }
}

/// Count population cells per region and measure region areas
///
/// Each population label is reduced to its centroid (mean position,
/// rounded half-up and clamped to the image); the region under that pixel,
/// if any, gains one member.
///
/// # Errors
///
/// Fails when the maps are not co-registered or the region map is
/// uncalibrated.
pub fn aggregate_regions(
    population: &LabelMap,
    region: &LabelMap,
) -> SpatialResult<RegionAggregate> {
    population.check_same_geometry(region)?;
    let pixel_size = region.require_pixel_size()?;
    let (width, height) = region.dimensions();
    let len = region.max_label() as usize + 1;

    let mut count_per_region = vec![0u32; len];
    let mut unassigned = 0usize;
    for stats in label_stats(population).into_iter().flatten() {
        let (cx, cy) = stats.centroid_pixel(width, height);
        match region.get_pixel_unchecked(cx, cy) {
            0 => unassigned += 1,
            r => count_per_region[r as usize] += 1,
        }
    }

    let pixel_area = pixel_size * pixel_size;
    let area_um2_per_region: Vec<f64> = label_pixel_counts(region)
        .into_iter()
        .map(|count| count as f64 * pixel_area)
        .collect();

    tracing::debug!(
        regions = region.max_label(),
        cells = population.max_label(),
        unassigned,
        "aggregated population by region"
    );
    Ok(RegionAggregate {
        count_per_region,
        area_um2_per_region,
    })
}

/// Mask of the regions holding at least `min_members` cells
///
/// # Errors
///
/// Returns [`SpatialError::InvalidParameters`] when `aggregate` was not
/// computed over a region map covering every label of `region`.
pub fn keep_regions_with_min_members(
    region: &LabelMap,
    aggregate: &RegionAggregate,
    min_members: u32,
) -> SpatialResult<BinaryMask> {
    if aggregate.max_region() < region.max_label() {
        return Err(SpatialError::InvalidParameters(format!(
            "aggregate covers regions up to {}, region map has {}",
            aggregate.max_region(),
            region.max_label()
        )));
    }
    let mask = BinaryMask::from_predicate(region, |id| {
        id != 0 && aggregate.count(id) >= min_members
    });
    tracing::debug!(min_members, pixels = mask.count(), "kept populated regions");
    Ok(mask)
}
