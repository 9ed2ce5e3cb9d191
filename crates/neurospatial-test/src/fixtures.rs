//! Synthetic label maps for tests
//!
//! Fixture builders panic on invalid input; they are test helpers only.

use neurospatial_core::{BinaryMask, LabelMap, LabelMapMut};

/// Build a label map from row literals.
///
/// # Panics
///
/// Panics if `rows` is empty or the rows have different lengths.
pub fn map_from_rows(rows: &[&[u32]]) -> LabelMap {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    assert!(
        rows.iter().all(|r| r.len() as u32 == width),
        "fixture rows must have equal length"
    );
    let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
    LabelMap::from_vec(width, height, data).expect("fixture map")
}

/// Build a binary mask from row literals of 0 and 1.
pub fn mask_from_rows(rows: &[&[u32]]) -> BinaryMask {
    BinaryMask::from_label_map(map_from_rows(rows)).expect("fixture mask")
}

/// Incremental builder for synthetic label maps.
///
/// Later shapes overwrite earlier ones where they overlap.
///
/// ```
/// use neurospatial_test::fixtures::MapBuilder;
///
/// let map = MapBuilder::new(20, 20)
///     .pixel_size(0.5)
///     .point(3, 3, 1)
///     .rect(10, 10, 4, 2, 2)
///     .build();
/// assert_eq!(map.max_label(), 2);
/// assert_eq!(map.foreground_count(), 9);
/// ```
pub struct MapBuilder {
    map: LabelMapMut,
}

impl MapBuilder {
    /// Start from an all-background `width` x `height` map.
    pub fn new(width: u32, height: u32) -> Self {
        let map = LabelMap::new(width, height)
            .expect("fixture dimensions")
            .to_mut();
        Self { map }
    }

    /// Set the pixel size in microns.
    pub fn pixel_size(mut self, pixel_size_um: f64) -> Self {
        self.map.set_pixel_size_um(pixel_size_um);
        self
    }

    /// Paint one pixel.
    pub fn point(mut self, x: u32, y: u32, label: u32) -> Self {
        self.map.set_pixel(x, y, label).expect("fixture point in bounds");
        self
    }

    /// Paint several pixels with the same label.
    pub fn points(mut self, points: &[(u32, u32)], label: u32) -> Self {
        for &(x, y) in points {
            self.map.set_pixel(x, y, label).expect("fixture point in bounds");
        }
        self
    }

    /// Paint an axis-aligned rectangle, clipped to the map.
    pub fn rect(mut self, x: u32, y: u32, w: u32, h: u32, label: u32) -> Self {
        let x_end = (x + w).min(self.map.width());
        let y_end = (y + h).min(self.map.height());
        for yy in y..y_end {
            for xx in x..x_end {
                self.map.set_pixel_unchecked(xx, yy, label);
            }
        }
        self
    }

    /// Paint a filled disk (`dx² + dy² <= r²`), clipped to the map.
    pub fn disk(mut self, cx: u32, cy: u32, r: u32, label: u32) -> Self {
        let r = r as i64;
        let (w, h) = (self.map.width() as i64, self.map.height() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx as i64 + dx, cy as i64 + dy);
                if x >= 0 && x < w && y >= 0 && y < h {
                    self.map.set_pixel_unchecked(x as u32, y as u32, label);
                }
            }
        }
        self
    }

    /// Finish building.
    pub fn build(self) -> LabelMap {
        self.map.into()
    }

    /// Finish building as a binary mask; every painted label becomes 1.
    pub fn build_mask(self) -> BinaryMask {
        let map: LabelMap = self.map.into();
        BinaryMask::from_predicate(&map, |v| v > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_from_rows() {
        let map = map_from_rows(&[&[0, 1], &[2, 0], &[0, 0]]);
        assert_eq!(map.dimensions(), (2, 3));
        assert_eq!(map.get_pixel(0, 1), Some(2));
    }

    #[test]
    fn test_disk_area() {
        let map = MapBuilder::new(11, 11).disk(5, 5, 2, 4).build();
        // 1 + 4 + 4 + 4 (axis at 1, 2) + 4 diagonals (1,1)
        assert_eq!(map.foreground_count(), 13);
        assert_eq!(map.max_label(), 4);
    }

    #[test]
    fn test_rect_clipped() {
        let map = MapBuilder::new(4, 4).rect(2, 2, 5, 5, 1).build();
        assert_eq!(map.foreground_count(), 4);
    }

    #[test]
    fn test_build_mask() {
        let mask = MapBuilder::new(3, 3).point(1, 1, 7).build_mask();
        assert_eq!(mask.count(), 1);
        assert!(mask.is_set(1, 1));
    }
}
