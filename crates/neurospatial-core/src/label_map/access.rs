//! Pixel access functions
//!
//! Bounds-checked and unchecked getters/setters for single labels.
//! Data is stored row-major with one `u32` per pixel.

use super::{LabelMap, LabelMapMut};
use crate::error::{Error, Result};

impl LabelMap {
    /// Get the label at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the label at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[(y as usize) * (self.width() as usize) + x as usize]
    }
}

impl LabelMapMut {
    /// Get the label at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get the label at (x, y) without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.data()[(y as usize) * (self.width() as usize) + x as usize]
    }

    /// Set the label at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            let len = self.data().len();
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width() as usize) + x as usize,
                len,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set the label at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let w = self.width() as usize;
        self.data_mut()[(y as usize) * w + x as usize] = val;
    }
}

#[cfg(test)]
mod tests {
    use crate::LabelMap;

    #[test]
    fn test_set_and_get() {
        let mut map = LabelMap::new(5, 3).unwrap().try_into_mut().unwrap();
        map.set_pixel(4, 2, 17).unwrap();
        assert_eq!(map.get_pixel(4, 2), Some(17));
        assert!(map.set_pixel(5, 0, 1).is_err());
        let map: LabelMap = map.into();
        assert_eq!(map.get_pixel(4, 2), Some(17));
        assert_eq!(map.get_pixel(0, 3), None);
        assert_eq!(map.row_data(2), &[0, 0, 0, 0, 17]);
    }
}
