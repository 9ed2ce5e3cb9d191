//! BinaryMask - a label map restricted to {0, 1}
//!
//! Used as an intermediate (binarized populations) and as a restricting
//! region such as a ganglion silhouette.

use crate::error::{Error, Result};
use crate::label_map::LabelMap;

/// A {0, 1}-valued raster.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryMask {
    map: LabelMap,
}

impl BinaryMask {
    /// Create an all-zero, uncalibrated mask.
    ///
    /// Chain [`with_pixel_size`](Self::with_pixel_size) before combining it
    /// with calibrated maps, or use [`empty_like`](Self::empty_like).
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(BinaryMask {
            map: LabelMap::new(width, height)?,
        })
    }

    /// Create an all-zero mask with the shape and calibration of `map`.
    pub fn empty_like(map: &LabelMap) -> Self {
        BinaryMask {
            map: map.create_template(),
        }
    }

    /// Set the pixel size in microns.
    pub fn with_pixel_size(self, pixel_size_um: f64) -> Self {
        BinaryMask {
            map: self.map.with_pixel_size(pixel_size_um),
        }
    }

    /// Get the pixel size in microns; 0 when uncalibrated.
    #[inline]
    pub fn pixel_size_um(&self) -> f64 {
        self.map.pixel_size_um()
    }

    /// Wrap a label map that already holds only 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBinary`] at the first pixel holding another value.
    pub fn from_label_map(map: LabelMap) -> Result<Self> {
        if let Some((x, y, value)) = map.labeled_pixels().find(|&(_, _, v)| v > 1) {
            return Err(Error::NotBinary { x, y, value });
        }
        Ok(BinaryMask { map })
    }

    /// Build a mask that is set wherever `predicate(label)` holds.
    ///
    /// Shape and calibration are taken from `map`.
    pub fn from_predicate(map: &LabelMap, predicate: impl Fn(u32) -> bool) -> Self {
        let mut out = map.create_template().to_mut();
        for (dst, &src) in out.data_mut().iter_mut().zip(map.data()) {
            *dst = u32::from(predicate(src));
        }
        BinaryMask { map: out.into() }
    }

    /// Get the mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.map.width()
    }

    /// Get the mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.map.height()
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.map.dimensions()
    }

    /// Check whether (x, y) is set. Out-of-bounds positions are unset.
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.map.get_pixel(x, y) == Some(1)
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.map.foreground_count()
    }

    /// Raw {0, 1} data, row-major.
    #[inline]
    pub fn data(&self) -> &[u32] {
        self.map.data()
    }

    /// Borrow the mask as a label map whose only label is 1.
    #[inline]
    pub fn as_label_map(&self) -> &LabelMap {
        &self.map
    }

    /// Consume the mask, returning the underlying label map.
    pub fn into_label_map(self) -> LabelMap {
        self.map
    }

    /// Pixel-wise AND of two co-registered masks.
    pub fn and(&self, other: &BinaryMask) -> Result<BinaryMask> {
        self.map.check_same_geometry(&other.map)?;
        let mut out = self.map.create_template().to_mut();
        for ((dst, &a), &b) in out.data_mut().iter_mut().zip(self.data()).zip(other.data()) {
            *dst = a & b;
        }
        Ok(BinaryMask { map: out.into() })
    }
}
