//! LabelMap - integer-labeled raster
//!
//! A `LabelMap` is a 2D grid of `u32` values where `0` is background and
//! every nonzero value identifies one segmented object. Each map carries an
//! isotropic pixel size in microns; `0.0` means the map is uncalibrated.
//!
//! # Ownership model
//!
//! `LabelMap` uses `Arc` for cheap cloning (shared ownership) and is treated
//! as an immutable value by every engine operation. To build or edit pixel
//! data, convert to `LabelMapMut` via [`LabelMap::try_into_mut`] or
//! [`LabelMap::to_mut`], then convert back with `Into<LabelMap>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Relative tolerance used when comparing the pixel sizes of two maps.
const PIXEL_SIZE_TOLERANCE: f64 = 1e-9;

/// Internal map data
#[derive(Debug)]
struct LabelMapData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Isotropic pixel size in microns, 0 if uncalibrated
    pixel_size_um: f64,
    /// Row-major label values
    data: Vec<u32>,
}

/// Integer label map
///
/// # Examples
///
/// ```
/// use neurospatial_core::LabelMap;
///
/// let map = LabelMap::new(64, 48).unwrap();
/// assert_eq!(map.width(), 64);
/// assert_eq!(map.max_label(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct LabelMap {
    inner: Arc<LabelMapData>,
}

impl LabelMap {
    /// Create a new all-background map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = (width as usize) * (height as usize);
        Ok(LabelMap {
            inner: Arc::new(LabelMapData {
                width,
                height,
                pixel_size_um: 0.0,
                data: vec![0u32; len],
            }),
        })
    }

    /// Create a map from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferLength`] if `data.len() != width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if data.len() != (width as usize) * (height as usize) {
            return Err(Error::BufferLength {
                len: data.len(),
                width,
                height,
            });
        }
        Ok(LabelMap {
            inner: Arc::new(LabelMapData {
                width,
                height,
                pixel_size_um: 0.0,
                data,
            }),
        })
    }

    /// Return a copy of this map carrying the given pixel size.
    ///
    /// The pixel data is shared when this is the only reference.
    pub fn with_pixel_size(self, pixel_size_um: f64) -> Self {
        let mut map_mut = match self.try_into_mut() {
            Ok(m) => m,
            Err(shared) => shared.to_mut(),
        };
        map_mut.set_pixel_size_um(pixel_size_um);
        map_mut.into()
    }

    /// Get the map width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the map height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the pixel size in microns (0 if uncalibrated).
    #[inline]
    pub fn pixel_size_um(&self) -> f64 {
        self.inner.pixel_size_um
    }

    /// Check whether the map carries a usable pixel size.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.inner.pixel_size_um.is_finite() && self.inner.pixel_size_um > 0.0
    }

    /// Get the pixel size for a physical-unit computation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uncalibrated`] unless the pixel size is finite and > 0.
    pub fn require_pixel_size(&self) -> Result<f64> {
        if self.is_calibrated() {
            Ok(self.inner.pixel_size_um)
        } else {
            Err(Error::Uncalibrated {
                pixel_size_um: self.inner.pixel_size_um,
            })
        }
    }

    /// Get raw access to the label data (row-major).
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get one row of label data.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y as usize) * (self.inner.width as usize);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Largest label value present, 0 for an empty map.
    pub fn max_label(&self) -> u32 {
        self.inner.data.iter().copied().max().unwrap_or(0)
    }

    /// Check whether the map holds no nonzero label.
    pub fn is_empty(&self) -> bool {
        self.inner.data.iter().all(|&v| v == 0)
    }

    /// Number of nonzero pixels.
    pub fn foreground_count(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// Get the number of strong references to this map.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create an all-background map with the same shape and calibration.
    pub fn create_template(&self) -> Self {
        LabelMap {
            inner: Arc::new(LabelMapData {
                width: self.inner.width,
                height: self.inner.height,
                pixel_size_um: self.inner.pixel_size_um,
                data: vec![0u32; self.inner.data.len()],
            }),
        }
    }

    /// Check if two maps have the same width, height and pixel size.
    pub fn sizes_equal(&self, other: &LabelMap) -> bool {
        self.dimensions() == other.dimensions()
            && pixel_sizes_equal(self.pixel_size_um(), other.pixel_size_um())
    }

    /// Verify that `other` is co-registered with this map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the shapes differ and
    /// [`Error::CalibrationMismatch`] if the pixel sizes differ.
    pub fn check_same_geometry(&self, other: &LabelMap) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        if !pixel_sizes_equal(self.pixel_size_um(), other.pixel_size_um()) {
            return Err(Error::CalibrationMismatch {
                expected: self.pixel_size_um(),
                actual: other.pixel_size_um(),
            });
        }
        Ok(())
    }

    /// Iterate over `(x, y, label)` for every nonzero pixel in scan order.
    pub fn labeled_pixels(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let w = self.inner.width as usize;
        self.inner
            .data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, &v)| ((i % w) as u32, (i / w) as u32, v))
    }

    /// Try to get mutable access to the map data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<LabelMapMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(LabelMapMut { inner: data }),
            Err(arc) => Err(LabelMap { inner: arc }),
        }
    }

    /// Create a mutable copy of this map.
    pub fn to_mut(&self) -> LabelMapMut {
        LabelMapMut {
            inner: LabelMapData {
                width: self.inner.width,
                height: self.inner.height,
                pixel_size_um: self.inner.pixel_size_um,
                data: self.inner.data.clone(),
            },
        }
    }
}

impl PartialEq for LabelMap {
    fn eq(&self, other: &Self) -> bool {
        self.sizes_equal(other) && self.inner.data == other.inner.data
    }
}

fn pixel_sizes_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= PIXEL_SIZE_TOLERANCE * scale
}

/// Mutable label map
///
/// Allows modification of label data. Convert back to an immutable
/// [`LabelMap`] using `Into<LabelMap>`.
#[derive(Debug)]
pub struct LabelMapMut {
    inner: LabelMapData,
}

impl LabelMapMut {
    /// Get the map width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the map height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel size in microns.
    #[inline]
    pub fn pixel_size_um(&self) -> f64 {
        self.inner.pixel_size_um
    }

    /// Set the pixel size in microns.
    pub fn set_pixel_size_um(&mut self, pixel_size_um: f64) {
        self.inner.pixel_size_um = pixel_size_um;
    }

    /// Copy the pixel size from another map.
    pub fn copy_calibration_from(&mut self, src: &LabelMap) {
        self.inner.pixel_size_um = src.inner.pixel_size_um;
    }

    /// Get raw access to the label data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the label data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Set every pixel to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }
}

impl From<LabelMapMut> for LabelMap {
    fn from(map: LabelMapMut) -> Self {
        LabelMap {
            inner: Arc::new(map.inner),
        }
    }
}
