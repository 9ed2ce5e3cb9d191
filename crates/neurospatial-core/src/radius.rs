//! Expansion radius in pixels or microns

use crate::error::{Error, Result};
use crate::label_map::LabelMap;

/// Dilation radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Radius {
    /// Radius in pixels
    Pixels(u32),
    /// Radius in microns, converted with the map's pixel size
    Microns(f64),
}

impl Default for Radius {
    fn default() -> Self {
        Radius::Pixels(0)
    }
}

impl Radius {
    /// Convert to whole pixels for `map`.
    ///
    /// Micron radii are rounded to the nearest pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Uncalibrated`] for a micron radius on a map without a
    /// positive pixel size, and [`Error::InvalidParameter`] for a negative or
    /// non-finite micron radius.
    pub fn to_pixels(self, map: &LabelMap) -> Result<u32> {
        match self {
            Radius::Pixels(px) => Ok(px),
            Radius::Microns(um) => {
                if !um.is_finite() || um < 0.0 {
                    return Err(Error::InvalidParameter(format!(
                        "radius must be a non-negative distance, got {um} um"
                    )));
                }
                let pixel_size = map.require_pixel_size()?;
                Ok((um / pixel_size).round() as u32)
            }
        }
    }
}
