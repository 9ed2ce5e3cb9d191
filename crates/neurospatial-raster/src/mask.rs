//! Binarization and masking
//!
//! Pixel-wise conversions between label maps and binary masks.

use crate::error::RasterResult;
use neurospatial_core::{BinaryMask, LabelMap};

/// Binarize a raster: 1 where the value is nonzero, 0 elsewhere.
pub fn binarize(raster: &LabelMap) -> BinaryMask {
    BinaryMask::from_predicate(raster, |v| v > 0)
}

/// Zero every pixel of `raster` outside `mask`
///
/// # Errors
///
/// Returns an error if `raster` and `mask` are not co-registered.
pub fn multiply(raster: &LabelMap, mask: &BinaryMask) -> RasterResult<LabelMap> {
    raster.check_same_geometry(mask.as_label_map())?;
    let mut out = raster.to_mut();
    for (dst, &m) in out.data_mut().iter_mut().zip(mask.data()) {
        *dst *= m;
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RasterError;
    use neurospatial_test::fixtures::{map_from_rows, mask_from_rows};

    #[test]
    fn test_binarize() {
        let map = map_from_rows(&[&[0, 3], &[9, 0]]);
        assert_eq!(binarize(&map).data(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_multiply() {
        let map = map_from_rows(&[&[4, 4, 5]]);
        let mask = mask_from_rows(&[&[1, 0, 1]]);
        let out = multiply(&map, &mask).unwrap();
        assert_eq!(out.row_data(0), &[4, 0, 5]);
        // input untouched
        assert_eq!(map.row_data(0), &[4, 4, 5]);
    }

    #[test]
    fn test_multiply_shape_mismatch() {
        let map = map_from_rows(&[&[4, 4, 5]]);
        let mask = mask_from_rows(&[&[1, 0]]);
        assert!(multiply(&map, &mask).is_err());
    }

    #[test]
    fn test_multiply_needs_matching_calibration() {
        let map = map_from_rows(&[&[4, 4, 5]]).with_pixel_size(0.65);
        let bare = BinaryMask::new(3, 1).unwrap();
        assert!(matches!(
            multiply(&map, &bare),
            Err(RasterError::Core(neurospatial_core::Error::CalibrationMismatch { .. }))
        ));

        let sized = BinaryMask::new(3, 1).unwrap().with_pixel_size(0.65);
        assert_eq!(multiply(&map, &sized).unwrap().row_data(0), &[0, 0, 0]);
        let like = BinaryMask::empty_like(&map);
        assert!(multiply(&map, &like).unwrap().is_empty());
    }
}
