//! Intensity statistics over a region
//!
//! Both the homogeneity test and the mean-fill renderer need the sum,
//! minimum and maximum of the pixels inside a region. They are gathered
//! in a single row-wise scan.

use crate::error::{RegionError, RegionResult};
use crate::region::Region;
use quadpix_core::Pix;

/// Summary of the pixel values inside one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStats {
    /// Number of pixels scanned
    pub count: u64,
    /// Sum of pixel values
    pub sum: u64,
    /// Smallest pixel value
    pub min: u8,
    /// Largest pixel value
    pub max: u8,
}

impl RegionStats {
    /// Integer mean, truncated toward zero
    pub fn mean(&self) -> u8 {
        // count is never 0 for stats produced by this module
        (self.sum / self.count.max(1)) as u8
    }

    /// `max - min`
    pub fn range(&self) -> u8 {
        self.max - self.min
    }
}

/// Scan the region in a row-major buffer, or `None` if the region is
/// empty or not inside the buffer.
pub(crate) fn stats_in(data: &[u8], width: u32, height: u32, region: &Region) -> Option<RegionStats> {
    if !region.fits_within(width, height) {
        return None;
    }
    let stride = width as usize;
    let x0 = region.tx as usize;
    let x1 = x0 + region.w as usize;

    let mut stats = RegionStats {
        count: region.area(),
        sum: 0,
        min: u8::MAX,
        max: u8::MIN,
    };
    for y in region.ty as usize..(region.ty + region.h) as usize {
        let row = &data[y * stride + x0..y * stride + x1];
        for &v in row {
            stats.sum += v as u64;
            stats.min = stats.min.min(v);
            stats.max = stats.max.max(v);
        }
    }
    Some(stats)
}

/// Gather intensity statistics for a region of `pix`.
///
/// # Errors
///
/// Returns [`RegionError::RegionOutOfBounds`] if the region is empty or
/// reaches outside the raster.
pub fn region_stats(pix: &Pix, region: &Region) -> RegionResult<RegionStats> {
    stats_in(pix.data(), pix.width(), pix.height(), region).ok_or(RegionError::RegionOutOfBounds {
        tx: region.tx,
        ty: region.ty,
        w: region.w,
        h: region.h,
        width: pix.width(),
        height: pix.height(),
    })
}

/// Integer mean of the pixels in the region, truncated toward zero.
pub fn mean_intensity(pix: &Pix, region: &Region) -> RegionResult<u8> {
    region_stats(pix, region).map(|s| s.mean())
}

/// Difference between the brightest and darkest pixel in the region.
pub fn intensity_range(pix: &Pix, region: &Region) -> RegionResult<u8> {
    region_stats(pix, region).map(|s| s.range())
}

/// Check whether the region's intensity range is at most `threshold`.
///
/// A region that cannot be evaluated (empty or out of bounds) counts as
/// homogeneous, so it is never split further.
pub fn is_homogeneous(pix: &Pix, region: &Region, threshold: u8) -> bool {
    match stats_in(pix.data(), pix.width(), pix.height(), region) {
        Some(stats) => stats.range() <= threshold,
        None => {
            tracing::trace!(%region, "region outside raster treated as homogeneous");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Pix {
        Pix::from_bytes(2, 2, vec![10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn test_mean_and_range() {
        let pix = quad();
        let r = Region::new(0, 0, 2, 2, true, 2);
        assert_eq!(mean_intensity(&pix, &r).unwrap(), 25);
        assert_eq!(intensity_range(&pix, &r).unwrap(), 30);
        assert!(is_homogeneous(&pix, &r, 30));
        assert!(!is_homogeneous(&pix, &r, 29));
    }

    #[test]
    fn test_mean_truncates() {
        let pix = Pix::from_bytes(3, 1, vec![1, 1, 2]).unwrap();
        let r = Region::new(0, 0, 3, 1, true, 3);
        assert_eq!(mean_intensity(&pix, &r).unwrap(), 1);
    }

    #[test]
    fn test_sub_region() {
        let pix = quad();
        let r = Region::new(1, 0, 1, 2, false, 2);
        let stats = region_stats(&pix, &r).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, 60);
        assert_eq!((stats.min, stats.max), (20, 40));
    }

    #[test]
    fn test_single_pixel_is_homogeneous() {
        let pix = quad();
        let r = Region::new(1, 1, 1, 1, true, 2);
        assert_eq!(intensity_range(&pix, &r).unwrap(), 0);
        assert!(is_homogeneous(&pix, &r, 0));
    }

    #[test]
    fn test_out_of_bounds() {
        let pix = quad();
        let r = Region::new(1, 1, 2, 1, true, 2);
        assert!(matches!(
            region_stats(&pix, &r),
            Err(RegionError::RegionOutOfBounds { width: 2, height: 2, .. })
        ));
        assert!(is_homogeneous(&pix, &r, 0));
        let empty = Region::new(0, 0, 0, 2, true, 2);
        assert!(mean_intensity(&pix, &empty).is_err());
    }
}
