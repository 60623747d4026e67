//! Rendering a region tree back onto a raster
//!
//! Painting every region with its mean intensity gives the lossy
//! reconstruction of the raster; drawing region borders visualizes the
//! partition itself.

use crate::error::{RegionError, RegionResult};
use crate::partition::{PartitionOptions, partition_pix};
use crate::region::Region;
use crate::stats::stats_in;
use crate::tree::RegionTree;
use quadpix_core::{Pix, PixMut};

fn check_width(tree: &RegionTree, width: u32) -> RegionResult<()> {
    if tree.raster_width() != width {
        return Err(RegionError::RasterWidthMismatch {
            tree_width: tree.raster_width(),
            raster_width: width,
        });
    }
    Ok(())
}

fn warn_skipped(region: &Region, width: u32, height: u32) {
    tracing::warn!(%region, width, height, "region outside raster skipped");
}

/// Fill each region of `tree` with its mean intensity, in place.
///
/// Means are taken from the pixels as they are when the region is
/// visited. Regions of a partition are disjoint, so the result does not
/// depend on visiting order. Regions that do not fit in the raster are
/// skipped with a warning.
///
/// # Errors
///
/// Returns [`RegionError::RasterWidthMismatch`] if the raster is not as
/// wide as the tree's raster.
pub fn paint_means_in_place(pix: &mut PixMut, tree: &RegionTree) -> RegionResult<()> {
    let (width, height) = (pix.width(), pix.height());
    check_width(tree, width)?;

    for region in tree.regions() {
        let Some(stats) = stats_in(pix.data(), width, height, region) else {
            warn_skipped(region, width, height);
            continue;
        };
        pix.paint_box(&region.bounding_box(), stats.mean());
    }
    Ok(())
}

/// Return a copy of `pix` with each region filled with its mean intensity.
pub fn paint_means(pix: &Pix, tree: &RegionTree) -> RegionResult<Pix> {
    let mut out = pix.to_mut();
    paint_means_in_place(&mut out, tree)?;
    Ok(out.into())
}

/// Draw the one-pixel outline of each region of `tree` in `color`, in place.
pub fn draw_borders_in_place(pix: &mut PixMut, tree: &RegionTree, color: u8) -> RegionResult<()> {
    let (width, height) = (pix.width(), pix.height());
    check_width(tree, width)?;

    for region in tree.regions() {
        if !region.fits_within(width, height) {
            warn_skipped(region, width, height);
            continue;
        }
        pix.draw_box_outline(&region.bounding_box(), color);
    }
    Ok(())
}

/// Return a copy of `pix` with the outline of each region drawn in `color`.
pub fn draw_borders(pix: &Pix, tree: &RegionTree, color: u8) -> RegionResult<Pix> {
    let mut out = pix.to_mut();
    draw_borders_in_place(&mut out, tree, color)?;
    Ok(out.into())
}

/// Partition `pix` and paint the result with region means.
///
/// Returns the reconstructed raster together with the partition.
///
/// # Examples
///
/// ```
/// use quadpix_core::Pix;
/// use quadpix_region::{PartitionOptions, compress};
///
/// let pix = Pix::from_bytes(2, 1, vec![10, 14]).unwrap();
/// let (out, tree) = compress(&pix, &PartitionOptions::default()).unwrap();
/// assert_eq!(tree.len(), 1);
/// assert_eq!(out.data(), &[12, 12]);
/// ```
pub fn compress(pix: &Pix, options: &PartitionOptions) -> RegionResult<(Pix, RegionTree)> {
    let tree = partition_pix(pix, options)?;
    let out = paint_means(pix, &tree)?;
    tracing::debug!(
        width = pix.width(),
        height = pix.height(),
        regions = tree.len(),
        "compressed"
    );
    Ok((out, tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_means_two_regions() {
        let pix = Pix::from_bytes(4, 2, vec![0, 2, 100, 104, 4, 2, 100, 100]).unwrap();
        let mut tree = RegionTree::new(4);
        tree.insert(tree.region(0, 0, 2, 2, false)).unwrap();
        tree.insert(tree.region(2, 0, 2, 2, false)).unwrap();

        let out = paint_means(&pix, &tree).unwrap();
        assert_eq!(out.data(), &[2, 2, 101, 101, 2, 2, 101, 101]);
        // Source untouched
        assert_eq!(pix.get_pixel(1, 0), Some(2));
    }

    #[test]
    fn test_paint_means_skips_outside_regions() {
        let pix = Pix::new_filled(3, 3, 9).unwrap();
        let mut tree = RegionTree::new(3);
        tree.insert(tree.region(2, 2, 5, 5, true)).unwrap();
        let out = paint_means(&pix, &tree).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_draw_borders() {
        let pix = Pix::new_filled(5, 4, 255).unwrap();
        let mut tree = RegionTree::new(5);
        tree.insert(tree.region(0, 0, 2, 4, false)).unwrap();
        tree.insert(tree.region(2, 0, 3, 4, false)).unwrap();
        let out = draw_borders(&pix, &tree, 0).unwrap();
        // Interior of the right region keeps its value
        assert_eq!(out.get_pixel(3, 1), Some(255));
        assert_eq!(out.get_pixel(3, 2), Some(255));
        // Edges are drawn
        assert_eq!(out.get_pixel(2, 1), Some(0));
        assert_eq!(out.get_pixel(4, 2), Some(0));
        assert_eq!(out.get_pixel(3, 0), Some(0));
        assert_eq!(out.get_pixel(1, 3), Some(0));
    }

    #[test]
    fn test_width_mismatch() {
        let pix = Pix::new(4, 4).unwrap();
        let tree = RegionTree::new(8);
        let mut pm = pix.to_mut();
        assert!(matches!(
            paint_means_in_place(&mut pm, &tree),
            Err(RegionError::RasterWidthMismatch { .. })
        ));
        assert!(draw_borders(&pix, &tree, 0).is_err());
    }

    #[test]
    fn test_compress_halves() {
        let data = (0..16).map(|i| if i % 4 < 2 { 3 } else { 250 }).collect();
        let pix = Pix::from_bytes(4, 4, data).unwrap();
        let (out, tree) = compress(&pix, &PartitionOptions::default()).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(out.data(), pix.data());
    }
}
