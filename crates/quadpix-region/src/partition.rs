//! Partitioner - adaptive binary splitting of regions
//!
//! A region whose intensity range exceeds the threshold is halved along
//! its split axis. The halves alternate axes, so repeated splitting
//! produces a quadtree-like decomposition built from binary steps:
//!
//! ```text
//!   wsplit = true            wsplit = false          wsplit = true
//!   +-----------+            +-----+-----+           +-----+-----+
//!   |           |            |     |     |           |  a  |  b  |
//!   |           |   ---->    |  a  |  b  |   ---->   +-----+-----+
//!   |           |            |     |     |           |  a' |  b' |
//!   +-----------+            +-----+-----+           +-----+-----+
//! ```
//!
//! On odd lengths the extra column (or row) goes to the right (or
//! bottom) sibling. A 1x1 region is always final.

use crate::error::{RegionError, RegionResult};
use crate::region::{Region, SplitAxis};
use crate::stats::is_homogeneous;
use crate::tree::RegionTree;
use quadpix_core::Pix;

/// Options for partitioning a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionOptions {
    /// Largest intensity range a region may have without being split
    pub threshold: u8,
    /// Whether the full-raster seed region is first split along its width
    pub initial_wsplit: bool,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            threshold: 10,
            initial_wsplit: true,
        }
    }
}

impl PartitionOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set homogeneity threshold
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set axis of the first split
    pub fn with_initial_wsplit(mut self, wsplit: bool) -> Self {
        self.initial_wsplit = wsplit;
        self
    }
}

/// Split a region once, returning the new right or bottom sibling.
///
/// `region` is shrunk in place to become the left or top half. Both
/// halves get the flipped split axis. If the indicated axis is only one
/// pixel long the split is made along the other axis instead. Returns
/// `None` for a 1x1 region, which is left untouched.
///
/// # Examples
///
/// ```
/// use quadpix_region::{Region, split_region};
///
/// let mut left = Region::new(0, 0, 5, 4, true, 5);
/// let right = split_region(&mut left, 5).unwrap();
/// assert_eq!((left.tx(), left.width(), left.wsplit()), (0, 2, false));
/// assert_eq!((right.tx(), right.width(), right.wsplit()), (2, 3, false));
/// ```
pub fn split_region(region: &mut Region, raster_width: u32) -> Option<Region> {
    if region.is_unit() {
        return None;
    }
    let axis = match region.split_axis() {
        SplitAxis::Width if region.w == 1 => SplitAxis::Height,
        SplitAxis::Height if region.h == 1 => SplitAxis::Width,
        axis => axis,
    };

    let sibling = match axis {
        SplitAxis::Width => {
            let half = region.w / 2;
            let sibling = Region::new(
                region.tx + half,
                region.ty,
                region.w - half,
                region.h,
                false,
                raster_width,
            );
            region.w = half;
            region.wsplit = false;
            sibling
        }
        SplitAxis::Height => {
            let half = region.h / 2;
            let sibling = Region::new(
                region.tx,
                region.ty + half,
                region.w,
                region.h - half,
                true,
                raster_width,
            );
            region.h = half;
            region.wsplit = true;
            sibling
        }
    };
    tracing::trace!(%region, %sibling, "split");
    Some(sibling)
}

fn check_width(tree: &RegionTree, pix: &Pix) -> RegionResult<()> {
    if tree.raster_width() != pix.width() {
        return Err(RegionError::RasterWidthMismatch {
            tree_width: tree.raster_width(),
            raster_width: pix.width(),
        });
    }
    Ok(())
}

/// Whether a region is final: 1x1, or homogeneous under `threshold`
fn is_final(pix: &Pix, region: &Region, threshold: u8) -> bool {
    region.is_unit() || is_homogeneous(pix, region, threshold)
}

/// Split every region of `tree` until each is homogeneous or 1x1.
///
/// The input tree is consumed. The resulting leaves are collected into a
/// new tree with freshly computed keys.
///
/// # Errors
///
/// Returns [`RegionError::RasterWidthMismatch`] if `pix` is not as wide
/// as the tree's raster.
pub fn partition(mut tree: RegionTree, pix: &Pix, threshold: u8) -> RegionResult<RegionTree> {
    check_width(&tree, pix)?;
    let span = tracing::debug_span!("partition", threshold, seeds = tree.len());
    let _enter = span.enter();

    let raster_width = tree.raster_width();
    let mut pending = tree.take_regions();
    drop(tree);

    let mut leaves = Vec::with_capacity(pending.len());
    while let Some(mut region) = pending.pop() {
        if is_final(pix, &region, threshold) {
            leaves.push(region);
            continue;
        }
        match split_region(&mut region, raster_width) {
            Some(sibling) => {
                pending.push(sibling);
                pending.push(region);
            }
            None => leaves.push(region),
        }
    }

    tracing::debug!(regions = leaves.len(), "partition complete");
    Ok(RegionTree::from_regions(raster_width, leaves))
}

/// Split every non-final region of `tree` exactly once.
///
/// Calling this repeatedly converges to the result of [`partition`].
pub fn refine_once(mut tree: RegionTree, pix: &Pix, threshold: u8) -> RegionResult<RegionTree> {
    check_width(&tree, pix)?;
    let raster_width = tree.raster_width();
    let regions = tree.take_regions();
    let before = regions.len();

    let mut refined = Vec::with_capacity(before * 2);
    for mut region in regions {
        if !is_final(pix, &region, threshold) {
            refined.extend(split_region(&mut region, raster_width));
        }
        refined.push(region);
    }

    tracing::debug!(
        before,
        after = refined.len(),
        threshold,
        "refined once"
    );
    Ok(RegionTree::from_regions(raster_width, refined))
}

/// Partition a whole raster starting from a single covering region.
///
/// # Examples
///
/// ```
/// use quadpix_core::Pix;
/// use quadpix_region::{PartitionOptions, partition_pix};
///
/// let pix = Pix::new_filled(8, 8, 200).unwrap();
/// let tree = partition_pix(&pix, &PartitionOptions::default()).unwrap();
/// assert_eq!(tree.len(), 1);
/// ```
pub fn partition_pix(pix: &Pix, options: &PartitionOptions) -> RegionResult<RegionTree> {
    let seed = RegionTree::covering(pix, options.initial_wsplit);
    partition(seed, pix, options.threshold)
}
