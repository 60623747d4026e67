//! Region - the rectangle unit stored in a region tree
//!
//! A region is an axis-aligned rectangle of a raster plus a flag saying
//! which axis its next split divides:
//!
//! ```text
//!   (tx,ty)            w
//!      x-------------------------
//!      |                        |
//!    h |         Region         |
//!      |   key = tx + ty * sx   |
//!      |                        |
//!      -------------------------x
//!                       (tx + w, ty + h)
//! ```
//!
//! `sx` is the width of the raster the region belongs to. It is not
//! stored in the region; the owning [`RegionTree`](crate::RegionTree)
//! holds it once and every key in the tree is derived from it.

use quadpix_core::Box;
use std::fmt;

/// Row-major linear offset of pixel `(x, y)` in a raster `raster_width` wide.
#[inline]
pub fn linear_key(x: u32, y: u32, raster_width: u32) -> u64 {
    x as u64 + y as u64 * raster_width as u64
}

/// Axis a region is divided along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitAxis {
    /// Halve the width; the halves sit side by side
    Width,
    /// Halve the height; the halves sit one above the other
    Height,
}

impl SplitAxis {
    /// The other axis
    pub fn flipped(self) -> Self {
        match self {
            SplitAxis::Width => SplitAxis::Height,
            SplitAxis::Height => SplitAxis::Width,
        }
    }
}

/// A rectangular region of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub(crate) tx: u32,
    pub(crate) ty: u32,
    pub(crate) w: u32,
    pub(crate) h: u32,
    pub(crate) wsplit: bool,
    pub(crate) key: u64,
}

impl Region {
    /// Create a region with origin `(tx, ty)` and size `w x h`.
    ///
    /// `wsplit` selects the axis of the next split (`true` = width).
    /// The key is computed as `tx + ty * raster_width`. The rectangle is
    /// not validated against any raster.
    pub fn new(tx: u32, ty: u32, w: u32, h: u32, wsplit: bool, raster_width: u32) -> Self {
        Self {
            tx,
            ty,
            w,
            h,
            wsplit,
            key: linear_key(tx, ty, raster_width),
        }
    }

    /// Left x coordinate
    #[inline]
    pub fn tx(&self) -> u32 {
        self.tx
    }

    /// Top y coordinate
    #[inline]
    pub fn ty(&self) -> u32 {
        self.ty
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Whether the next split divides the width
    #[inline]
    pub fn wsplit(&self) -> bool {
        self.wsplit
    }

    /// Axis the next split divides
    #[inline]
    pub fn split_axis(&self) -> SplitAxis {
        if self.wsplit {
            SplitAxis::Width
        } else {
            SplitAxis::Height
        }
    }

    /// Tree key: linear offset of the origin pixel
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Number of pixels covered
    #[inline]
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// True for a single-pixel region, which is never split
    #[inline]
    pub fn is_unit(&self) -> bool {
        self.w == 1 && self.h == 1
    }

    /// Check whether pixel `(x, y)` lies inside the region
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.tx
            && y >= self.ty
            && (x as u64) < self.tx as u64 + self.w as u64
            && (y as u64) < self.ty as u64 + self.h as u64
    }

    /// Check whether the region is non-empty and lies inside a
    /// `width x height` raster
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.w > 0
            && self.h > 0
            && self.tx as u64 + self.w as u64 <= width as u64
            && self.ty as u64 + self.h as u64 <= height as u64
    }

    /// Bounding box as a [`Box`]
    ///
    /// `Box` is signed, so an origin past `i32::MAX` is clamped to it and
    /// the extent is cut so that `right()` and `bottom()` stay in range.
    /// Such a box lies outside any raster that can be drawn on.
    pub fn bounding_box(&self) -> Box {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        let (x, y) = (clamp(self.tx), clamp(self.ty));
        Box::new_unchecked(
            x,
            y,
            clamp(self.w).min(i32::MAX - x),
            clamp(self.h).min(i32::MAX - y),
        )
    }

    /// Same rectangle and flag, with the key recomputed for `raster_width`
    pub fn rekeyed(&self, raster_width: u32) -> Self {
        Self {
            key: linear_key(self.tx, self.ty, raster_width),
            ..*self
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key={}, tx:ty ({}:{}), w={}, h={}, wsplit={}",
            self.key,
            self.tx,
            self.ty,
            self.w,
            self.h,
            u8::from(self.wsplit)
        )
    }
}
