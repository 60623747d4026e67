//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Values travel as `u32` at the API boundary; stored samples are bytes,
//! so writes clamp into `[0, 255]`.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

/// Clamp an arbitrary sample value into the 8-bit gray range.
#[inline]
pub fn clamp_gray(val: i64) -> u8 {
    val.clamp(0, crate::MAX_GRAY as i64) as u8
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.row_data(y)[x as usize] as u32
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.row_data(y)[x as usize] as u32
    }

    /// Set a pixel value at (x, y).
    ///
    /// Values above 255 are stored as 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        self.row_data_mut(y)[x as usize] = clamp_gray(val as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_gray() {
        assert_eq!(clamp_gray(-5), 0);
        assert_eq!(clamp_gray(0), 0);
        assert_eq!(clamp_gray(128), 128);
        assert_eq!(clamp_gray(255), 255);
        assert_eq!(clamp_gray(1000), 255);
    }

    #[test]
    fn test_get_set_pixel() {
        let mut pm = Pix::new(4, 3).unwrap().to_mut();
        pm.set_pixel(2, 1, 77).unwrap();
        assert_eq!(pm.get_pixel(2, 1), Some(77));
        // Row-major: index = x + y * width
        assert_eq!(pm.data()[2 + 4], 77);

        let pix: Pix = pm.into();
        assert_eq!(pix.get_pixel(2, 1), Some(77));
        assert_eq!(pix.get_pixel(4, 0), None);
        assert_eq!(pix.get_pixel(0, 3), None);
    }

    #[test]
    fn test_set_pixel_out_of_bounds() {
        let mut pm = Pix::new(2, 2).unwrap().to_mut();
        assert!(pm.set_pixel(2, 0, 1).is_err());
        assert!(pm.set_pixel(0, 2, 1).is_err());
    }

    #[test]
    fn test_set_pixel_clamps() {
        let mut pm = Pix::new(1, 1).unwrap().to_mut();
        pm.set_pixel(0, 0, 300).unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(255));
    }
}
