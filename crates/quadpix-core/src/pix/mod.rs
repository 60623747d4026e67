//! PIX - The grayscale image container
//!
//! The `Pix` structure is the raster every region operation reads from
//! and writes to. Only a single 8-bit channel is supported.
//!
//! # Pixel layout
//!
//! - Image data is stored row-major, one byte per pixel
//! - There is no row padding; the stride equals the width
//! - The sample for `(x, y)` is at index `x + y * width`
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

pub use access::clamp_gray;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Text string associated with pix
    text: Option<String>,
    /// The image data (row-major bytes)
    data: Vec<u8>,
}

impl PixData {
    fn blank(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize)
            .checked_mul(height as usize)
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(PixData {
            width,
            height,
            text: None,
            data: vec![value; size],
        })
    }

    #[inline]
    fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }
}

/// PIX - 8-bit grayscale image
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use quadpix_core::Pix;
///
/// let pix = Pix::new(640, 480).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// assert_eq!(pix.get_pixel(0, 0), Some(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions.
    ///
    /// The image data is initialized to zero (black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_filled(width, height, 0)
    }

    /// Create a new PIX with every pixel set to `value`.
    ///
    /// A blank canvas is usually created white, i.e. `new_filled(w, h, 255)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new_filled(width: u32, height: u32, value: u8) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::blank(width, height, value)?),
        })
    }

    /// Create a PIX from row-major pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::InvalidParameter`] if `data.len() != width * height`.
    pub fn from_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "expected {} bytes for {}x{} image, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                text: None,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the associated text.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.inner.text.as_deref()
    }

    /// Get raw access to the row-major image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        self.inner.row(y)
    }

    /// Check if two PIX have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`PixMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Set the associated text.
    pub fn set_text(&mut self, text: Option<String>) {
        self.inner.text = text;
    }

    /// Get raw access to the row-major image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u8] {
        self.inner.row(y)
    }

    /// Get mutable access to the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u8] {
        let width = self.inner.width as usize;
        let start = y as usize * width;
        &mut self.inner.data[start..start + width]
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.data().len(), 20_000);
        assert!(pix.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(Pix::new(0, 100).is_err());
        assert!(Pix::new(100, 0).is_err());
    }

    #[test]
    fn test_new_filled_white() {
        let pix = Pix::new_filled(8, 4, 255).unwrap();
        assert!(pix.data().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_from_bytes() {
        let pix = Pix::from_bytes(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(pix.row_data(0), &[10, 20]);
        assert_eq!(pix.row_data(1), &[30, 40]);
        assert!(Pix::from_bytes(2, 2, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_pix_clone_shares_data() {
        let pix1 = Pix::new(100, 100).unwrap();
        let pix2 = pix1.clone();
        assert_eq!(pix1.data().as_ptr(), pix2.data().as_ptr());
        assert!(pix1.sizes_equal(&pix2));
    }

    #[test]
    fn test_to_mut_copies() {
        let pix = Pix::new_filled(4, 4, 9).unwrap();
        let mut pm = pix.to_mut();
        pm.row_data_mut(0).fill(1);
        assert_ne!(pix.data().as_ptr(), pm.data().as_ptr());
        assert_eq!(pix.row_data(0), &[9, 9, 9, 9]);
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let pix1 = Pix::new(4, 4).unwrap();
        let pix2 = pix1.clone();
        let back = pix1.try_into_mut().unwrap_err();
        drop(pix2);
        assert!(back.try_into_mut().is_ok());
    }

    #[test]
    fn test_pix_mut_roundtrip() {
        let pix = Pix::new(3, 2).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_text(Some("quads".to_string()));
        pm.row_data_mut(1).fill(7);
        let pix: Pix = pm.into();
        assert_eq!(pix.text(), Some("quads"));
        assert_eq!(pix.data(), &[0, 0, 0, 7, 7, 7]);
    }
}
