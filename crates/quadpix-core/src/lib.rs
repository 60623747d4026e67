//! Quadpix Core - Basic data structures for grayscale region processing
//!
//! This crate provides the fundamental data structures used throughout
//! the quadpix workspace:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale raster (immutable / mutable)
//! - [`Box`] / [`Boxa`] - Rectangle regions
//!
//! Pixel data is stored row-major with one byte per pixel, so the sample
//! for `(x, y)` lives at index `x + y * width` of [`Pix::data`].

pub mod box_;
pub mod error;
pub mod pix;

pub use box_::{Box, Boxa};
pub use error::{Error, Result};
pub use pix::{Pix, PixMut, clamp_gray};

/// Largest representable gray value.
pub const MAX_GRAY: u8 = u8::MAX;
