//! quadpix - Adaptive region decomposition of grayscale rasters
//!
//! quadpix splits an 8-bit grayscale raster into rectangles of
//! near-uniform intensity by repeated halving along alternating axes,
//! keeps the rectangles in a binary search tree keyed by their origin,
//! and reconstructs a lossy version of the raster by filling each
//! rectangle with its mean.
//!
//! # Overview
//!
//! - Raster and box types ([`Pix`], [`PixMut`], [`Box`], [`Boxa`])
//! - Binary PGM reading and writing ([`io`])
//! - Region tree, partitioning and rendering ([`region`])
//!
//! # Example
//!
//! ```
//! use quadpix::Pix;
//! use quadpix::region::{PartitionOptions, compress};
//!
//! // Four flat 4x4 blocks
//! let data = (0..64u32).map(|i| ((i % 8) / 4 * 100 + (i / 32) * 50) as u8).collect();
//! let pix = Pix::from_bytes(8, 8, data).unwrap();
//!
//! let (out, tree) = compress(&pix, &PartitionOptions::default()).unwrap();
//! assert_eq!(tree.len(), 4);
//! assert_eq!(out.data(), pix.data());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use quadpix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use quadpix_io as io;
pub use quadpix_region as region;
