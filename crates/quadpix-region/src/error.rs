//! Error types for quadpix-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] quadpix_core::Error),

    /// A region with the same origin is already in the tree
    #[error("duplicate region at ({tx}, {ty}) with key {key}")]
    DuplicateKey { tx: u32, ty: u32, key: u64 },

    /// Region is empty or reaches outside the raster
    #[error("region ({tx}, {ty}) {w}x{h} does not fit in {width}x{height} raster")]
    RegionOutOfBounds {
        tx: u32,
        ty: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },

    /// The tree's raster width differs from the raster it is used with
    #[error("tree built for raster width {tree_width}, raster is {raster_width} wide")]
    RasterWidthMismatch { tree_width: u32, raster_width: u32 },

    /// Failure writing diagnostic output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
