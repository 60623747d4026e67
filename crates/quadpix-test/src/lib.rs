//! quadpix-test - Regression test framework for quadpix
//!
//! This crate provides a golden-file regression test framework with
//! three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also provides synthetic test rasters, so regression tests do not
//! depend on image files checked into the repository.
//!
//! # Usage
//!
//! ```ignore
//! use quadpix_test::RegParams;
//!
//! let mut rp = RegParams::new("partition");
//! rp.compare_values(2.0, tree.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Filter for log output when [`init_tracing`] is used

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use quadpix_core::Pix;

/// Install a `tracing` subscriber that writes to the test output.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create a raster whose pixels are given by `f(x, y)`.
///
/// # Panics
///
/// Panics if `width` or `height` is 0.
pub fn pix_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Pix {
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            data.push(f(x, y));
        }
    }
    Pix::from_bytes(width, height, data).expect("non-empty test raster")
}

/// Raster whose left half is `left` and right half is `right`.
///
/// For odd widths the extra column belongs to the right half.
pub fn split_halves(width: u32, height: u32, left: u8, right: u8) -> Pix {
    pix_from_fn(width, height, |x, _| if x < width / 2 { left } else { right })
}

/// Smooth synthetic pattern with spatial variation in both directions.
pub fn synthetic_gradient(width: u32, height: u32) -> Pix {
    pix_from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let val = 128.0
            + 60.0 * (fx * std::f32::consts::TAU).sin()
            + 40.0 * (fy * 2.0 * std::f32::consts::TAU).cos()
            + 20.0 * ((fx + fy) * 9.42).sin();
        val.clamp(0.0, 255.0) as u8
    })
}

/// Deterministic pseudo-random noise (xorshift), for reproducible tests.
pub fn noise(width: u32, height: u32, seed: u32) -> Pix {
    let mut state = seed.max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..width as usize * height as usize {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        data.push((state >> 24) as u8);
    }
    Pix::from_bytes(width, height, data).expect("non-empty test raster")
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // quadpix-test is at crates/quadpix-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_halves() {
        let pix = split_halves(5, 2, 0, 255);
        assert_eq!(pix.row_data(0), &[0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_noise_is_deterministic() {
        let a = noise(8, 8, 7);
        let b = noise(8, 8, 7);
        let c = noise(8, 8, 8);
        assert_eq!(a.data(), b.data());
        assert_ne!(a.data(), c.data());
    }
}
