//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{ImageFormat, IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for PNM detection
mod magic {
    pub const PGM_BINARY: &[u8] = b"P5";

    /// PNM variants that are recognized but not readable here
    pub const OTHER_PNM: [&[u8]; 5] = [b"P1", b"P2", b"P3", b"P4", b"P6"];
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 4];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] if fewer than two bytes are given and
/// [`IoError::UnsupportedFormat`] for PNM variants other than binary PGM.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PGM_BINARY) {
        return Ok(ImageFormat::Pnm);
    }

    if magic::OTHER_PNM.iter().any(|m| data.starts_with(m)) {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM variant {} (only binary PGM P5 is supported)",
            String::from_utf8_lossy(&data[..2])
        )));
    }

    Ok(ImageFormat::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pgm() {
        assert_eq!(
            detect_format_from_bytes(b"P5\n4 4\n255\n").unwrap(),
            ImageFormat::Pnm
        );
    }

    #[test]
    fn test_detect_other_pnm_unsupported() {
        assert!(matches!(
            detect_format_from_bytes(b"P6\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_unknown_and_short() {
        assert_eq!(
            detect_format_from_bytes(b"BM....").unwrap(),
            ImageFormat::Unknown
        );
        assert!(detect_format_from_bytes(b"P").is_err());
    }
}
