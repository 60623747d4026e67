//! quadpix-io - Image I/O for quadpix
//!
//! The region engine only needs a single 8-bit channel, so the only
//! persisted format is binary PGM (`P5`). Reading and writing go through
//! [`read_image`] / [`write_image`] for files and [`read_image_mem`] /
//! [`write_image_mem`] for in-memory buffers.
//!
//! # Example
//!
//! ```
//! use quadpix_core::Pix;
//! use quadpix_io::{ImageFormat, read_image_mem, write_image_mem};
//!
//! let pix = Pix::new_filled(4, 3, 255).unwrap();
//! let bytes = write_image_mem(&pix, ImageFormat::Pnm).unwrap();
//! let back = read_image_mem(&bytes).unwrap();
//! assert_eq!(back.data(), pix.data());
//! ```

mod error;
pub mod format;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};

use quadpix_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// Binary PNM (PGM `P5` for grayscale)
    Pnm,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Pnm => "pgm",
        }
    }
}

/// Read an image from a file path.
///
/// The format is detected from the file header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    match detect_format(path)? {
        ImageFormat::Pnm => {
            let reader = BufReader::new(File::open(path)?);
            pnm::read_pnm(reader)
        }
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    match detect_format_from_bytes(data)? {
        ImageFormat::Pnm => pnm::read_pnm(Cursor::new(data)),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unrecognized header".to_string(),
        )),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(pix, &mut writer, format)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), width = pix.width(), height = pix.height(), "wrote image");
    Ok(())
}

/// Encode an image into a byte buffer in the given format.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(pix.data().len() + 64);
    write_image_format(pix, &mut buf, format)?;
    Ok(buf)
}

fn write_image_format<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "cannot write unknown format".to_string(),
        )),
    }
}
