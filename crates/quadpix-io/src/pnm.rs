//! PNM (Portable Any Map) format support
//!
//! Reads and writes binary PGM (`P5`) at 8 bits per sample. The first
//! header comment is kept as the image text and written back out as the
//! comment line, so a read/write cycle preserves it.

use crate::{IoError, IoResult};
use quadpix_core::Pix;
use std::io::{BufRead, Read, Write};

/// Comment written when the image carries no text of its own.
pub const DEFAULT_COMMENT: &str = "quadpix output";

/// Largest sample value accepted in the header.
const MAX_MAXVAL: u32 = quadpix_core::MAX_GRAY as u32;

/// Pulls whitespace-separated header tokens, skipping `#` comments.
struct HeaderReader<R> {
    reader: R,
    comment: Option<String>,
}

impl<R: BufRead> HeaderReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            comment: None,
        }
    }

    fn read_byte(&mut self) -> IoResult<Option<u8>> {
        let buf = self.reader.fill_buf()?;
        let Some(&b) = buf.first() else {
            return Ok(None);
        };
        self.reader.consume(1);
        Ok(Some(b))
    }

    fn skip_comment(&mut self) -> IoResult<()> {
        let mut line = Vec::new();
        while let Some(b) = self.read_byte()? {
            if b == b'\n' {
                break;
            }
            line.push(b);
        }
        if self.comment.is_none() {
            let text = String::from_utf8_lossy(&line).trim().to_string();
            if !text.is_empty() {
                self.comment = Some(text);
            }
        }
        Ok(())
    }

    /// Read one token. The single whitespace byte that ends it is consumed.
    fn next_token(&mut self) -> IoResult<String> {
        let mut token = Vec::new();
        loop {
            match self.read_byte()? {
                None => {
                    return Err(IoError::InvalidData("truncated PNM header".to_string()));
                }
                Some(b'#') => self.skip_comment()?,
                Some(b) if b.is_ascii_whitespace() => {}
                Some(b) => {
                    token.push(b);
                    break;
                }
            }
        }
        loop {
            match self.read_byte()? {
                None => break,
                Some(b) if b.is_ascii_whitespace() => break,
                Some(b'#') => {
                    self.skip_comment()?;
                    break;
                }
                Some(b) => token.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&token).into_owned())
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self.next_token()?;
        token
            .parse::<u32>()
            .map_err(|_| IoError::InvalidData(format!("invalid PNM {what}: {token:?}")))
    }
}

/// Read a binary PGM (`P5`) image from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the `P5` magic
///
/// # Returns
/// An 8-bit `Pix`. Samples are stored as read; a maxval below 255 is not
/// rescaled.
pub fn read_pnm<R: BufRead>(reader: R) -> IoResult<Pix> {
    let mut header = HeaderReader::new(reader);

    let magic = header.next_token()?;
    if magic != "P5" {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM magic {magic:?} (only binary PGM P5 is supported)"
        )));
    }

    let width = header.next_u32("width")?;
    let height = header.next_u32("height")?;
    let maxval = header.next_u32("maxval")?;
    if maxval == 0 || maxval > MAX_MAXVAL {
        return Err(IoError::UnsupportedFormat(format!(
            "PGM maxval {maxval} (must be 1..={MAX_MAXVAL})"
        )));
    }
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PGM dimensions: {width}x{height}"
        )));
    }

    let size = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| IoError::InvalidData(format!("PGM too large: {width}x{height}")))?;
    // Buffer grows only with bytes actually read
    let mut data = Vec::new();
    (&mut header.reader)
        .take(size as u64)
        .read_to_end(&mut data)?;
    if data.len() != size {
        return Err(IoError::InvalidData(format!(
            "PGM data truncated: expected {size} bytes, got {}",
            data.len()
        )));
    }

    let pix = Pix::from_bytes(width, height, data)?;
    let Some(comment) = header.comment else {
        return Ok(pix);
    };
    match pix.try_into_mut() {
        Ok(mut pm) => {
            pm.set_text(Some(comment));
            Ok(pm.into())
        }
        Err(pix) => Ok(pix),
    }
}

/// Write a `Pix` as binary PGM (`P5`) to a writer.
///
/// The header carries one comment line: the image text if present,
/// otherwise [`DEFAULT_COMMENT`].
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let comment = pix
        .text()
        .map(|t| t.replace(['\n', '\r'], " "))
        .unwrap_or_else(|| DEFAULT_COMMENT.to_string());
    write!(
        writer,
        "P5\n# {}\n{} {}\n{}\n",
        comment,
        pix.width(),
        pix.height(),
        MAX_MAXVAL
    )?;
    writer.write_all(pix.data())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_huge_header_is_invalid_data() {
        let bytes = b"P5\n4294967295 4294967295\n255\n\0\0".to_vec();
        let err = read_pnm(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn test_read_minimal_pgm() {
        let mut bytes = b"P5\n2 2\n255\n".to_vec();
        bytes.extend_from_slice(&[10, 20, 30, 40]);
        let pix = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.width(), 2);
        assert_eq!(pix.height(), 2);
        assert_eq!(pix.data(), &[10, 20, 30, 40]);
        assert_eq!(pix.text(), None);
    }

    #[test]
    fn test_read_pgm_with_comments() {
        let mut bytes = b"P5\n# first comment\n# second\n3 1\n255\n".to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let pix = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[1, 2, 3]);
        assert_eq!(pix.text(), Some("first comment"));
    }

    #[test]
    fn test_data_byte_that_looks_like_whitespace() {
        // The first data byte is '\n' and must not be eaten by the header
        let mut bytes = b"P5 2 1 255\n".to_vec();
        bytes.extend_from_slice(&[b'\n', b' ']);
        let pix = read_pnm(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.data(), &[b'\n', b' ']);
    }

    #[test]
    fn test_write_header() {
        let pix = Pix::from_bytes(2, 1, vec![0, 255]).unwrap();
        let mut out = Vec::new();
        write_pnm(&pix, &mut out).unwrap();
        let expected_header = format!("P5\n# {DEFAULT_COMMENT}\n2 1\n255\n");
        assert!(out.starts_with(expected_header.as_bytes()));
        assert_eq!(&out[expected_header.len()..], &[0, 255]);
    }

    #[test]
    fn test_roundtrip_keeps_text() {
        let mut pm = Pix::new_filled(3, 2, 128).unwrap().to_mut();
        pm.set_pixel(1, 1, 7).unwrap();
        pm.set_text(Some("compressed at threshold 10".to_string()));
        let pix: Pix = pm.into();

        let mut out = Vec::new();
        write_pnm(&pix, &mut out).unwrap();
        let back = read_pnm(Cursor::new(out)).unwrap();
        assert_eq!(back.data(), pix.data());
        assert_eq!(back.text(), Some("compressed at threshold 10"));
    }

    #[test]
    fn test_truncated_data() {
        let mut bytes = b"P5\n4 4\n255\n".to_vec();
        bytes.extend_from_slice(&[0; 5]);
        assert!(matches!(
            read_pnm(Cursor::new(bytes)),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_reject_wide_maxval_and_bad_magic() {
        assert!(matches!(
            read_pnm(Cursor::new(b"P5\n1 1\n65535\n\0\0".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(Cursor::new(b"P6\n1 1\n255\n\0\0\0".to_vec())),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(read_pnm(Cursor::new(b"P5\n1".to_vec())).is_err());
    }
}
