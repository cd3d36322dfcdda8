//! PGM (Portable Gray Map) format support
//!
//! Reads and writes both PGM variants:
//!
//! - `P2`: ASCII samples, any whitespace between tokens
//! - `P5`: binary samples, one byte each when `maxval < 256`, otherwise two
//!   bytes in big-endian order
//!
//! The header is `magic width height maxval`; `#` starts a comment that runs
//! to the end of the line. Samples are stored scanline by scanline, so the
//! header width is the number of grid columns.

use crate::format::{PgmFormat, detect_format_from_bytes};
use crate::{IoError, IoResult};
use std::io::{Read, Write};
use tracing::debug;
use winvar_core::Grid;

/// Largest maxval allowed by the PGM format
pub const PGM_MAX_MAXVAL: u32 = 65535;

/// Parsed PGM header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    /// Encoding variant
    pub format: PgmFormat,
    /// Image width in samples (grid columns)
    pub width: u32,
    /// Image height in scanlines (grid rows)
    pub height: u32,
    /// Maximum gray value
    pub maxval: u32,
}

impl PgmHeader {
    /// Bytes per sample in the binary variant
    fn bytes_per_sample(&self) -> usize {
        if self.maxval < 256 { 1 } else { 2 }
    }
}

/// Tokenizer over the header and ASCII body
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and comments
    fn skip_separators(&mut self) {
        while self.pos < self.data.len() {
            let b = self.data[self.pos];
            if b == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Option<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while self.pos < self.data.len()
            && !self.data[self.pos].is_ascii_whitespace()
            && self.data[self.pos] != b'#'
        {
            self.pos += 1;
        }
        let data = self.data;
        let end = self.pos;
        (end > start).then(|| &data[start..end])
    }

    fn next_u32(&mut self, what: &str) -> IoResult<u32> {
        let token = self
            .next_token()
            .ok_or_else(|| IoError::InvalidData(format!("missing {}", what)))?;
        parse_number(token, what)
    }
}

fn parse_number(token: &[u8], what: &str) -> IoResult<u32> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            IoError::InvalidData(format!(
                "invalid {}: '{}'",
                what,
                String::from_utf8_lossy(token)
            ))
        })
}

/// Parse the header and return it with the offset of the first sample.
fn parse_header(data: &[u8]) -> IoResult<(PgmHeader, usize)> {
    let format = detect_format_from_bytes(data)?;
    let mut cursor = Cursor::new(data);
    cursor.pos = 2;

    let width = cursor.next_u32("width")?;
    let height = cursor.next_u32("height")?;
    let maxval = cursor.next_u32("maxval")?;

    if width == 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid PGM dimensions: {}x{}",
            width, height
        )));
    }
    if maxval == 0 || maxval > PGM_MAX_MAXVAL {
        return Err(IoError::InvalidData(format!(
            "maxval {} outside 1..={}",
            maxval, PGM_MAX_MAXVAL
        )));
    }

    // The binary raster starts after exactly one whitespace byte.
    let body = match format {
        PgmFormat::Ascii => cursor.pos,
        PgmFormat::Binary => {
            if cursor.pos >= data.len() || !data[cursor.pos].is_ascii_whitespace() {
                return Err(IoError::InvalidData(
                    "missing separator after maxval".to_string(),
                ));
            }
            cursor.pos + 1
        }
    };

    let header = PgmHeader {
        format,
        width,
        height,
        maxval,
    };
    debug!(?header, "read PGM header");
    Ok((header, body))
}

/// Read just the header of a PGM file held in memory
pub fn read_pgm_header(data: &[u8]) -> IoResult<PgmHeader> {
    parse_header(data).map(|(header, _)| header)
}

/// Read a PGM image from a reader.
///
/// # Returns
/// A [`Grid`] with `height` rows and `width` columns.
pub fn read_pgm<R: Read>(mut reader: R) -> IoResult<Grid> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    read_pgm_mem(&data)
}

/// Read a PGM image from bytes
pub fn read_pgm_mem(data: &[u8]) -> IoResult<Grid> {
    let (header, body) = parse_header(data)?;
    let count = (header.width as usize) * (header.height as usize);
    let mut samples = Vec::with_capacity(count);

    match header.format {
        PgmFormat::Ascii => {
            let mut cursor = Cursor::new(data);
            cursor.pos = body;
            for _ in 0..count {
                let token = cursor.next_token().ok_or_else(|| {
                    IoError::InvalidData(format!(
                        "truncated PGM: expected {} samples, got {}",
                        count,
                        samples.len()
                    ))
                })?;
                let value = parse_number(token, "sample")?;
                samples.push(check_sample(value, &header, samples.len())?);
            }
        }
        PgmFormat::Binary => {
            let bps = header.bytes_per_sample();
            let raster = &data[body..];
            if raster.len() < count * bps {
                return Err(IoError::InvalidData(format!(
                    "truncated PGM: expected {} bytes of samples, got {}",
                    count * bps,
                    raster.len()
                )));
            }
            for (i, chunk) in raster.chunks_exact(bps).take(count).enumerate() {
                let value = match bps {
                    1 => chunk[0] as u32,
                    _ => u16::from_be_bytes([chunk[0], chunk[1]]) as u32,
                };
                samples.push(check_sample(value, &header, i)?);
            }
        }
    }

    Ok(Grid::from_data(header.height, header.width, samples)?)
}

fn check_sample(value: u32, header: &PgmHeader, index: usize) -> IoResult<i64> {
    if value > header.maxval {
        let width = header.width as usize;
        return Err(IoError::InvalidData(format!(
            "sample {} at ({}, {}) exceeds maxval {}",
            value,
            index / width,
            index % width,
            header.maxval
        )));
    }
    Ok(value as i64)
}

/// Write a grid as PGM to a writer.
///
/// The maxval is 255 when every sample fits in a byte and 65535 otherwise.
///
/// # Errors
/// Returns `IoError::InvalidData` if a sample exceeds 65535.
pub fn write_pgm<W: Write>(grid: &Grid, mut writer: W, format: PgmFormat) -> IoResult<()> {
    let max = grid.max_value();
    if max > PGM_MAX_MAXVAL as i64 {
        return Err(IoError::InvalidData(format!(
            "sample {} does not fit in a PGM (max {})",
            max, PGM_MAX_MAXVAL
        )));
    }
    let maxval: u32 = if max < 256 { 255 } else { PGM_MAX_MAXVAL };

    writer.write_all(format.magic())?;
    write!(writer, "\n{} {}\n{}\n", grid.cols(), grid.rows(), maxval)?;

    match format {
        PgmFormat::Ascii => {
            for i in 0..grid.rows() {
                let line = grid
                    .row(i)
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(writer, "{}", line)?;
            }
        }
        PgmFormat::Binary => {
            let mut raster = Vec::with_capacity(grid.len() * if maxval < 256 { 1 } else { 2 });
            for &v in grid.data() {
                if maxval < 256 {
                    raster.push(v as u8);
                } else {
                    raster.extend_from_slice(&(v as u16).to_be_bytes());
                }
            }
            writer.write_all(&raster)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ascii() {
        let grid = read_pgm_mem(b"P2\n3 2\n255\n1 2 3\n4 5 6\n").unwrap();
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_read_ascii_comments_and_loose_whitespace() {
        let data = b"P2\n# created by hand\n2   2 # w h\n15\n0\n15 7\t\t9";
        let grid = read_pgm_mem(data).unwrap();
        assert_eq!(grid.data(), &[0, 15, 7, 9]);
    }

    #[test]
    fn test_read_binary_8bit() {
        let mut data = b"P5\n2 2\n255\n".to_vec();
        data.extend_from_slice(&[0, 128, 255, 7]);
        let grid = read_pgm_mem(&data).unwrap();
        assert_eq!(grid.data(), &[0, 128, 255, 7]);
    }

    #[test]
    fn test_read_binary_16bit() {
        let mut data = b"P5 2 1 65535\n".to_vec();
        data.extend_from_slice(&[0x01, 0x00, 0xFF, 0xFF]);
        let grid = read_pgm_mem(&data).unwrap();
        assert_eq!(grid.data(), &[256, 65535]);
    }

    #[test]
    fn test_read_header() {
        let header = read_pgm_header(b"P5\n640 480\n255\n").unwrap();
        assert_eq!(header.format, PgmFormat::Binary);
        assert_eq!((header.width, header.height, header.maxval), (640, 480, 255));
    }

    #[test]
    fn test_reject_sample_above_maxval() {
        let err = read_pgm_mem(b"P2\n2 1\n10\n3 11\n").unwrap_err();
        assert!(matches!(err, IoError::InvalidData(_)));
    }

    #[test]
    fn test_reject_negative_sample() {
        assert!(read_pgm_mem(b"P2\n2 1\n10\n3 -1\n").is_err());
    }

    #[test]
    fn test_reject_truncated() {
        assert!(read_pgm_mem(b"P2\n2 2\n255\n1 2 3\n").is_err());
        let mut data = b"P5\n2 2\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        assert!(read_pgm_mem(&data).is_err());
    }

    #[test]
    fn test_reject_bad_header() {
        assert!(read_pgm_mem(b"P2\n0 2\n255\n").is_err());
        assert!(read_pgm_mem(b"P2\n2 2\n0\n").is_err());
        assert!(read_pgm_mem(b"P2\n2 2\n70000\n").is_err());
        assert!(read_pgm_mem(b"P2\ntwo 2\n255\n").is_err());
        assert!(read_pgm_mem(b"P6\n2 2\n255\n").is_err());
    }

    #[test]
    fn test_write_ascii() {
        let grid = Grid::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
        let mut out = Vec::new();
        write_pgm(&grid, &mut out, PgmFormat::Ascii).unwrap();
        assert_eq!(out, b"P2\n2 2\n255\n1 2\n3 4\n");
    }

    #[test]
    fn test_write_binary_16bit() {
        let grid = Grid::from_rows(&[vec![300, 2]]).unwrap();
        let mut out = Vec::new();
        write_pgm(&grid, &mut out, PgmFormat::Binary).unwrap();
        assert_eq!(&out[..13], b"P5\n2 1\n65535\n");
        assert_eq!(&out[13..], &[0x01, 0x2C, 0x00, 0x02]);
    }

    #[test]
    fn test_write_rejects_wide_samples() {
        let grid = Grid::from_rows(&[vec![70000]]).unwrap();
        let mut out = Vec::new();
        assert!(write_pgm(&grid, &mut out, PgmFormat::Ascii).is_err());
    }
}
