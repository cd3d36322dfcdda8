//! PGM variant detection
//!
//! Detects the PGM variant by examining the magic number in the file header.

use crate::{IoError, IoResult};

/// Magic numbers for format detection
mod magic {
    /// PGM ASCII
    pub const PGM_ASCII: &[u8] = b"P2";
    /// PGM binary
    pub const PGM_BINARY: &[u8] = b"P5";

    /// Other Netpbm variants, recognised only to give a clearer error
    pub const PBM_ASCII: &[u8] = b"P1";
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PBM_BINARY: &[u8] = b"P4";
    pub const PPM_BINARY: &[u8] = b"P6";
    pub const PAM: &[u8] = b"P7";
}

/// PGM encoding variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PgmFormat {
    /// `P2`: samples as whitespace-separated decimal text
    #[default]
    Ascii,
    /// `P5`: samples as raw bytes (1 per sample, or 2 big-endian if maxval > 255)
    Binary,
}

impl PgmFormat {
    /// The two-byte magic number for this variant
    pub fn magic(self) -> &'static [u8] {
        match self {
            PgmFormat::Ascii => magic::PGM_ASCII,
            PgmFormat::Binary => magic::PGM_BINARY,
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        "pgm"
    }
}

/// Detect the PGM variant from the first bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<PgmFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_ASCII {
        return Ok(PgmFormat::Ascii);
    }
    if first_two == magic::PGM_BINARY {
        return Ok(PgmFormat::Binary);
    }

    if first_two == magic::PBM_ASCII
        || first_two == magic::PBM_BINARY
        || first_two == magic::PPM_ASCII
        || first_two == magic::PPM_BINARY
        || first_two == magic::PAM
    {
        return Err(IoError::UnsupportedFormat(format!(
            "{} is not a grayscale PGM",
            String::from_utf8_lossy(first_two)
        )));
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pgm() {
        assert_eq!(
            detect_format_from_bytes(b"P2\n3 3\n255\n").unwrap(),
            PgmFormat::Ascii
        );
        assert_eq!(
            detect_format_from_bytes(b"P5\n100 100\n255\n").unwrap(),
            PgmFormat::Binary
        );
    }

    #[test]
    fn test_detect_color_pnm_rejected() {
        assert!(matches!(
            detect_format_from_bytes(b"P6\n100 100\n255\n"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(detect_format_from_bytes(b"P4\n8 8\n").is_err());
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"UNKNOWN_FORMAT").is_err());
    }

    #[test]
    fn test_detect_too_short() {
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }
}
