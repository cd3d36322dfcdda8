//! winvar-io - PGM image I/O
//!
//! Reads grayscale PGM files (`P2` ASCII and `P5` binary) into a
//! [`Grid`](winvar_core::Grid) and writes grids back out.
//!
//! # Example
//!
//! ```
//! use winvar_io::{PgmFormat, read_pgm_mem, write_pgm_mem};
//!
//! let grid = read_pgm_mem(b"P2\n2 2\n255\n10 20\n30 40\n").unwrap();
//! assert_eq!(grid.dimensions(), (2, 2));
//!
//! let bytes = write_pgm_mem(&grid, PgmFormat::Binary).unwrap();
//! assert_eq!(read_pgm_mem(&bytes).unwrap(), grid);
//! ```

mod error;
pub mod format;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{PgmFormat, detect_format_from_bytes};
pub use pnm::{PgmHeader, read_pgm, read_pgm_header, read_pgm_mem, write_pgm};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use winvar_core::Grid;

/// Read a PGM file from a path
pub fn read_grid<P: AsRef<Path>>(path: P) -> IoResult<Grid> {
    let file = File::open(path.as_ref())?;
    read_pgm(BufReader::new(file))
}

/// Write a grid to a PGM file
pub fn write_grid<P: AsRef<Path>>(grid: &Grid, path: P, format: PgmFormat) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_pgm(grid, BufWriter::new(file), format)
}

/// Encode a grid as PGM bytes
pub fn write_pgm_mem(grid: &Grid, format: PgmFormat) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_pgm(grid, &mut out, format)?;
    Ok(out)
}
