//! PGM I/O regression test
//!
//! Reads the sample images in ASCII, 8-bit binary and 16-bit binary form,
//! and writes grids back out in both encodings.

use winvar_io::{PgmFormat, read_pgm_header, read_pgm_mem, write_pgm_mem};
use winvar_test::{RegParams, load_test_grid, test_data_path};

#[test]
fn pgmio_reg() {
    let mut rp = RegParams::new("pgmio");

    let ascii = load_test_grid("flat_patch.pgm").expect("load flat_patch.pgm");

    // --- Test 1: Written corner matches the golden file ---
    let corner = ascii.crop(0, 0, 4, 5).expect("crop corner");
    rp.write_grid_and_check(&corner, PgmFormat::Ascii)
        .expect("write corner");

    // --- Test 2: P2 and P5 encodings of the same image agree ---
    let binary = load_test_grid("flat_patch_p5.pgm").expect("load flat_patch_p5.pgm");
    rp.compare_grids(&ascii, &binary);

    // --- Test 3: Header of the binary file ---
    let bytes = std::fs::read(test_data_path("flat_patch_p5.pgm")).expect("read p5 bytes");
    let header = read_pgm_header(&bytes).expect("p5 header");
    rp.compare_values(48.0, header.width as f64, 0.0);
    rp.compare_values(40.0, header.height as f64, 0.0);
    rp.compare_values(255.0, header.maxval as f64, 0.0);
    let is_binary = header.format == PgmFormat::Binary;
    rp.compare_values(1.0, if is_binary { 1.0 } else { 0.0 }, 0.0);

    // --- Test 4: Encode and decode through memory ---
    for format in [PgmFormat::Ascii, PgmFormat::Binary] {
        let encoded = write_pgm_mem(&ascii, format).expect("encode");
        let decoded = read_pgm_mem(&encoded).expect("decode");
        rp.compare_grids(&ascii, &decoded);
        eprintln!("  {:?}: {} bytes", format, encoded.len());
    }

    // --- Test 5: 16-bit samples ---
    let ramp = load_test_grid("ramp16.pgm").expect("load ramp16.pgm");
    rp.compare_values(6.0, ramp.rows() as f64, 0.0);
    rp.compare_values(8.0, ramp.cols() as f64, 0.0);
    rp.compare_values(1074.0, ramp.get(1, 2).expect("get (1,2)") as f64, 0.0);
    rp.compare_values(5259.0, ramp.max_value() as f64, 0.0);

    let encoded = write_pgm_mem(&ramp, PgmFormat::Binary).expect("encode ramp");
    let header = read_pgm_header(&encoded).expect("ramp header");
    rp.compare_values(65535.0, header.maxval as f64, 0.0);
    let decoded = read_pgm_mem(&encoded).expect("decode ramp");
    rp.compare_grids(&ramp, &decoded);

    assert!(rp.cleanup(), "pgmio regression test failed");
}
