//! Grid regression test
//!
//! Loads the flat-patch sample and checks dimensions, element access and
//! cropping against known content.

use winvar_core::{Error, Grid};
use winvar_test::{RegParams, load_test_grid};

#[test]
fn grid_reg() {
    let mut rp = RegParams::new("grid");

    let grid = load_test_grid("flat_patch.pgm").expect("load flat_patch.pgm");
    eprintln!("Grid size: {}x{}", grid.rows(), grid.cols());

    // --- Test 1: Dimensions ---
    rp.compare_values(40.0, grid.rows() as f64, 0.0);
    rp.compare_values(48.0, grid.cols() as f64, 0.0);
    rp.compare_values((40 * 48) as f64, grid.len() as f64, 0.0);

    // --- Test 2: Known samples ---
    rp.compare_values(51.0, grid.get(0, 0).expect("get (0,0)") as f64, 0.0);
    rp.compare_values(62.0, grid.get(0, 4).expect("get (0,4)") as f64, 0.0);
    rp.compare_values(128.0, grid.get(25, 10).expect("get (25,10)") as f64, 0.0);
    rp.compare_values(255.0, grid.max_value() as f64, 0.0);

    // --- Test 3: The flat patch crops to a constant grid ---
    let patch = grid.crop(20, 8, 12, 12).expect("crop patch");
    let flat = Grid::new_with_value(12, 12, 128).expect("flat grid");
    rp.compare_grids(&flat, &patch);

    // Nested crops agree with a direct crop
    let nested = patch.crop(3, 4, 5, 6).expect("nested crop");
    let direct = grid.crop(23, 12, 5, 6).expect("direct crop");
    rp.compare_grids(&direct, &nested);

    // --- Test 4: Rows are contiguous slices of the data ---
    let row7 = grid.row(7).to_vec();
    let start = 7 * grid.cols() as usize;
    let same = row7.as_slice() == &grid.data()[start..start + grid.cols() as usize];
    rp.compare_values(1.0, if same { 1.0 } else { 0.0 }, 0.0);

    // --- Test 5: Out-of-range access ---
    let oob = matches!(grid.get(40, 0), Err(Error::IndexOutOfBounds { .. }));
    rp.compare_values(1.0, if oob { 1.0 } else { 0.0 }, 0.0);
    let oob_crop = matches!(grid.crop(30, 40, 12, 12), Err(Error::IndexOutOfBounds { .. }));
    rp.compare_values(1.0, if oob_crop { 1.0 } else { 0.0 }, 0.0);

    // --- Test 6: Negative samples are rejected ---
    let mut copy = grid.clone();
    let rejected = matches!(copy.set(1, 1, -3), Err(Error::NegativeSample { .. }));
    rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);
    rp.compare_grids(&grid, &copy);

    assert!(rp.cleanup(), "grid regression test failed");
}
