//! Masked absolute value: `output[i] = |values[i]|`
//!
//! The minimal if/else masking pattern with no loop divergence: one compare
//! derives the "negative" mask, its complement (still under the tile mask)
//! covers the pass-through branch.

use crate::isa::{LaneMask, VecF32, VectorUnit, VECTOR_WIDTH};

/// Scalar reference implementation.
pub fn abs_scalar(values: &[f32], output: &mut [f32], n: usize) {
    for i in 0..n {
        let x = values[i];
        output[i] = if x < 0.0 { -x } else { x };
    }
}

/// Vectorized implementation over tiles of [`VECTOR_WIDTH`] elements.
pub fn abs_vector(unit: &mut VectorUnit, values: &[f32], output: &mut [f32], n: usize) {
    let padded = n.next_multiple_of(VECTOR_WIDTH);
    assert!(values.len() >= padded, "values not padded to a whole tile");
    assert!(output.len() >= padded, "output not padded to a whole tile");

    let zero = VecF32::splat(0.0);

    for i in (0..n).step_by(VECTOR_WIDTH) {
        let m0 = if i + VECTOR_WIDTH > n {
            LaneMask::first(n - i)
        } else {
            LaneMask::all()
        };

        let mut x = VecF32::default();
        unit.vload_f32(&mut x, &values[i..i + VECTOR_WIDTH], m0);

        // if (x < 0) { result = 0 - x }
        let neg = unit.vlt_f32(x, zero, m0);
        let mut result = VecF32::default();
        unit.vsub_f32(&mut result, zero, x, neg);

        // else { result = x }
        unit.vload_f32(&mut result, &values[i..i + VECTOR_WIDTH], !neg & m0);

        unit.vstore_f32(&mut output[i..i + VECTOR_WIDTH], result, m0);
    }
}
