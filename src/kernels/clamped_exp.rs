//! Clamped exponentiation: `output[i] = min(values[i] ^ exponents[i], CLAMP_MAX)`
//!
//! The vector version is the divergence stress case: each lane needs
//! `exponent - 1` multiply iterations, so lanes retire from the shared loop
//! shell one by one while the live mask shrinks. The loop bound is recomputed
//! every iteration from the current per-lane counts and the shell exits when
//! no lane remains live.

use tracing::debug;

use crate::isa::{LaneMask, VecF32, VecI32, VectorUnit, VECTOR_WIDTH};

/// Results above this are clamped to exactly this value.
///
/// The clamp is strict (`>`): a result of exactly `CLAMP_MAX` passes through,
/// and negative results (negative base, odd exponent) are never clamped.
pub const CLAMP_MAX: f32 = 9.999999;

/// Scalar reference implementation.
///
/// Computed independently of the vector path so it can serve as the oracle.
pub fn clamped_exp_scalar(values: &[f32], exponents: &[i32], output: &mut [f32], n: usize) {
    for i in 0..n {
        let x = values[i];
        let y = exponents[i];
        if y == 0 {
            output[i] = 1.0;
        } else {
            let mut result = x;
            let mut count = y - 1;
            while count > 0 {
                result *= x;
                count -= 1;
            }
            if result > CLAMP_MAX {
                result = CLAMP_MAX;
            }
            output[i] = result;
        }
    }
}

/// Vectorized implementation over tiles of [`VECTOR_WIDTH`] elements.
///
/// The last tile is gated with a `first(n - i)` mask; all other masks in the
/// body are derived from that tile-validity mask, so no active lane ever
/// addresses an index past `n`.
pub fn clamped_exp_vector(
    unit: &mut VectorUnit,
    values: &[f32],
    exponents: &[i32],
    output: &mut [f32],
    n: usize,
) {
    let padded = n.next_multiple_of(VECTOR_WIDTH);
    assert!(values.len() >= padded, "values not padded to a whole tile");
    assert!(exponents.len() >= padded, "exponents not padded to a whole tile");
    assert!(output.len() >= padded, "output not padded to a whole tile");

    let int_zero = VecI32::splat(0);
    let int_one = VecI32::splat(1);
    let limit = VecF32::splat(CLAMP_MAX);

    for i in (0..n).step_by(VECTOR_WIDTH) {
        // Tile-validity mask: partial only for the last tile.
        let m0 = if i + VECTOR_WIDTH > n {
            LaneMask::first(n - i)
        } else {
            LaneMask::all()
        };

        let mut x = VecF32::default();
        let mut y = VecI32::default();
        unit.vload_f32(&mut x, &values[i..i + VECTOR_WIDTH], m0);
        unit.vload_i32(&mut y, &exponents[i..i + VECTOR_WIDTH], m0);

        // if (y == 0) { result = 1.0 }
        let zero_exp = unit.veq_i32(y, int_zero, m0);
        let mut result = VecF32::default();
        unit.vset_f32(&mut result, 1.0, zero_exp);

        // else { result = x; count = y - 1 }
        let rest = !zero_exp & m0;
        unit.vload_f32(&mut result, &values[i..i + VECTOR_WIDTH], rest);
        let mut count = VecI32::default();
        unit.vsub_i32(&mut count, y, int_one, rest);

        // Divergent multiply loop: each lane runs its own trip count inside
        // one shared shell. `count` lanes outside `rest` stay zero, so they
        // are never live.
        let mut live = unit.vgt_i32(count, int_zero, m0);
        while unit.count_active(live) > 0 {
            let partial = result;
            unit.vmult_f32(&mut result, partial, x, live);
            let remaining = count;
            unit.vsub_i32(&mut count, remaining, int_one, live);
            live = unit.vgt_i32(count, int_zero, m0);
        }

        // if (result > CLAMP_MAX) { result = CLAMP_MAX }
        let over = unit.vgt_f32(result, limit, m0);
        unit.vset_f32(&mut result, CLAMP_MAX, over);

        unit.vstore_f32(&mut output[i..i + VECTOR_WIDTH], result, m0);
    }

    debug!(
        n,
        tiles = n.div_ceil(VECTOR_WIDTH),
        instructions = unit.trace().len(),
        "clamped_exp vector kernel complete"
    );
}
