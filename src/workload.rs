//! Workload generation and verification harness
//!
//! Four same-length arrays, padded by one extra tile so the last partial tile
//! can still issue full-width masked operations. The padding region of
//! `output` doubles as the out-of-bounds-write detector: it is
//! zero-initialized identically to `gold` and must still match after the
//! vector kernel ran — a diff there means an active mask bit addressed an
//! index past the workload size.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{LaneVmError, Result};
use crate::isa::VECTOR_WIDTH;

/// Exponents are generated in `[0, EXP_MAX)`.
pub const EXP_MAX: i32 = 10;

/// Verification tolerance for the vector-versus-scalar diff.
pub const EPSILON: f32 = 1e-5;

/// One generated workload: inputs plus the two result arrays.
#[derive(Clone, Debug)]
pub struct Workload {
    /// Number of live elements; indices `>= n` are padding.
    pub n: usize,
    /// Base values in `[-1, 3)`, length `n + VECTOR_WIDTH`.
    pub values: Vec<f32>,
    /// Exponents in `[0, EXP_MAX)`, length `n + VECTOR_WIDTH`.
    pub exponents: Vec<i32>,
    /// Vector kernel results; padding stays at the 0.0 sentinel.
    pub output: Vec<f32>,
    /// Scalar oracle results; padding stays at the 0.0 sentinel.
    pub gold: Vec<f32>,
}

impl Workload {
    /// Generate a workload of `n` elements from a seeded PRNG.
    ///
    /// The padding region gets random inputs too — a kernel that reads it
    /// through an active lane produces a visible diff instead of a silent
    /// zero.
    pub fn generate(n: usize, seed: u64) -> Result<Self> {
        if n == 0 {
            return Err(LaneVmError::InvalidWorkloadSize(n));
        }

        let padded = n + VECTOR_WIDTH;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut values = vec![0.0f32; padded];
        let mut exponents = vec![0i32; padded];
        for i in 0..padded {
            values[i] = -1.0 + 4.0 * rng.gen::<f32>();
            exponents[i] = rng.gen_range(0..EXP_MAX);
        }

        debug!(n, seed, "generated workload");

        Ok(Self {
            n,
            values,
            exponents,
            output: vec![0.0; padded],
            gold: vec![0.0; padded],
        })
    }

    /// Array length including the padding tile.
    pub fn padded_len(&self) -> usize {
        self.n + VECTOR_WIDTH
    }

    /// Diff `output` against `gold` element by element, padding included.
    ///
    /// The first offending index classifies the failure: inside `[0, n)` it
    /// is a numeric mismatch; inside the padding it is an out-of-bounds
    /// masked write.
    pub fn verify(&self) -> Result<()> {
        for i in 0..self.padded_len() {
            if (self.output[i] - self.gold[i]).abs() > EPSILON {
                return Err(if i >= self.n {
                    LaneVmError::OutOfBoundsWrite {
                        index: i,
                        size: self.n,
                    }
                } else {
                    LaneVmError::Mismatch {
                        index: i,
                        output: self.output[i],
                        expected: self.gold[i],
                    }
                });
            }
        }
        Ok(())
    }
}
