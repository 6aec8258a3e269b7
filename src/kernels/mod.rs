//! Vectorized workload kernels and their scalar oracles
//!
//! Each kernel comes in two forms: a hand-vectorized version driven through
//! the [`VectorUnit`](crate::isa::VectorUnit) under explicit lane masks, and
//! a purely scalar reference used as the correctness oracle. The two share no
//! mutable state, so any masking bug in the vector path shows up as a diff.
//!
//! Kernel contract: input and output slices must cover the workload size
//! rounded up to a whole number of tiles, so every tile can issue full-width
//! masked operations. The elements past the workload size are only ever
//! touched through inactive lanes.

pub mod abs;
pub mod clamped_exp;

pub use abs::{abs_scalar, abs_vector};
pub use clamped_exp::{clamped_exp_scalar, clamped_exp_vector, CLAMP_MAX};
