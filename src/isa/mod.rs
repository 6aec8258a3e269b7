//! Simulated vector instruction set
//!
//! A fixed-width predicated register model:
//! - [`LaneMask`] — per-lane boolean predicate with set algebra
//! - [`VecF32`] / [`VecI32`] — W-lane register value types
//! - [`VectorUnit`] — issues masked set/load/store/arithmetic/compare
//!   operations, recording each one in an execution trace
//!
//! Every operation takes its ambient mask as an explicit argument; there is
//! no implicit global masking state, so nested predicates (a loop condition
//! inside a tile-bounds mask) compose visibly at the call site.

pub mod mask;
pub mod vector;

pub use mask::LaneMask;
pub use vector::{VecF32, VecI32, VectorUnit};

/// Lanes per vector register.
pub const VECTOR_WIDTH: usize = 4;
