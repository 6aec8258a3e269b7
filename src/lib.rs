//! lanevm — software model of a predicated vector machine
//!
//! This crate simulates a fixed-width masked vector unit entirely in scalar
//! code. Every vector instruction takes an explicit active-lane mask and only
//! touches lanes that mask enables, matching what real predicated hardware
//! does: inactive destination lanes keep their prior content, and masked
//! loads never dereference memory for inactive lanes.
//!
//! The crate provides:
//! - **ISA model** ([`isa`]): [`LaneMask`] predicates, [`VecF32`]/[`VecI32`]
//!   registers, and a [`VectorUnit`] that issues masked operations.
//! - **Execution trace** ([`trace`]): per-instruction active-lane accounting
//!   for reporting vector utilization.
//! - **Kernels** ([`kernels`]): hand-vectorized clamped exponentiation and
//!   absolute value, each with a scalar reference oracle.
//! - **Workload harness** ([`workload`]): pseudorandom input generation and
//!   sentinel-based verification that distinguishes numeric mismatches from
//!   out-of-bounds masked writes.
//!
//! The model is single-threaded by design: all "parallelism" is
//! data-parallelism simulated within one execution stream.

pub mod error;
pub mod isa;
pub mod kernels;
pub mod trace;
pub mod workload;

pub use error::{LaneVmError, Result};
pub use isa::{LaneMask, VecF32, VecI32, VectorUnit, VECTOR_WIDTH};
pub use trace::{ExecTrace, Opcode, TraceEntry, TraceSummary};
pub use workload::Workload;
