//! Error types for the vector-machine harness

use thiserror::Error;

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, LaneVmError>;

/// Errors surfaced by workload configuration and verification
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LaneVmError {
    #[error("workload size is set to {0} (must be positive)")]
    InvalidWorkloadSize(usize),

    #[error("out-of-bounds write: output[{index}] was modified beyond workload size {size}")]
    OutOfBoundsWrite { index: usize, size: usize },

    #[error("wrong calculation at value[{index}]: output = {output}, expected {expected}")]
    Mismatch {
        index: usize,
        output: f32,
        expected: f32,
    },
}
