//! Integration tests for the masked absolute-value kernel.

use lanevm::kernels::{abs_scalar, abs_vector};
use lanevm::{VectorUnit, Workload};

fn run_workload(n: usize, seed: u64) -> Workload {
    let mut workload = Workload::generate(n, seed).unwrap();
    abs_scalar(&workload.values, &mut workload.gold, workload.n);
    let mut unit = VectorUnit::new();
    abs_vector(&mut unit, &workload.values, &mut workload.output, workload.n);
    workload
}

#[test]
fn test_oracle_equivalence_across_sizes() {
    for n in [1, 2, 4, 6, 16, 31] {
        let workload = run_workload(n, 42);
        assert_eq!(workload.verify(), Ok(()), "n = {n}");
    }
}

#[test]
fn test_results_are_nonnegative() {
    let workload = run_workload(64, 3);
    for (i, &v) in workload.output[..64].iter().enumerate() {
        assert!(v >= 0.0, "output[{i}] = {v}");
    }
}

#[test]
fn test_padding_sentinels_untouched() {
    let workload = run_workload(5, 42);
    for i in 5..workload.padded_len() {
        assert_eq!(workload.output[i], 0.0, "padding index {i} written");
    }
}
