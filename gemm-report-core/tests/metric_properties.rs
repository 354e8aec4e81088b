#![allow(missing_docs)]
//! Property tests for the GFLOPS derivation

use gemm_report_core::{ReportError, gflops, percent_change, speedup};
use proptest::prelude::*;

fn size_strategy() -> impl Strategy<Value = u32> {
    1u32..=16_384
}

fn time_strategy() -> impl Strategy<Value = f64> {
    0.001f64..1.0e7
}

proptest! {
    #[test]
    fn gflops_decreases_with_time(size in size_strategy(), t in time_strategy(), factor in 1.01f64..100.0) {
        let fast = gflops(size, t).unwrap();
        let slow = gflops(size, t * factor).unwrap();
        prop_assert!(slow < fast);
    }

    #[test]
    fn gflops_increases_with_size(size in 1u32..16_383, step in 1u32..1024, t in time_strategy()) {
        let small = gflops(size, t).unwrap();
        let large = gflops(size + step, t).unwrap();
        prop_assert!(large > small);
    }

    #[test]
    fn gflops_matches_formula_at_1024(t in time_strategy()) {
        let expected = 2.0 * 1024f64.powi(3) / (t / 1000.0) / 1e9;
        let actual = gflops(1024, t).unwrap();
        prop_assert!(((actual - expected) / expected).abs() < 1e-9);
    }

    #[test]
    fn non_positive_time_is_rejected(size in size_strategy(), t in -1.0e6f64..=0.0) {
        let is_invalid = matches!(gflops(size, t), Err(ReportError::InvalidInput { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn percent_change_sign_follows_direction(before in time_strategy(), factor in 1.01f64..10.0) {
        prop_assert!(percent_change(before, before * factor).unwrap() > 0.0);
        prop_assert!(percent_change(before * factor, before).unwrap() < 0.0);
    }

    #[test]
    fn speedup_is_reciprocal(a in time_strategy(), b in time_strategy()) {
        let forward = speedup(a, b).unwrap();
        let backward = speedup(b, a).unwrap();
        prop_assert!((forward * backward - 1.0).abs() < 1e-9);
    }
}
