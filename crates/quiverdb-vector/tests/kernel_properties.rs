//! Property tests for the distance kernels.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use half::f16;
use proptest::prelude::*;
use quiverdb_core::{Complex64Value, VectorValue};
use quiverdb_vector::{DistanceError, DistanceKernel, ExecutionPath, KernelConfig};

const SCALAR: KernelConfig = KernelConfig::new(ExecutionPath::Scalar);
const VECTORIZED: KernelConfig = KernelConfig::new(ExecutionPath::Vectorized);

/// Kernels defined on every real vector, whatever its dimension.
const REAL_KERNELS: [DistanceKernel; 7] = [
    DistanceKernel::L1,
    DistanceKernel::L2,
    DistanceKernel::L2Squared,
    DistanceKernel::Cosine,
    DistanceKernel::ChiSquared,
    DistanceKernel::Hamming,
    DistanceKernel::InnerProduct,
];

/// Relative closeness, for sums whose magnitude grows with the dimension.
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 * a.abs().max(b.abs()).max(1.0)
}

fn arb_pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1e3_f64..1e3, len),
            prop::collection::vec(-1e3_f64..1e3, len),
        )
    })
}

fn arb_weighted(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>, Vec<f64>)> {
    (1..max_len).prop_flat_map(|len| {
        (
            prop::collection::vec(-1e3_f64..1e3, len),
            prop::collection::vec(-1e3_f64..1e3, len),
            prop::collection::vec(0.0_f64..4.0, len),
        )
    })
}

proptest! {
    #[test]
    fn vectorized_matches_scalar((a, b) in arb_pair(80)) {
        let (a, b) = (VectorValue::from(a), VectorValue::from(b));
        for kernel in REAL_KERNELS {
            let s = kernel.invoke_with(&SCALAR, &a, &b, None).unwrap();
            let v = kernel.invoke_with(&VECTORIZED, &a, &b, None).unwrap();
            prop_assert!(close(s, v), "{}: {} vs {}", kernel, s, v);
        }
    }

    #[test]
    fn weighted_vectorized_matches_scalar((a, b, w) in arb_weighted(80)) {
        let (a, b, w) = (VectorValue::from(a), VectorValue::from(b), VectorValue::from(w));
        for kernel in REAL_KERNELS {
            let s = kernel.invoke_with(&SCALAR, &a, &b, Some(&w)).unwrap();
            let v = kernel.invoke_with(&VECTORIZED, &a, &b, Some(&w)).unwrap();
            prop_assert!(close(s, v), "{}: {} vs {}", kernel, s, v);
        }
    }

    #[test]
    fn complex_vectorized_matches_scalar(
        parts in prop::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3, -1e3_f64..1e3, -1e3_f64..1e3), 1..40),
    ) {
        let a = VectorValue::from_complex(parts.iter().map(|p| Complex64Value::new(p.0, p.1)).collect());
        let b = VectorValue::from_complex(parts.iter().map(|p| Complex64Value::new(p.2, p.3)).collect());
        for kernel in [
            DistanceKernel::L2Squared,
            DistanceKernel::Cosine,
            DistanceKernel::Hamming,
            DistanceKernel::InnerProduct,
        ] {
            let s = kernel.invoke_with(&SCALAR, &a, &b, None).unwrap();
            let v = kernel.invoke_with(&VECTORIZED, &a, &b, None).unwrap();
            prop_assert!(close(s, v), "{}: {} vs {}", kernel, s, v);
        }
    }

    #[test]
    fn l2_is_sqrt_of_l2_squared((a, b) in arb_pair(64)) {
        let (a, b) = (VectorValue::from(a), VectorValue::from(b));
        let l2 = DistanceKernel::L2.invoke(&a, &b).unwrap();
        let l2_squared = DistanceKernel::L2Squared.invoke(&a, &b).unwrap();
        prop_assert_eq!(l2, l2_squared.sqrt());
    }

    #[test]
    fn self_distances_are_zero(lanes in prop::collection::vec(-1e3_f64..1e3, 1..64)) {
        let has_norm = lanes.iter().any(|x| x.abs() > 1e-2);
        let a = VectorValue::from(lanes);
        for kernel in [DistanceKernel::L1, DistanceKernel::L2, DistanceKernel::Hamming] {
            prop_assert_eq!(kernel.invoke(&a, &a).unwrap(), 0.0);
        }
        if has_norm {
            prop_assert!(DistanceKernel::Cosine.invoke(&a, &a).unwrap().abs() < 1e-9);
        }
    }

    #[test]
    fn hamming_counts_mutations(
        lanes in prop::collection::vec(any::<i32>(), 1..64),
        positions in prop::collection::btree_set(0_usize..64, 0..16),
    ) {
        let mut mutated = lanes.clone();
        let mut k = 0;
        for &i in positions.iter().filter(|&&i| i < lanes.len()) {
            mutated[i] = mutated[i].wrapping_add(1);
            k += 1;
        }
        let (a, b) = (VectorValue::from(lanes), VectorValue::from(mutated));
        for config in [SCALAR, VECTORIZED] {
            prop_assert_eq!(DistanceKernel::Hamming.invoke_with(&config, &a, &b, None).unwrap(), k as f64);
        }
    }

    #[test]
    fn unit_weights_change_nothing((a, b) in arb_pair(64)) {
        let ones = VectorValue::from(vec![1.0_f64; a.len()]);
        let (a, b) = (VectorValue::from(a), VectorValue::from(b));
        for kernel in REAL_KERNELS {
            let weighted = kernel.invoke_with(&SCALAR, &a, &b, Some(&ones)).unwrap();
            prop_assert_eq!(weighted, kernel.invoke_with(&SCALAR, &a, &b, None).unwrap(), "{}", kernel);

            let weighted = kernel.invoke_with(&VECTORIZED, &a, &b, Some(&ones)).unwrap();
            let plain = kernel.invoke_with(&VECTORIZED, &a, &b, None).unwrap();
            prop_assert!(close(weighted, plain), "{}: {} vs {}", kernel, weighted, plain);
        }
    }

    #[test]
    fn unit_weights_change_nothing_for_complex(
        parts in prop::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3, -1e3_f64..1e3, -1e3_f64..1e3), 1..40),
    ) {
        let ones = VectorValue::from(vec![1.0_f64; parts.len()]);
        let a = VectorValue::from_complex(parts.iter().map(|p| Complex64Value::new(p.0, p.1)).collect());
        let b = VectorValue::from_complex(parts.iter().map(|p| Complex64Value::new(p.2, p.3)).collect());
        for kernel in [
            DistanceKernel::L2Squared,
            DistanceKernel::Cosine,
            DistanceKernel::Hamming,
            DistanceKernel::InnerProduct,
        ] {
            for config in [SCALAR, VECTORIZED] {
                prop_assert_eq!(
                    kernel.invoke_with(&config, &a, &b, Some(&ones)).unwrap(),
                    kernel.invoke_with(&config, &a, &b, None).unwrap(),
                    "{}", kernel
                );
            }
        }
    }

    #[test]
    fn cosine_stays_in_range((a, b) in arb_pair(64)) {
        let d = DistanceKernel::Cosine.invoke(&VectorValue::from(a), &VectorValue::from(b)).unwrap();
        prop_assert!((0.0..=2.0).contains(&d));
    }

    #[test]
    fn cosine_of_zero_vector_is_one(lanes in prop::collection::vec(-1e3_f64..1e3, 1..64)) {
        let zero = VectorValue::from(vec![0.0_f64; lanes.len()]);
        let a = VectorValue::from(lanes);
        prop_assert_eq!(DistanceKernel::Cosine.invoke(&a, &zero).unwrap(), 1.0);
        prop_assert_eq!(DistanceKernel::Cosine.invoke(&zero, &a).unwrap(), 1.0);
    }

    #[test]
    fn built_in_metrics_match_scalar_kernels((a, b) in arb_pair(64)) {
        let (a, b) = (VectorValue::from(a), VectorValue::from(b));
        prop_assert_eq!(a.l1(&b).unwrap(), DistanceKernel::L1.invoke_with(&SCALAR, &a, &b, None).unwrap());
        prop_assert_eq!(
            a.l2_squared(&b).unwrap(),
            DistanceKernel::L2Squared.invoke_with(&SCALAR, &a, &b, None).unwrap()
        );
        prop_assert_eq!(
            a.hamming(&b).unwrap() as f64,
            DistanceKernel::Hamming.invoke_with(&SCALAR, &a, &b, None).unwrap()
        );
    }
}

#[test]
fn every_kernel_rejects_mismatched_dimensions() {
    let three = VectorValue::from(vec![1.0_f32, 2.0, 3.0]);
    let four = VectorValue::from(vec![1_i64, 2, 3, 4]);
    for kernel in DistanceKernel::ALL {
        for config in [SCALAR, VECTORIZED] {
            assert_eq!(
                kernel.invoke_with(&config, &three, &four, None).unwrap_err(),
                DistanceError::DimensionMismatch { expected: 3, actual: 4 },
                "{kernel}"
            );
        }
    }
}

#[test]
fn half_vectors_are_widened() {
    let a = VectorValue::from(vec![f16::from_f32(0.5), f16::from_f32(1.5)]);
    let b = VectorValue::from(vec![0.0_f32, 0.0]);
    assert_eq!(DistanceKernel::L1.invoke(&a, &b).unwrap(), 2.0);
    assert_eq!(DistanceKernel::L1.invoke(&a, &a).unwrap(), 0.0);
}

#[test]
fn complex_identity_is_preserved() {
    // z = b - a = 2 + 1i: re^2 - im^2 + 2 re im = 7, while |z|^2 = 5
    let a = VectorValue::from_complex(vec![Complex64Value::new(1.0, 0.0)]);
    let b = VectorValue::from_complex(vec![Complex64Value::new(3.0, 1.0)]);
    assert_eq!(DistanceKernel::L2Squared.invoke(&a, &b).unwrap(), 7.0);
    assert_eq!(a.l2_squared(&b).unwrap(), 5.0);
}
