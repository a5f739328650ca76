//! Property-based tests for values and the codec boundary.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::cmp::Ordering;

use proptest::prelude::*;

use super::json::JsonCodec;
use super::ValueCodec;
use crate::kernels;
use crate::values::{Complex64Value, DateValue, Value, VectorValue};

/// Strategy for storable scalar values that JSON can carry.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i8>().prop_filter("sentinel", |v| *v != i8::MIN).prop_map(Value::from),
        any::<i16>().prop_filter("sentinel", |v| *v != i16::MIN).prop_map(Value::from),
        any::<i32>().prop_filter("sentinel", |v| *v != i32::MIN).prop_map(Value::from),
        any::<i64>().prop_filter("sentinel", |v| *v != i64::MIN).prop_map(Value::from),
        (-1e30_f32..1e30).prop_map(Value::from),
        (-1e300_f64..1e300).prop_map(Value::from),
        (0_i64..4_000_000_000_000).prop_map(|ms| Value::Date(DateValue::from_millis(ms))),
        ".*".prop_map(Value::from),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(Value::from),
        (-1e6_f64..1e6, -1e6_f64..1e6).prop_map(|(re, im)| Value::from(Complex64Value::new(re, im))),
    ]
}

/// Strategy for real numeric scalars of every width.
fn arb_real() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i8>().prop_map(Value::from),
        any::<i16>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f32>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
    ]
}

fn arb_vector() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::collection::vec(any::<i32>(), 0..32).prop_map(|v| Value::from(VectorValue::from(v))),
        prop::collection::vec(-1e6_f64..1e6, 0..32).prop_map(|v| Value::from(VectorValue::from(v))),
        prop::collection::vec(any::<bool>(), 0..32).prop_map(|v| Value::from(VectorValue::from(v))),
    ]
}

proptest! {
    #[test]
    fn codec_round_trip(value in prop_oneof![arb_scalar(), arb_vector()]) {
        let bytes = JsonCodec.encode(&value).unwrap();
        let decoded = JsonCodec.decode(&bytes, &value.value_type()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn real_compare_is_antisymmetric(a in arb_real(), b in arb_real()) {
        let ab = a.compare(&b).unwrap();
        let ba = b.compare(&a).unwrap();
        prop_assert_eq!(ab, ba.reverse());
    }

    #[test]
    fn integer_compare_matches_i128(a in any::<i64>(), b in any::<i32>()) {
        let expected = i128::from(a).cmp(&i128::from(b));
        prop_assert_eq!(Value::from(a).compare(&Value::from(b)).unwrap(), expected);
    }

    #[test]
    fn narrowing_truncates(v in any::<i64>()) {
        let value = Value::from(v);
        prop_assert_eq!(value.as_byte().unwrap().value(), v as i8);
        prop_assert_eq!(value.as_short().unwrap().value(), v as i16);
        prop_assert_eq!(value.as_int().unwrap().value(), v as i32);
    }

    #[test]
    fn integer_addition_commutes(a in any::<i32>(), b in any::<i64>()) {
        let (x, y) = (Value::from(a), Value::from(b));
        prop_assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
        prop_assert_eq!(x.add(&y).unwrap(), Value::from(i64::from(a).wrapping_add(b)));
    }

    #[test]
    fn slice_matches_subslice(
        lanes in prop::collection::vec(any::<i16>(), 0..64),
        start in 0_usize..64,
        len in 0_usize..64,
    ) {
        let vector = VectorValue::from(lanes.clone());
        match vector.slice(start, len) {
            Ok(sliced) => prop_assert_eq!(sliced.lanes::<i16>().unwrap(), &lanes[start..start + len]),
            Err(_) => prop_assert!(start + len > lanes.len()),
        }
    }

    #[test]
    fn hamming_scan_matches_naive(
        a in prop::collection::vec(prop_oneof![Just(0.0_f64), Just(-0.0), Just(1.0), Just(f64::NAN)], 0..48),
        flips in prop::collection::vec(any::<bool>(), 48),
    ) {
        let b: Vec<f64> = a.iter().zip(&flips).map(|(&x, &f)| if f { x + 1.0 } else { x }).collect();
        let naive = a.iter().zip(&b).filter(|(x, y)| x != y).count();
        prop_assert_eq!(kernels::hamming(&a, &b), naive);
    }

    #[test]
    fn complex_hamming_counts_mutations(
        parts in prop::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 1..48),
        mutations in prop::collection::btree_map(0_usize..48, 0_u8..4, 0..16),
    ) {
        let mut mutated = parts.clone();
        let mut k = 0;
        for (&i, &how) in mutations.iter().filter(|(i, _)| **i < parts.len()) {
            let (re, im) = &mut mutated[i];
            match how {
                0 => *re += 1.0,
                1 => *im += 1.0,
                2 => *re = f64::NAN,
                _ => *im = f64::NAN,
            }
            k += 1;
        }

        let to_vector = |pairs: &[(f64, f64)]| {
            VectorValue::from_complex(pairs.iter().map(|&(re, im)| Complex64Value::new(re, im)).collect())
        };
        let (a, b) = (to_vector(&parts), to_vector(&mutated));
        prop_assert_eq!(a.hamming(&b).unwrap(), k);
        prop_assert_eq!(b.hamming(&a).unwrap(), k);
        prop_assert_eq!(a.hamming(&a).unwrap(), 0);
    }

    #[test]
    fn self_distances_are_zero(lanes in prop::collection::vec(-1e6_f64..1e6, 1..32)) {
        let v = VectorValue::from(lanes);
        prop_assert_eq!(v.l1(&v).unwrap(), 0.0);
        prop_assert_eq!(v.l2(&v).unwrap(), 0.0);
        prop_assert_eq!(v.hamming(&v).unwrap(), 0);
        prop_assert_eq!(v.compare(&v).unwrap(), Ordering::Equal);
    }
}
