use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use qfix_cordic::{cos, sin, MathError};
use qfix_num::{Fixed, FixedError, Nearest, Q16_16, Q8_23, Saturate};

/// Accuracy scales as 2^-(F-2) with the format, not a fixed epsilon.
fn bound(frac_bits: i32) -> f64 {
    (2f64).powi(-(frac_bits - 2))
}

#[test]
fn test_sin_of_one_q1616() {
    let x = Q16_16::from_num(1.0).unwrap();
    let s = sin(x).unwrap();
    assert_abs_diff_eq!(s.to_f64(), 0.841_470_98, epsilon = (2f64).powi(-14));
}

#[test]
fn test_sin_cos_reference_sweep_q1616() {
    for i in -63..=63 {
        let v = i as f64 * 0.1;
        let x = Q16_16::from_num(v).unwrap();
        assert_abs_diff_eq!(sin(x).unwrap().to_f64(), v.sin(), epsilon = bound(16));
        assert_abs_diff_eq!(cos(x).unwrap().to_f64(), v.cos(), epsilon = bound(16));
    }
}

#[test]
fn test_precision_scales_with_fraction_bits() {
    // The same angle at 23 fractional bits must meet the tighter bound.
    let x = Q8_23::from_num(1.0).unwrap();
    assert_abs_diff_eq!(sin(x).unwrap().to_f64(), 1f64.sin(), epsilon = bound(23));
    assert_abs_diff_eq!(cos(x).unwrap().to_f64(), 1f64.cos(), epsilon = bound(23));
}

#[test]
fn test_quadrant_symmetry() {
    // sin(x + pi) = -sin(x) through the fold-and-negate reduction.
    let x = Q16_16::from_num(0.7).unwrap();
    let shifted = Q16_16::from_num(0.7 + core::f64::consts::PI).unwrap();
    let direct = sin(x).unwrap().to_f64();
    let folded = sin(shifted).unwrap().to_f64();
    assert_abs_diff_eq!(folded, -direct, epsilon = 2.0 * bound(16));
}

#[test]
fn test_sin_zero() {
    let z = sin(Q16_16::zero()).unwrap();
    // Reduction leaves zero untouched; only engine residual remains.
    assert_abs_diff_eq!(z.to_f64(), 0.0, epsilon = bound(16));
    assert_abs_diff_eq!(cos(Q16_16::zero()).unwrap().to_f64(), 1.0, epsilon = bound(16));
}

#[test]
fn test_insufficient_headroom_is_rejected() {
    type Tight = Fixed<i32, 32, 30, Saturate, Nearest>;
    let x = Tight::from_num(0.5).unwrap();
    assert_eq!(
        sin(x),
        Err(MathError::Fixed(FixedError::InvalidFormat {
            total: 32,
            frac: 30,
            storage: 32
        }))
    );
}

// Pythagorean identity within the precision-scaled bound.
proptest! {
    #[test]
    fn prop_sin_cos_identity(v in -10.0f64..10.0) {
        let x = Q16_16::from_num(v).unwrap();
        let s = sin(x).unwrap().to_f64();
        let c = cos(x).unwrap().to_f64();
        let norm = s * s + c * c;
        prop_assert!((norm - 1.0).abs() < 4.0 * bound(16), "sin^2+cos^2 = {}", norm);
    }
}

// Accuracy against the reference for arbitrary arguments.
proptest! {
    #[test]
    fn prop_sin_matches_reference(v in -10.0f64..10.0) {
        let x = Q16_16::from_num(v).unwrap();
        // Compare against the sine of the value actually stored.
        let stored = x.to_f64();
        let got = sin(x).unwrap().to_f64();
        prop_assert!((got - stored.sin()).abs() < bound(16), "sin({}) = {}", stored, got);
    }
}

// Oddness: sin(-x) == -sin(x) within rounding.
proptest! {
    #[test]
    fn prop_sin_odd_symmetry(v in 0.0f64..6.0) {
        let pos = sin(Q16_16::from_num(v).unwrap()).unwrap().to_f64();
        let neg = sin(Q16_16::from_num(-v).unwrap()).unwrap().to_f64();
        prop_assert!((pos + neg).abs() < 2.0 * bound(16));
    }
}

// Determinism: evaluating twice gives identical raw bits.
proptest! {
    #[test]
    fn prop_sin_deterministic(v in -10.0f64..10.0) {
        let x = Q16_16::from_num(v).unwrap();
        prop_assert_eq!(sin(x).unwrap().raw(), sin(x).unwrap().raw());
    }
}
