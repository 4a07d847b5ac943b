//! Argument reduction into the engines' convergence intervals.
//!
//! Reducers work on wide raw values at the caller's fractional scale and
//! record the correction (sign flip, power-of-two exponent, `ln 2` multiple)
//! that the adapter re-applies after the iteration.

use core::f64::consts::{FRAC_PI_2, LN_2, PI, TAU};

use qfix_num::div_round_nearest;

/// Round-nearest conversion of a reference constant to a raw at scale `f`.
pub(crate) fn const_raw(x: f64, f: u32) -> i128 {
    (x * (2f64).powi(f as i32)).round() as i128
}

/// Outcome of folding an angle into `[-pi/2, pi/2]`.
pub struct CircularReduction {
    /// Reduced angle raw, within the rotation engine's convergence interval.
    pub angle: i128,
    /// Whether the result must be negated: a `+-pi` fold flips the sign of
    /// both sine and cosine.
    pub negate: bool,
}

/// Reduce an arbitrary angle modulo `2 pi` into `[-pi, pi]`, then fold by
/// `+-pi` when the remainder exceeds `+-pi/2`.
pub fn reduce_circular(raw: i128, f: u32) -> CircularReduction {
    let two_pi = const_raw(TAU, f);
    let pi = const_raw(PI, f);
    let half_pi = const_raw(FRAC_PI_2, f);

    let mut r = raw % two_pi;
    if r > pi {
        r -= two_pi;
    } else if r < -pi {
        r += two_pi;
    }

    let mut negate = false;
    if r > half_pi {
        r -= pi;
        negate = true;
    } else if r < -half_pi {
        r += pi;
        negate = true;
    }

    CircularReduction { angle: r, negate }
}

/// Outcome of normalizing a positive value into `[1.0, 2.0)`:
/// `value = mantissa * 2^exponent`.
pub struct Pow2Reduction {
    pub mantissa: i128,
    pub exponent: i32,
}

/// Normalize a positive raw into `[1.0, 2.0)` by repeated halving/doubling,
/// recording the net power of two removed.
pub fn normalize_pow2(raw: i128, f: u32) -> Pow2Reduction {
    debug_assert!(raw > 0);
    let one = 1i128 << f;
    let two = one << 1;

    let mut mantissa = raw;
    let mut exponent = 0i32;
    while mantissa >= two {
        mantissa >>= 1;
        exponent += 1;
    }
    while mantissa < one {
        mantissa <<= 1;
        exponent -= 1;
    }

    Pow2Reduction { mantissa, exponent }
}

/// Split `v = q * ln 2 + r` with `|r| <= ln(2)/2`, so `e^v = 2^q * e^r` and
/// `r` sits inside the hyperbolic rotation's convergence interval.
pub fn split_ln2(raw: i128, f: u32) -> (i32, i128) {
    let ln2 = const_raw(LN_2, f);
    let q = div_round_nearest(raw, ln2);
    (q as i32, raw - q * ln2)
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: u32 = 16;

    fn raw(x: f64) -> i128 {
        const_raw(x, F)
    }

    #[test]
    fn test_small_angles_pass_through() {
        let r = reduce_circular(raw(0.5), F);
        assert_eq!(r.angle, raw(0.5));
        assert!(!r.negate);

        let r = reduce_circular(raw(-1.2), F);
        assert_eq!(r.angle, raw(-1.2));
        assert!(!r.negate);
    }

    #[test]
    fn test_fold_past_half_pi() {
        // 3pi/4 folds to -pi/4 with a sign flip.
        let r = reduce_circular(raw(3.0 * PI / 4.0), F);
        assert!(r.negate);
        assert!((r.angle - raw(-PI / 4.0)).abs() <= 2);

        let r = reduce_circular(raw(-3.0 * PI / 4.0), F);
        assert!(r.negate);
        assert!((r.angle - raw(PI / 4.0)).abs() <= 2);
    }

    #[test]
    fn test_reduction_mod_two_pi() {
        // 2pi + 0.5 reduces to ~0.5, no flip.
        let r = reduce_circular(raw(TAU + 0.5), F);
        assert!(!r.negate);
        assert!((r.angle - raw(0.5)).abs() <= 2);
    }

    #[test]
    fn test_reduced_angle_in_interval() {
        let half_pi = raw(FRAC_PI_2);
        for i in -80..80 {
            let r = reduce_circular(raw(i as f64 * 0.17), F);
            assert!(r.angle.abs() <= half_pi + 2, "angle out of range at {}", i);
        }
    }

    #[test]
    fn test_normalize_pow2() {
        let one = 1i128 << F;

        let p = normalize_pow2(raw(2.0), F);
        assert_eq!((p.mantissa, p.exponent), (one, 1));

        let p = normalize_pow2(raw(0.25), F);
        assert_eq!((p.mantissa, p.exponent), (one, -2));

        let p = normalize_pow2(raw(1.0), F);
        assert_eq!((p.mantissa, p.exponent), (one, 0));

        let p = normalize_pow2(raw(6.5), F);
        assert_eq!(p.exponent, 2);
        assert!(p.mantissa >= one && p.mantissa < one << 1);
        // Reassembling recovers the input exactly (shifts only).
        assert_eq!(p.mantissa << p.exponent, raw(6.5));
    }

    #[test]
    fn test_split_ln2() {
        let (q, r) = split_ln2(raw(1.0), F);
        assert_eq!(q, 1);
        assert!((r - raw(1.0 - LN_2)).abs() <= 2);

        let (q, r) = split_ln2(raw(-0.2), F);
        assert_eq!(q, 0);
        assert_eq!(r, raw(-0.2));

        // Remainder always within +-ln(2)/2, one ULP of slack.
        for i in -40..40 {
            let (_, r) = split_ln2(raw(i as f64 * 0.3), F);
            assert!(r.abs() <= const_raw(LN_2 / 2.0, F) + 2);
        }
    }
}
