//! Public evaluators: validate the format, reduce the argument, run the
//! engine, re-apply the recorded corrections, and land the result back in
//! the caller's format under its overflow policy.

use core::f64::consts::{LN_2, SQRT_2};

use qfix_num::{Fixed, FixedError, OverflowPolicy, RoundingPolicy, Storage};

use crate::error::MathError;
use crate::lut::{CoordSystem, Lut, GUARD_BITS, MAX_FRAC_BITS};
use crate::reduce::{self, const_raw};
use crate::rotation::{circular_rotate, hyperbolic_rotate};
use crate::vectoring::hyperbolic_vector;

/// Layout gate for an evaluator: the format must be valid, `F` within the
/// supported table range, and `N - F` must leave enough integer headroom for
/// the algorithm's intermediates.
fn require<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    int_bits: u32,
    min_frac: u32,
) -> Result<(), MathError> {
    Fixed::<S, N, F, O, R>::validate()?;
    if F < min_frac || F > MAX_FRAC_BITS || N - F < int_bits {
        return Err(MathError::Fixed(FixedError::InvalidFormat {
            total: N,
            frac: F,
            storage: S::BITS,
        }));
    }
    Ok(())
}

/// Nearest-rounded down-shift from the working scale.
fn down(v: i128, k: u32) -> i128 {
    if k == 0 {
        v
    } else {
        (v + (1i128 << (k - 1))) >> k
    }
}

/// Sine via circular rotation. Requires three integer headroom bits
/// (arguments up to pi and the 1.647 magnitude growth).
pub fn sin<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(3, 1)?;
    let lut = Lut::shared(F, CoordSystem::Circular);
    let red = reduce::reduce_circular(x.to_wide() << GUARD_BITS, lut.work_bits());
    let (_, s) = circular_rotate(&lut, red.angle);
    let s = if red.negate { -s } else { s };
    Ok(Fixed::from_wide(down(s, GUARD_BITS))?)
}

/// Cosine via the same rotation; the engine yields both coordinates and the
/// `+-pi` fold flips cosine's sign exactly as it flips sine's.
pub fn cos<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(3, 1)?;
    let lut = Lut::shared(F, CoordSystem::Circular);
    let red = reduce::reduce_circular(x.to_wide() << GUARD_BITS, lut.work_bits());
    let (c, _) = circular_rotate(&lut, red.angle);
    let c = if red.negate { -c } else { c };
    Ok(Fixed::from_wide(down(c, GUARD_BITS))?)
}

/// Square root via hyperbolic vectoring.
///
/// The argument is normalized into `[1, 2)`; the seed `(m + 1/4, m - 1/4)`
/// vectors to `K_h * sqrt(m)`, compensated by the table gain, and the
/// removed power of two is re-applied as `2^(e/2)` with a `sqrt(2)` factor
/// for odd exponents.
pub fn sqrt<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(2, 2)?;
    if x.is_negative() {
        return Err(MathError::Domain("sqrt of a negative value"));
    }
    if x.is_zero() {
        return Ok(x);
    }
    let one = Fixed::from_int(1)?;
    if x == one {
        return Ok(x);
    }

    let lut = Lut::shared(F, CoordSystem::Hyperbolic);
    let w = lut.work_bits();
    let p = reduce::normalize_pow2(x.to_wide() << GUARD_BITS, w);

    let quarter = 1i128 << (w - 2);
    let (xv, _) = hyperbolic_vector(&lut, p.mantissa + quarter, p.mantissa - quarter);
    let mut r = down(xv * lut.gain(), w);

    let half_exp = p.exponent.div_euclid(2);
    if p.exponent.rem_euclid(2) == 1 {
        r = down(r * const_raw(SQRT_2, w), w);
    }
    let r = if half_exp >= 0 {
        r << half_exp
    } else {
        down(r, (-half_exp) as u32)
    };

    Ok(Fixed::from_wide(down(r, GUARD_BITS))?)
}

/// Natural logarithm at the working scale: `ln(v) = 2 * atanh((m-1)/(m+1))
/// + e * ln 2` after normalizing `v = m * 2^e`.
fn ln_wide(lut: &Lut, v: i128) -> Result<i128, MathError> {
    if v <= 0 {
        return Err(MathError::Domain("log of a non-positive value"));
    }
    let w = lut.work_bits();
    let p = reduce::normalize_pow2(v, w);
    let one = 1i128 << w;
    let (_, z) = hyperbolic_vector(lut, p.mantissa + one, p.mantissa - one);
    Ok((z << 1) + (p.exponent as i128) * const_raw(LN_2, w))
}

/// Natural logarithm. Domain: `x > 0`.
pub fn ln<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(2, 2)?;
    let lut = Lut::shared(F, CoordSystem::Hyperbolic);
    let r = ln_wide(&lut, x.to_wide() << GUARD_BITS)?;
    Ok(Fixed::from_wide(down(r, GUARD_BITS))?)
}

/// Pin for results beyond any representable format. Leaves headroom for the
/// guard-bit shift and the `sinh` halving to round without overflowing
/// `i128`; still above every format's raw maximum after both.
const EXP_PIN: i128 = i128::MAX >> (GUARD_BITS + 2);

/// Exponential at the working scale: split off the `ln 2` multiple, rotate
/// the remainder, re-apply `2^q`. Values beyond any representable format
/// are pinned and left to the caller's policy.
fn exp_wide(lut: &Lut, v: i128) -> i128 {
    let w = lut.work_bits();
    let (q, r) = reduce::split_ln2(v, w);
    let (c, s) = hyperbolic_rotate(lut, r);
    let er = c + s;

    if q > 64 {
        EXP_PIN
    } else if q < -(w as i32 + 2) {
        0
    } else if q >= 0 {
        er << q
    } else {
        down(er, (-q) as u32)
    }
}

/// Exponential `e^x`. Total up to the format's overflow policy.
pub fn exp<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(2, 2)?;
    let lut = Lut::shared(F, CoordSystem::Hyperbolic);
    let r = exp_wide(&lut, x.to_wide() << GUARD_BITS);
    Ok(Fixed::from_wide(down(r, GUARD_BITS))?)
}

/// Inverse hyperbolic tangent via the log identity
/// `atanh(x) = (ln(1+x) - ln(1-x)) / 2`.
///
/// Domain: `|x| <= 1`; the endpoints diverge and surface the inner
/// logarithm's domain error.
pub fn atanh<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(2, 2)?;
    if x.to_wide().abs() > 1i128 << F {
        return Err(MathError::Domain("atanh outside [-1, 1]"));
    }
    if x.is_zero() {
        return Ok(x);
    }

    let lut = Lut::shared(F, CoordSystem::Hyperbolic);
    let w = lut.work_bits();
    let one = 1i128 << w;
    let v = x.to_wide() << GUARD_BITS;
    let pos = ln_wide(&lut, one + v)?;
    let neg = ln_wide(&lut, one - v)?;
    let r = down(pos - neg, 1);
    Ok(Fixed::from_wide(down(r, GUARD_BITS))?)
}

/// Hyperbolic sine as the half-difference of exponentials:
/// `sinh(x) = (e^x - e^-x) / 2`.
pub fn sinh<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>(
    x: Fixed<S, N, F, O, R>,
) -> Result<Fixed<S, N, F, O, R>, MathError> {
    require::<S, N, F, O, R>(2, 2)?;
    let lut = Lut::shared(F, CoordSystem::Hyperbolic);
    let v = x.to_wide() << GUARD_BITS;
    let grow = exp_wide(&lut, v);
    let decay = exp_wide(&lut, -v);
    let r = down(grow - decay, 1);
    Ok(Fixed::from_wide(down(r, GUARD_BITS))?)
}
