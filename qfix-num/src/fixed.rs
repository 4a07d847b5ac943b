use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use crate::error::FixedError;
use crate::policy::{Overflow, OverflowPolicy, Rounding, RoundingPolicy};
use crate::storage::Storage;

/// A real number stored as `raw / 2^F` in a signed integer `S`.
///
/// `N` is the total significant bit count (sign included), `F` the number of
/// fractional bits. `N` may be smaller than the backing integer; the unused
/// high bits always hold the sign extension. Overflow behavior (`O`) and
/// rounding behavior (`R`) are fixed at the type level, so every operation on
/// a given format is uniform - including the values the CORDIC tables are
/// converted through.
///
/// Values are immutable: arithmetic produces new values and surfaces failures
/// as [`FixedError`] instead of panicking.
pub struct Fixed<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> {
    raw: S,
    _policy: PhantomData<(O, R)>,
}

/// Division rounding to nearest, ties away from zero. The one definition of
/// the rounding convention shared with the evaluator crates.
pub fn div_round_nearest(num: i128, den: i128) -> i128 {
    let q = num / den;
    let r = num % den;
    if 2 * r.abs() >= den.abs() {
        if (num < 0) == (den < 0) {
            q + 1
        } else {
            q - 1
        }
    } else {
        q
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>
    Fixed<S, N, F, O, R>
{
    fn new(raw: S) -> Self {
        Self {
            raw,
            _policy: PhantomData,
        }
    }

    /// Checks the bit layout before any computation runs.
    ///
    /// A format is valid when `2 <= N`, `F < N`, and `N` fits the backing
    /// integer. Every constructor goes through this check, so an impossible
    /// layout is rejected up front rather than discovered mid-iteration.
    pub fn validate() -> Result<(), FixedError> {
        if N < 2 || F >= N || N > S::BITS {
            return Err(FixedError::InvalidFormat {
                total: N,
                frac: F,
                storage: S::BITS,
            });
        }
        Ok(())
    }

    pub(crate) fn raw_max() -> i128 {
        (1i128 << (N - 1)) - 1
    }

    pub(crate) fn raw_min() -> i128 {
        -(1i128 << (N - 1))
    }

    pub(crate) fn frac_mask() -> i128 {
        (1i128 << F) - 1
    }

    /// Narrow a wide intermediate to this format under the overflow policy.
    pub(crate) fn apply_overflow(v: i128) -> Result<Self, FixedError> {
        let (min, max) = (Self::raw_min(), Self::raw_max());
        if v >= min && v <= max {
            return Ok(Self::new(S::from_i128(v)));
        }
        match O::MODE {
            Overflow::Saturate => Ok(Self::new(S::from_i128(if v > max { max } else { min }))),
            Overflow::Wrap => {
                let modulus = 1i128 << N;
                let r = v & (modulus - 1);
                let r = if r >= modulus >> 1 { r - modulus } else { r };
                Ok(Self::new(S::from_i128(r)))
            }
            Overflow::Fail => Err(FixedError::Overflow),
        }
    }

    /// Right-shift a wide intermediate by `k` bits under the rounding policy.
    pub(crate) fn shift_down(v: i128, k: u32) -> i128 {
        if k == 0 {
            return v;
        }
        match R::MODE {
            Rounding::Truncate => v >> k,
            Rounding::Nearest => (v + (1i128 << (k - 1))) >> k,
        }
    }

    /// Construct from a real value, scaling by `2^F`.
    ///
    /// Fractional residue is resolved per the rounding policy, out-of-range
    /// results per the overflow policy. NaN and values too large for the wide
    /// intermediate are reported as overflow (saturation clamps infinities to
    /// the range edge).
    pub fn from_num(value: f64) -> Result<Self, FixedError> {
        Self::validate()?;
        let scaled = value * (2f64).powi(F as i32);
        let scaled = match R::MODE {
            Rounding::Truncate => scaled.trunc(),
            Rounding::Nearest => scaled.round(),
        };
        if scaled.is_nan() {
            return Err(FixedError::Overflow);
        }
        if !scaled.is_finite() || scaled.abs() >= (2f64).powi(126) {
            return match O::MODE {
                Overflow::Saturate => Ok(Self::new(S::from_i128(if scaled > 0.0 {
                    Self::raw_max()
                } else {
                    Self::raw_min()
                }))),
                Overflow::Wrap | Overflow::Fail => Err(FixedError::Overflow),
            };
        }
        Self::apply_overflow(scaled as i128)
    }

    /// Construct from an integer (`value * 2^F` as the raw).
    pub fn from_int(value: i64) -> Result<Self, FixedError> {
        Self::validate()?;
        Self::apply_overflow((value as i128) << F)
    }

    /// Reinterpret a raw backing value directly. The caller is responsible
    /// for the layout being valid and `raw` lying within `N` bits.
    pub fn from_raw(raw: S) -> Self {
        debug_assert!(Self::validate().is_ok());
        Self::new(raw)
    }

    /// Land a wide raw value (already at scale `F`) in this format, applying
    /// the overflow policy. This is the seam the CORDIC engines return
    /// results through.
    pub fn from_wide(v: i128) -> Result<Self, FixedError> {
        Self::validate()?;
        Self::apply_overflow(v)
    }

    pub fn raw(self) -> S {
        self.raw
    }

    /// The raw value widened to `i128`, for shift/add work outside the format.
    pub fn to_wide(self) -> i128 {
        self.raw.to_i128()
    }

    /// Conversion for display and testing; the numeric core never reads it.
    pub fn to_f64(self) -> f64 {
        self.raw.to_i128() as f64 / (2f64).powi(F as i32)
    }

    /// Move this value into another format, shifting between fractional
    /// scales and re-applying the overflow policy at the target layout.
    pub fn rescale<S2: Storage, const N2: u32, const F2: u32>(
        self,
    ) -> Result<Fixed<S2, N2, F2, O, R>, FixedError> {
        Fixed::<S2, N2, F2, O, R>::validate()?;
        let v = self.raw.to_i128();
        let v = if F2 >= F {
            v << (F2 - F)
        } else {
            Self::shift_down(v, F - F2)
        };
        Fixed::<S2, N2, F2, O, R>::apply_overflow(v)
    }

    pub fn is_zero(self) -> bool {
        self.raw == S::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.raw < S::ZERO
    }

    /// Round toward positive infinity: add one integer ULP whenever any
    /// fractional bit is set, then mask off the fractional field.
    pub fn ceil(self) -> Result<Self, FixedError> {
        let r = self.raw.to_i128();
        let frac = r & Self::frac_mask();
        if frac == 0 {
            return Ok(self);
        }
        Self::apply_overflow(r - frac + (1i128 << F))
    }

    /// Round toward negative infinity. Cannot leave the representable range.
    pub fn floor(self) -> Self {
        let r = self.raw.to_i128();
        Self::new(S::from_i128(r - (r & Self::frac_mask())))
    }

    /// Round to the nearest integer, ties toward positive infinity.
    pub fn round(self) -> Result<Self, FixedError> {
        if F == 0 {
            return Ok(self);
        }
        let r = self.raw.to_i128();
        let t = r + (1i128 << (F - 1));
        Self::apply_overflow(t - (t & Self::frac_mask()))
    }

    /// Fractional part `self - floor(self)`, always in `[0, 1)`.
    pub fn fract(self) -> Self {
        let r = self.raw.to_i128();
        Self::new(S::from_i128(r & Self::frac_mask()))
    }

    pub fn zero() -> Self {
        Self::new(S::ZERO)
    }

    pub fn pi() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::PI)
    }

    pub fn two_pi() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::TAU)
    }

    pub fn frac_pi_2() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::FRAC_PI_2)
    }

    pub fn sqrt_2() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::SQRT_2)
    }

    pub fn frac_1_sqrt_2() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::FRAC_1_SQRT_2)
    }

    pub fn ln_2() -> Result<Self, FixedError> {
        Self::from_num(core::f64::consts::LN_2)
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> Clone
    for Fixed<S, N, F, O, R>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> Copy
    for Fixed<S, N, F, O, R>
{
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> PartialEq
    for Fixed<S, N, F, O, R>
{
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> Eq
    for Fixed<S, N, F, O, R>
{
}

/// Ordering compares raws directly; formats agree by construction.
impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> Ord
    for Fixed<S, N, F, O, R>
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> PartialOrd
    for Fixed<S, N, F, O, R>
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy> fmt::Debug
    for Fixed<S, N, F, O, R>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed<{}, {}>({})", N, F, self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use crate::policy::{Fail, Nearest, Saturate, Truncate, Wrap};
    use crate::{Fixed, FixedError};

    type Q16_16 = Fixed<i32, 32, 16, Saturate, Nearest>;
    type Q16_16Fail = Fixed<i32, 32, 16, Fail, Nearest>;
    type Q16_16Wrap = Fixed<i32, 32, 16, Wrap, Nearest>;
    type Q4_2 = Fixed<i32, 4, 2, Saturate, Nearest>;

    #[test]
    fn test_conversion_roundtrip() {
        let inputs = [0.0, 1.0, -1.0, 0.5, -0.5, 1000.25, -1000.25];
        for &val in &inputs {
            let x = Q16_16::from_num(val).unwrap();
            let diff = (x.to_f64() - val).abs();
            assert!(diff < 1.0 / 65536.0, "roundtrip {}: got {}", val, x.to_f64());
        }
    }

    #[test]
    fn test_exact_raw_encoding() {
        // Binary rationals must encode exactly.
        let q = 1i32 << 16;
        assert_eq!(Q16_16::from_num(1.0).unwrap().raw(), q);
        assert_eq!(Q16_16::from_num(-1.0).unwrap().raw(), -q);
        assert_eq!(Q16_16::from_num(0.25).unwrap().raw(), q / 4);
        assert_eq!(Q16_16::from_num(-1.25).unwrap().raw(), -q - q / 4);
        assert_eq!(Q16_16::from_int(3).unwrap().raw(), 3 * q);
    }

    #[test]
    fn test_saturation_on_construction() {
        let big = Q16_16::from_num(1.0e9).unwrap();
        assert_eq!(big.raw(), i32::MAX);
        let small = Q16_16::from_num(-1.0e9).unwrap();
        assert_eq!(small.raw(), i32::MIN);
    }

    #[test]
    fn test_fail_policy_on_construction() {
        assert_eq!(Q16_16Fail::from_num(1.0e9), Err(FixedError::Overflow));
        assert!(Q16_16Fail::from_num(1.5).is_ok());
    }

    #[test]
    fn test_wrap_policy_is_modular() {
        // 2^15 + 1 wraps to -(2^15) + 1 in a signed 32-bit Q16.16 lattice.
        let x = Q16_16Wrap::from_num(32769.0).unwrap();
        assert_eq!(x.to_f64(), -32767.0);
    }

    #[test]
    fn test_invalid_layouts_rejected() {
        assert_eq!(
            Fixed::<i32, 32, 32, Saturate, Nearest>::from_num(1.0),
            Err(FixedError::InvalidFormat {
                total: 32,
                frac: 32,
                storage: 32
            })
        );
        assert!(Fixed::<i32, 40, 16, Saturate, Nearest>::from_num(1.0).is_err());
    }

    #[test]
    fn test_narrow_format_in_wide_storage() {
        // Q2.2 in i32 storage: range [-2.0, 1.75].
        assert_eq!(Q4_2::from_num(5.0).unwrap().to_f64(), 1.75);
        assert_eq!(Q4_2::from_num(-5.0).unwrap().to_f64(), -2.0);
        assert_eq!(Q4_2::from_num(0.75).unwrap().raw(), 3);
    }

    #[test]
    fn test_rescale_between_scales() {
        let x = Q16_16::from_num(1.5).unwrap();
        let y = x.rescale::<i64, 64, 32>().unwrap();
        assert_eq!(y.raw(), 3i64 << 31);
        let back = y.rescale::<i32, 32, 16>().unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn test_truncate_vs_nearest() {
        type QTrunc = Fixed<i32, 32, 16, Saturate, Truncate>;
        // 0.75 ULP above an integer: nearest rounds up, truncate drops.
        let v = 1.0 + 0.75 / 65536.0;
        assert_eq!(Q16_16::from_num(v).unwrap().raw(), (1 << 16) + 1);
        assert_eq!(QTrunc::from_num(v).unwrap().raw(), 1 << 16);
    }

    #[test]
    fn test_ceil_floor_round_fract() {
        let x = Q16_16::from_num(2.25).unwrap();
        assert_eq!(x.ceil().unwrap().to_f64(), 3.0);
        assert_eq!(x.floor().to_f64(), 2.0);
        assert_eq!(x.round().unwrap().to_f64(), 2.0);
        assert_eq!(x.fract().to_f64(), 0.25);

        let y = Q16_16::from_num(-2.25).unwrap();
        assert_eq!(y.ceil().unwrap().to_f64(), -2.0);
        assert_eq!(y.floor().to_f64(), -3.0);
        assert_eq!(y.fract().to_f64(), 0.75);

        // Integral values are fixed points of all three.
        let z = Q16_16::from_int(7).unwrap();
        assert_eq!(z.ceil().unwrap(), z);
        assert_eq!(z.floor(), z);
        assert_eq!(z.round().unwrap(), z);
    }

    #[test]
    fn test_ordering_on_raw() {
        let a = Q16_16::from_num(-1.5).unwrap();
        let b = Q16_16::from_num(0.25).unwrap();
        assert!(a < b);
        assert!(b > Q16_16::zero());
    }

    #[test]
    fn test_nan_is_overflow() {
        assert_eq!(Q16_16::from_num(f64::NAN), Err(FixedError::Overflow));
    }
}
