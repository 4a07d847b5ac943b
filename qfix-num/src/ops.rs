//! Arithmetic on [`Fixed`] values.
//!
//! All operations are fallible methods returning `Result` rather than std
//! operator impls: the overflow policy decides whether an out-of-range result
//! saturates, wraps, or surfaces [`FixedError::Overflow`], and `Result` keeps
//! that last case recoverable. Intermediates widen through `i128` so the only
//! place precision or range can be lost is the final narrowing step.

use crate::error::FixedError;
use crate::fixed::{div_round_nearest, Fixed};
use crate::policy::{OverflowPolicy, Rounding, RoundingPolicy};
use crate::storage::Storage;

impl<S: Storage, const N: u32, const F: u32, O: OverflowPolicy, R: RoundingPolicy>
    Fixed<S, N, F, O, R>
{
    pub fn add(self, rhs: Self) -> Result<Self, FixedError> {
        Self::apply_overflow(self.to_wide() + rhs.to_wide())
    }

    pub fn sub(self, rhs: Self) -> Result<Self, FixedError> {
        Self::apply_overflow(self.to_wide() - rhs.to_wide())
    }

    /// Full-width product rescaled back down to `F` fractional bits.
    pub fn mul(self, rhs: Self) -> Result<Self, FixedError> {
        let prod = self.to_wide() * rhs.to_wide();
        Self::apply_overflow(Self::shift_down(prod, F))
    }

    /// Division; the dividend is pre-shifted by `F` so the quotient lands at
    /// this format's scale. Division by zero always fails, regardless of the
    /// overflow policy.
    pub fn div(self, rhs: Self) -> Result<Self, FixedError> {
        if rhs.is_zero() {
            return Err(FixedError::DivisionByZero);
        }
        let num = self.to_wide() << F;
        let den = rhs.to_wide();
        let q = match R::MODE {
            Rounding::Truncate => num / den,
            Rounding::Nearest => div_round_nearest(num, den),
        };
        Self::apply_overflow(q)
    }

    /// Unary negation. Fallible because `-raw_min` exceeds `raw_max`.
    pub fn neg(self) -> Result<Self, FixedError> {
        Self::apply_overflow(-self.to_wide())
    }

    pub fn abs(self) -> Result<Self, FixedError> {
        if self.is_negative() {
            self.neg()
        } else {
            Ok(self)
        }
    }
}
