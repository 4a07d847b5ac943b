//! Overflow and rounding behavior, chosen per format at the type level.
//!
//! The policies are marker types carrying an associated const, so a format
//! like `Fixed<i32, 32, 16, Saturate, Nearest>` resolves its behavior at
//! compile time with no runtime branch on configuration state.

/// How out-of-range results are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Clamp to the representable extreme.
    Saturate,
    /// Wrap modulo `2^N`.
    Wrap,
    /// Surface `FixedError::Overflow` to the caller.
    Fail,
}

/// How discarded fractional bits are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Arithmetic shift toward negative infinity (division truncates toward
    /// zero).
    Truncate,
    /// Round to nearest, ties away from the lower value.
    Nearest,
}

pub trait OverflowPolicy: Copy + Eq + Send + Sync + 'static {
    const MODE: Overflow;
}

pub trait RoundingPolicy: Copy + Eq + Send + Sync + 'static {
    const MODE: Rounding;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Saturate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Truncate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Nearest;

impl OverflowPolicy for Saturate {
    const MODE: Overflow = Overflow::Saturate;
}

impl OverflowPolicy for Wrap {
    const MODE: Overflow = Overflow::Wrap;
}

impl OverflowPolicy for Fail {
    const MODE: Overflow = Overflow::Fail;
}

impl RoundingPolicy for Truncate {
    const MODE: Rounding = Rounding::Truncate;
}

impl RoundingPolicy for Nearest {
    const MODE: Rounding = Rounding::Nearest;
}
