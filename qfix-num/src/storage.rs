use core::fmt::Debug;

/// Signed backing integer for a fixed-point value.
///
/// All arithmetic widens through `i128`, so implementors only need to move
/// values in and out of that common intermediate: the stored representation
/// stays narrow and deterministic, the math happens wide.
pub trait Storage: Copy + Eq + Ord + Debug + Send + Sync + 'static {
    /// Width of the backing integer in bits.
    const BITS: u32;
    const ZERO: Self;

    fn to_i128(self) -> i128;

    /// Narrow back from the wide intermediate. Callers must have already
    /// applied the overflow policy so `v` is in range.
    fn from_i128(v: i128) -> Self;
}

impl Storage for i32 {
    const BITS: u32 = 32;
    const ZERO: Self = 0;

    #[inline]
    fn to_i128(self) -> i128 {
        self as i128
    }

    #[inline]
    fn from_i128(v: i128) -> Self {
        v as i32
    }
}

impl Storage for i64 {
    const BITS: u32 = 64;
    const ZERO: Self = 0;

    #[inline]
    fn to_i128(self) -> i128 {
        self as i128
    }

    #[inline]
    fn from_i128(v: i128) -> Self {
        v as i64
    }
}
