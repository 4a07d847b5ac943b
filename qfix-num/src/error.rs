use thiserror::Error;

/// Errors produced by fixed-point construction and arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedError {
    /// The requested bit layout is not representable: `frac` must be smaller
    /// than `total`, and `total` must fit the backing integer.
    #[error("invalid fixed-point layout: {total} total bits / {frac} fractional bits in {storage}-bit storage")]
    InvalidFormat { total: u32, frac: u32, storage: u32 },

    /// The result falls outside the representable range and the format's
    /// overflow policy is `Fail`.
    #[error("arithmetic overflow outside the representable range")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,
}
