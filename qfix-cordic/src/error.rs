use qfix_num::FixedError;
use thiserror::Error;

/// Errors surfaced by the transcendental evaluators.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Argument outside the function's valid input interval. Never silently
    /// clamped.
    #[error("argument outside the function domain: {0}")]
    Domain(&'static str),

    /// A fixed-point failure (layout, overflow under the `Fail` policy,
    /// division by zero) propagated from the underlying arithmetic.
    #[error("fixed-point error: {0}")]
    Fixed(#[from] FixedError),
}
