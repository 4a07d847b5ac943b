//! # qfix-num
//!
//! Deterministic fixed-point arithmetic over configurable bit layouts.
//!
//! A value is a signed integer `raw` read as `raw / 2^F`, with the layout
//! (backing integer, total bits `N`, fractional bits `F`) and the overflow /
//! rounding policies chosen at the type level:
//!
//! - [`Fixed<S, N, F, O, R>`](Fixed) - the scalar type; arithmetic is
//!   `Result`-returning and widens through `i128` internally.
//! - [`policy`] - `Saturate` / `Wrap` / `Fail` overflow and `Truncate` /
//!   `Nearest` rounding markers.
//! - [`storage`] - the `i32` / `i64` backing-integer abstraction.
//!
//! **Zero external dependencies** (besides `thiserror` for error types):
//! auditable in isolation.

pub mod error;
pub mod fixed;
pub mod ops;
pub mod policy;
pub mod storage;

pub use error::FixedError;
pub use fixed::{div_round_nearest, Fixed};
pub use policy::{Fail, Nearest, Overflow, OverflowPolicy, Rounding, RoundingPolicy, Saturate, Truncate, Wrap};
pub use storage::Storage;

/// 32-bit format with 16 fractional bits; the default for the CORDIC suites.
pub type Q16_16 = Fixed<i32, 32, 16, Saturate, Nearest>;

/// 32-bit format with 23 fractional bits (~1e-7 precision, ±256 range).
pub type Q8_23 = Fixed<i32, 32, 23, Saturate, Nearest>;

/// 64-bit format with 32 fractional bits.
pub type Q32_32 = Fixed<i64, 64, 32, Saturate, Nearest>;
