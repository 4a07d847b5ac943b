//! # qfix-cordic
//!
//! CORDIC evaluators for fixed-point transcendental functions: shift-add
//! iterations only, no floating-point in the computation path, precision set
//! by the format's fractional-bit count.
//!
//! Layering, leaves first:
//! - [`lut`] - per-iteration angle constants, gain compensation, and the
//!   process-wide table cache.
//! - [`reduce`] - argument reduction into each engine's convergence interval.
//! - [`rotation`] / [`vectoring`] - the circular and hyperbolic iteration
//!   engines, running on `i128` work vectors.
//! - [`funcs`] - the public adapters: [`sin`], [`cos`], [`sqrt`], [`ln`],
//!   [`exp`], [`atanh`], [`sinh`].
//!
//! Domain violations surface as [`MathError::Domain`]; overflow and layout
//! failures propagate from `qfix-num` under the format's own policies.

pub mod error;
pub mod funcs;
pub mod lut;
pub mod reduce;
pub mod rotation;
pub mod vectoring;

pub use error::MathError;
pub use funcs::{atanh, cos, exp, ln, sin, sinh, sqrt};
pub use lut::{CoordSystem, Lut};
