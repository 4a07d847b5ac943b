//! Rotation-mode CORDIC: drive the angle accumulator `z` to zero with
//! micro-rotations, reading the function values off the final `(x, y)`.
//!
//! The work vector lives in `i128` at the table's working scale
//! (`frac_bits + GUARD_BITS`), so the iteration itself can never overflow
//! and shift truncation stays far below the caller's precision; adapters
//! narrow the result into the caller's format afterwards.

use crate::lut::Lut;

/// Circular rotation: from `(gain, 0, z0)`, after `f` steps `x` approximates
/// `cos(z0)` and `y` approximates `sin(z0)` for `|z0| <= pi/2`.
///
/// `z0` and the returned `(cos_raw, sin_raw)` are at the table's working
/// scale.
pub fn circular_rotate(lut: &Lut, z0: i128) -> (i128, i128) {
    let mut x = lut.gain();
    let mut y = 0i128;
    let mut z = z0;

    for i in 0..lut.frac_bits() {
        let dx = y >> i;
        let dy = x >> i;
        if z >= 0 {
            x -= dx;
            y += dy;
            z -= lut.angle(i as usize);
        } else {
            x += dx;
            y -= dy;
            z += lut.angle(i as usize);
        }
    }

    (x, y)
}

/// Hyperbolic rotation: from `(gain, 0, z0)`, after the repeat schedule `x`
/// approximates `cosh(z0)` and `y` approximates `sinh(z0)` for
/// `|z0| <= ~1.118` (the sum of the `atanh` table).
///
/// Returns `(cosh_raw, sinh_raw)` at the working scale.
pub fn hyperbolic_rotate(lut: &Lut, z0: i128) -> (i128, i128) {
    let mut x = lut.gain();
    let mut y = 0i128;
    let mut z = z0;

    for &k in lut.schedule() {
        let dx = y >> k;
        let dy = x >> k;
        if z >= 0 {
            x += dx;
            y += dy;
            z -= lut.angle(k as usize - 1);
        } else {
            x -= dx;
            y -= dy;
            z += lut.angle(k as usize - 1);
        }
    }

    (x, y)
}
