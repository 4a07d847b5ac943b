//! Vectoring-mode CORDIC (hyperbolic): drive `y` to zero, accumulating the
//! rotated angle in `z`.
//!
//! Two readings of the final state serve two functions: the scaled `x` gives
//! `K_h * sqrt(x0^2 - y0^2)` (square root after gain compensation), and `z`
//! gives `atanh(y0 / x0)` (the logarithm path). All raws are at the table's
//! working scale.

use crate::lut::Lut;

/// Hyperbolic vectoring from `(x0, y0, 0)` over the repeat schedule.
///
/// Requires `x0 > 0` and `|atanh(y0/x0)| <= ~1.118`; both hold for the
/// reduced seeds the adapters produce. Returns `(x_raw, z_raw)`.
pub fn hyperbolic_vector(lut: &Lut, x0: i128, y0: i128) -> (i128, i128) {
    let mut x = x0;
    let mut y = y0;
    let mut z = 0i128;

    for &k in lut.schedule() {
        let dx = y >> k;
        let dy = x >> k;
        // Step direction is sign(x) * sign(y): always toward y = 0.
        if (x >= 0) == (y >= 0) {
            x -= dx;
            y -= dy;
            z += lut.angle(k as usize - 1);
        } else {
            x += dx;
            y += dy;
            z -= lut.angle(k as usize - 1);
        }
    }

    (x, z)
}
