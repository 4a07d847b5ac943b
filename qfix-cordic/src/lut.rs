//! Per-iteration angle constants and gain compensation.
//!
//! A [`Lut`] is a pure function of the fractional-bit count and the
//! coordinate system: rebuilding it always yields bit-identical values, so
//! the process-wide cache is an optimization only. First use per
//! configuration builds the table once behind a lock; steady-state callers
//! share the immutable [`Arc`].
//!
//! Tables are stored at the engines' working scale, `frac_bits + GUARD_BITS`:
//! the extra low bits keep per-iteration shift truncation far below the
//! format's own precision, leaving the angle-table residual as the dominant
//! error term.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Guard bits appended below the caller's fractional scale for the duration
/// of an iteration.
pub const GUARD_BITS: u32 = 12;

/// Largest supported fractional-bit count for the evaluators. Keeps every
/// widened product (two values at `frac + GUARD_BITS` scale) inside `i128`.
pub const MAX_FRAC_BITS: u32 = 48;

/// The CORDIC coordinate system a table serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordSystem {
    /// Rotation through `atan(2^-i)` micro-angles (sin / cos).
    Circular,
    /// Rotation through `atanh(2^-i)` micro-angles (sqrt, exp, ln).
    Hyperbolic,
}

/// Angle table, iteration schedule, and gain constant for one
/// `(fractional bits, coordinate system)` configuration.
///
/// Raw values are `i128` at scale `2^work_bits`.
#[derive(Debug, PartialEq, Eq)]
pub struct Lut {
    frac_bits: u32,
    work_bits: u32,
    system: CoordSystem,
    angles: Box<[i128]>,
    schedule: Box<[u32]>,
    gain: i128,
}

fn to_raw(x: f64, scale: u32) -> i128 {
    (x * (2f64).powi(scale as i32)).round() as i128
}

/// Shift sequence for hyperbolic mode: `1, 2, 3, ...` with every index on
/// the `k_{j+1} = 3k_j + 1` chain (4, 13, 40, ...) visited twice. The
/// doubled visits are required for convergence; skipping them biases the
/// result.
fn hyperbolic_schedule(f: u32) -> Vec<u32> {
    let mut schedule = Vec::with_capacity(f as usize + 2);
    let mut repeat = 4u32;
    for k in 1..=f {
        schedule.push(k);
        if k == repeat {
            schedule.push(k);
            repeat = 3 * repeat + 1;
        }
    }
    schedule
}

impl Lut {
    /// Build the table for `f` fractional bits. Deterministic in `(f, system)`
    /// alone.
    pub fn build(f: u32, system: CoordSystem) -> Self {
        debug_assert!(f >= 1 && f <= MAX_FRAC_BITS);
        let work_bits = f + GUARD_BITS;
        match system {
            CoordSystem::Circular => {
                // Shift sequence is 0, 1, ..., f-1; the magnitude grows by
                // prod sqrt(1 + 2^-2i), so the engine seeds x with the
                // reciprocal (converges to ~0.607253).
                let mut gain = 1.0f64;
                let mut angles = Vec::with_capacity(f as usize);
                for i in 0..f {
                    let t = (2f64).powi(-(i as i32));
                    angles.push(to_raw(t.atan(), work_bits));
                    gain /= (1.0 + t * t).sqrt();
                }
                Lut {
                    frac_bits: f,
                    work_bits,
                    system,
                    angles: angles.into_boxed_slice(),
                    schedule: Box::new([]),
                    gain: to_raw(gain, work_bits),
                }
            }
            CoordSystem::Hyperbolic => {
                // atanh(2^0) diverges, so entries start at shift 1. The gain
                // is accumulated over the exact schedule (repeats included)
                // so compensation always matches the iteration count.
                let schedule = hyperbolic_schedule(f);
                let mut angles = Vec::with_capacity(f as usize);
                for k in 1..=f {
                    let t = (2f64).powi(-(k as i32));
                    angles.push(to_raw(t.atanh(), work_bits));
                }
                let mut gain = 1.0f64;
                for &k in &schedule {
                    let t = (2f64).powi(-(k as i32));
                    gain /= (1.0 - t * t).sqrt();
                }
                Lut {
                    frac_bits: f,
                    work_bits,
                    system,
                    angles: angles.into_boxed_slice(),
                    schedule: schedule.into_boxed_slice(),
                    gain: to_raw(gain, work_bits),
                }
            }
        }
    }

    /// Fetch the shared table for `(f, system)`, building it on first use.
    /// Concurrent first use may build twice; both builds are bit-identical
    /// and the first insertion wins.
    pub fn shared(f: u32, system: CoordSystem) -> Arc<Lut> {
        static CACHE: OnceLock<RwLock<HashMap<(u32, CoordSystem), Arc<Lut>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| RwLock::new(HashMap::new()));

        if let Some(hit) = cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&(f, system))
        {
            return Arc::clone(hit);
        }

        let built = Arc::new(Lut::build(f, system));
        let mut map = cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(map.entry((f, system)).or_insert(built))
    }

    /// Fractional bits of the configuration this table serves.
    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Scale of the raw angle/gain values (`frac_bits + GUARD_BITS`).
    pub fn work_bits(&self) -> u32 {
        self.work_bits
    }

    /// Raw angle for a table slot (0-based; hyperbolic shift `k` lives in
    /// slot `k - 1`).
    pub fn angle(&self, slot: usize) -> i128 {
        self.angles[slot]
    }

    pub fn angles(&self) -> &[i128] {
        &self.angles
    }

    /// Hyperbolic shift sequence including mandatory repeats. Empty for
    /// circular mode, where the sequence is simply `0..f`.
    pub fn schedule(&self) -> &[u32] {
        &self.schedule
    }

    /// Raw reciprocal of the converged magnitude-growth product.
    pub fn gain(&self) -> i128 {
        self.gain
    }
}
