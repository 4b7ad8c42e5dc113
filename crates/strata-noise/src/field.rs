//! The raw noise fields an octave can sample.
//!
//! All fields are stateless functions of (seed, lattice offset, point), so
//! octaves stay pure value objects with no baked tables. Gradient selection
//! hashes the seeded lattice corner instead of indexing a shuffled
//! permutation table; the output distribution is the same.

use glam::DVec3;

use crate::seed::{hash_lattice, unit_value};

/// The 16 classic Perlin gradient vectors (edge midpoints of a cube).
const GRADIENT: [[f64; 3]; 16] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, -1.0],
];

/// Quintic fade curve, zero first and second derivative at the endpoints.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Decomposes one coordinate into its seeded lattice cell and fraction.
#[inline]
fn cell(v: f64, offset: i64) -> (i64, f64) {
    let floor = v.floor();
    (floor as i64 + offset, v - floor)
}

/// 3D gradient (Perlin) noise over the seeded integer lattice.
///
/// Output is roughly in `[-1, 1]`.
pub(crate) fn perlin(seed: u64, offset: (i64, i64, i64), p: DVec3) -> f64 {
    let (x0, fx) = cell(p.x, offset.0);
    let (y0, fy) = cell(p.y, offset.1);
    let (z0, fz) = cell(p.z, offset.2);

    let corner = |cx: i64, cy: i64, cz: i64| -> f64 {
        let g = GRADIENT[(hash_lattice(seed, x0 + cx, y0 + cy, z0 + cz) & 15) as usize];
        g[0] * (fx - cx as f64) + g[1] * (fy - cy as f64) + g[2] * (fz - cz as f64)
    };

    let u = fade(fx);
    let v = fade(fy);
    let w = fade(fz);

    lerp(
        lerp(
            lerp(corner(0, 0, 0), corner(1, 0, 0), u),
            lerp(corner(0, 1, 0), corner(1, 1, 0), u),
            v,
        ),
        lerp(
            lerp(corner(0, 0, 1), corner(1, 0, 1), u),
            lerp(corner(0, 1, 1), corner(1, 1, 1), u),
            v,
        ),
        w,
    )
}

/// 3D value noise: hashed lattice values with a plain trilinear blend.
///
/// Cheaper and visibly blockier than [`perlin`] because the corner values
/// carry no gradients and the blend is unfaded.
pub(crate) fn gray(seed: u64, offset: (i64, i64, i64), p: DVec3) -> f64 {
    let (x0, fx) = cell(p.x, offset.0);
    let (y0, fy) = cell(p.y, offset.1);
    let (z0, fz) = cell(p.z, offset.2);

    let corner = |cx: i64, cy: i64, cz: i64| -> f64 {
        unit_value(hash_lattice(seed, x0 + cx, y0 + cy, z0 + cz))
    };

    lerp(
        lerp(
            lerp(corner(0, 0, 0), corner(1, 0, 0), fx),
            lerp(corner(0, 1, 0), corner(1, 1, 0), fx),
            fy,
        ),
        lerp(
            lerp(corner(0, 0, 1), corner(1, 0, 1), fx),
            lerp(corner(0, 1, 1), corner(1, 1, 1), fx),
            fy,
        ),
        fz,
    )
}

/// Hard checkerboard: `+1` on even lattice cells, `-1` on odd ones.
///
/// Ignores the fractional part entirely; used as a mixing/masking signal.
pub(crate) fn chess(offset: (i64, i64, i64), p: DVec3) -> f64 {
    let sum = (p.x.floor() as i64 + offset.0)
        .wrapping_add(p.y.floor() as i64 + offset.1)
        .wrapping_add(p.z.floor() as i64 + offset.2);
    if sum.rem_euclid(2) == 0 { 1.0 } else { -1.0 }
}

/// Sinusoid with a period of one scale unit, via libm for cross-platform
/// bit-exactness.
#[inline]
pub(crate) fn sine(s: f64) -> f64 {
    libm::sin(std::f64::consts::TAU * s)
}
