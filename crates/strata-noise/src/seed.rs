//! Deterministic seed mixing and lattice hashing.
//!
//! All noise fields are stateless: a sample is a pure function of
//! (seed, coordinate). Parents in the pipeline mix a child's index into the
//! seed before sampling it, so sibling octaves and layers decorrelate even
//! when configured identically. The finalizer is SplitMix64, chosen because
//! it is called once per lattice corner and must be both cheap and
//! well-distributed.

/// Mixes a salt (typically a child index) into a seed.
#[inline]
pub fn mix(seed: u64, salt: u64) -> u64 {
    split_mix(seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Hashes a seeded integer lattice point into a u64.
#[inline]
pub fn hash_lattice(seed: u64, x: i64, y: i64, z: i64) -> u64 {
    let mut h = seed;
    h = split_mix(h ^ (x as u64).wrapping_mul(0x8538_0D09_D09F_BA75));
    h = split_mix(h ^ (y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
    h = split_mix(h ^ (z as u64).wrapping_mul(0x1656_67B1_9E37_79F9));
    h
}

/// Maps a hash to a uniform value in `[-1, 1)`.
#[inline]
pub fn unit_value(hash: u64) -> f64 {
    // Top 53 bits give a uniform double in [0, 1).
    let unit = (hash >> 11) as f64 * (1.0 / (1u64 << 53) as f64);
    unit * 2.0 - 1.0
}

#[inline]
fn split_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
