//! Random number generation utilities for target sampling.

pub use rand_xoshiro::Xoshiro256StarStar;

/// Generate a random float in the range [low, high).
#[inline]
pub fn random_uniform(rng: &mut Xoshiro256StarStar, low: f32, high: f32) -> f32 {
    use rand::Rng;
    rng.gen::<f32>() * (high - low) + low
}

/// Generate a random float from an inclusive-exclusive (low, high) pair,
/// the shape the sampling-range constants are declared in.
#[inline]
pub fn random_in(rng: &mut Xoshiro256StarStar, range: (f32, f32)) -> f32 {
    random_uniform(rng, range.0, range.1)
}
