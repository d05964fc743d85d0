//! Random number generation for scene construction.
//!
//! Thread-local ChaCha20 PRNG helpers used by the demo scene generator.
//! The tracing core itself is deterministic and never draws random numbers.

use glam::Vec3A;
use rand::{rng, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;

thread_local! {
    /// Thread-local ChaCha20 PRNG for quality random numbers.
    static RNG: RefCell<ChaCha20Rng> = RefCell::new(ChaCha20Rng::from_rng(&mut rng()));
}

/// Generate a random f32 in [0.0, 1.0).
pub fn random_f32() -> f32 {
    RNG.with(|rng| rng.borrow_mut().random())
}

/// Generate a random f32 in [min, max).
pub fn random_f32_range(min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32()
}

/// Generate a random RGB color with components in [0.0, 1.0).
pub fn random_color() -> Vec3A {
    Vec3A::new(random_f32(), random_f32(), random_f32())
}

/// Generate a random RGB color with components in [min, max).
pub fn random_color_range(min: f32, max: f32) -> Vec3A {
    Vec3A::new(
        random_f32_range(min, max),
        random_f32_range(min, max),
        random_f32_range(min, max),
    )
}
