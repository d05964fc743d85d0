//! Vector math helpers for reflection, refraction and fresnel weighting.
//!
//! Operates on `glam::Vec3A` used throughout the crate both as a 3D
//! direction/position and as an RGB color.

use glam::Vec3A;

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
///
/// `eta` is the ratio of refraction indices across the interface. Total
/// internal reflection is not special-cased; the parallel component is
/// clamped via `abs` the same way for all inputs.
pub fn refract(uv: Vec3A, n: Vec3A, eta: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Grazing-angle reflectivity boost in [0, 1].
///
/// Schlick-style falloff computed from the angle between the incident and
/// reflected directions: for a mirror reflection `dir · reflected`
/// equals `1 - 2cos²θ`, which recovers the incidence cosine without
/// needing the surface normal.
pub fn fresnel(dir: Vec3A, reflected: Vec3A) -> f32 {
    let cos_theta = ((1.0 - dir.dot(reflected)) * 0.5).max(0.0).sqrt();
    (1.0 - cos_theta).powi(5)
}

/// Raise each component to the given power.
pub fn powv(v: Vec3A, exponent: f32) -> Vec3A {
    Vec3A::new(
        v.x.powf(exponent),
        v.y.powf(exponent),
        v.z.powf(exponent),
    )
}
