//! Ray-object intersection interface.
//!
//! Defines the `Object` trait for geometric primitives and the `Hit` record
//! queried at an intersection point for shading.

use glam::Vec3A;

/// Surface information at an intersection point.
///
/// Produced fresh per query by [`Object::at`]; never stored by the scene.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Surface base color at the point.
    pub color: Vec3A,
    /// Geometric unit normal at the surface.
    pub surface_normal: Vec3A,
    /// Possibly bump-perturbed normal used for reflection, refraction and
    /// lighting direction.
    pub mapped_normal: Vec3A,
    /// Specular reflectivity in [0, 1]; 0 disables the reflection branch.
    pub albedo: f32,
    /// Fraction of light stopped by the surface in [0, 1]; 1 disables the
    /// refraction branch.
    pub opacity: f32,
    /// Index of refraction ratio used when the refraction branch runs.
    pub refraction: f32,
}

/// Shading parameters shared by all primitives.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    /// Surface base color.
    pub color: Vec3A,
    /// Specular reflectivity in [0, 1].
    pub albedo: f32,
    /// Opacity in [0, 1]; values below 1 make the surface transmissive.
    pub opacity: f32,
    /// Index of refraction ratio for transmissive surfaces.
    pub refraction: f32,
    /// Bump-map ripple amplitude; 0 leaves the mapped normal untouched.
    pub bump: f32,
}

impl Material {
    /// Opaque matte material with the given color.
    pub fn matte(color: Vec3A) -> Self {
        Self {
            color,
            albedo: 0.0,
            opacity: 1.0,
            refraction: 1.0,
            bump: 0.0,
        }
    }

    /// Opaque reflective material.
    pub fn mirror(color: Vec3A, albedo: f32) -> Self {
        Self {
            color,
            albedo,
            opacity: 1.0,
            refraction: 1.0,
            bump: 0.0,
        }
    }

    /// Transmissive material with the given opacity and refraction index.
    pub fn glass(color: Vec3A, opacity: f32, refraction: f32) -> Self {
        Self {
            color,
            albedo: 0.1,
            opacity,
            refraction,
            bump: 0.0,
        }
    }

    /// Perturb the surface normal with a sinusoidal ripple.
    ///
    /// Returns the surface normal unchanged when the bump amplitude is 0.
    pub fn mapped_normal(&self, surface_normal: Vec3A, point: Vec3A) -> Vec3A {
        if self.bump == 0.0 {
            return surface_normal;
        }
        let ripple = Vec3A::new(
            (point.y * 8.0).sin(),
            (point.z * 8.0).sin(),
            (point.x * 8.0).sin(),
        );
        (surface_normal + self.bump * ripple).normalize()
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (`Sync + Send`) so a scene can be evaluated across
/// parallel ray workers.
pub trait Object: Sync + Send {
    /// Distance along the ray to the nearest intersection.
    ///
    /// Returns a non-positive value (conventionally -1.0) when the ray
    /// misses the object.
    fn intersect(&self, origin: Vec3A, direction: Vec3A) -> f32;

    /// Surface hit record at a point previously returned by [`intersect`].
    ///
    /// Only geometrically consistent at or near an actual intersection
    /// point.
    ///
    /// [`intersect`]: Object::intersect
    fn at(&self, point: Vec3A) -> Hit;
}
