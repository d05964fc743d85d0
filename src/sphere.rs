//! Sphere primitive.
//!
//! Implements ray-sphere intersection using an optimized quadratic formula.

use glam::Vec3A;

use crate::object::{Hit, Material, Object};

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,
    /// Radius of the sphere (always non-negative).
    pub radius: f32,
    /// Material properties determining light interaction.
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Object for Sphere {
    fn intersect(&self, origin: Vec3A, direction: Vec3A) -> f32 {
        // Vector from ray origin to sphere center
        let oc = self.center - origin;

        // Optimized quadratic equation coefficients
        let a = direction.length_squared();
        let h = direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return -1.0;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest positive root, falling back to the far one when the
        // origin is inside the sphere
        let near = (h - sqrtd) / a;
        if near > 0.0 {
            return near;
        }
        let far = (h + sqrtd) / a;
        if far > 0.0 {
            return far;
        }
        -1.0
    }

    fn at(&self, point: Vec3A) -> Hit {
        let surface_normal = (point - self.center) / self.radius;
        Hit {
            color: self.material.color,
            surface_normal,
            mapped_normal: self.material.mapped_normal(surface_normal, point),
            albedo: self.material.albedo,
            opacity: self.material.opacity,
            refraction: self.material.refraction,
        }
    }
}
