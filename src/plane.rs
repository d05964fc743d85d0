//! Infinite plane primitive with an optional checkerboard pattern.

use glam::Vec3A;

use crate::object::{Hit, Material, Object};

/// Infinite plane defined by a point, a unit normal, and a material.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Any point lying on the plane.
    pub point: Vec3A,
    /// Unit normal of the plane.
    pub normal: Vec3A,
    /// Material properties determining light interaction.
    pub material: Material,
    /// Alternate color for checkerboard squares, if any.
    pub checker: Option<Vec3A>,
}

impl Plane {
    /// Create a new single-colored plane.
    pub fn new(point: Vec3A, normal: Vec3A, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
            checker: None,
        }
    }

    /// Create a plane with a unit-sized checkerboard pattern alternating
    /// between the material color and `checker`.
    pub fn checkered(point: Vec3A, normal: Vec3A, material: Material, checker: Vec3A) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
            checker: Some(checker),
        }
    }

    fn color_at(&self, point: Vec3A) -> Vec3A {
        match self.checker {
            Some(alternate) => {
                let parity = point.x.floor() as i64 + point.z.floor() as i64;
                if parity.rem_euclid(2) == 0 {
                    self.material.color
                } else {
                    alternate
                }
            }
            None => self.material.color,
        }
    }
}

impl Object for Plane {
    fn intersect(&self, origin: Vec3A, direction: Vec3A) -> f32 {
        let denom = direction.dot(self.normal);
        // Parallel rays never hit
        if denom.abs() < 1e-6 {
            return -1.0;
        }
        let d = (self.point - origin).dot(self.normal) / denom;
        if d > 0.0 {
            d
        } else {
            -1.0
        }
    }

    fn at(&self, point: Vec3A) -> Hit {
        Hit {
            color: self.color_at(point),
            surface_normal: self.normal,
            mapped_normal: self.material.mapped_normal(self.normal, point),
            albedo: self.material.albedo,
            opacity: self.material.opacity,
            refraction: self.material.refraction,
        }
    }
}
