//! Light sources for direct illumination.
//!
//! Lights are queried per shading point for a direction, a distance (used to
//! bound the shadow ray), and a color. A negative distance means the light is
//! unbounded, as with directional lights.

use glam::Vec3A;

/// Trait for light sources.
///
/// Must be thread-safe (`Sync + Send`) so a scene can be evaluated across
/// parallel ray workers.
pub trait Light: Sync + Send {
    /// Unit direction from `point` toward the light.
    fn direction_to(&self, point: Vec3A) -> Vec3A;

    /// Distance from `point` to the light.
    ///
    /// A negative value signals an unbounded light range; shadow rays are
    /// then tested against every occluder regardless of distance.
    fn distance_to(&self, point: Vec3A) -> f32;

    /// Emitted color of the light.
    fn color(&self) -> Vec3A;
}

/// Point light radiating from a fixed position.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    /// World-space position of the light.
    pub position: Vec3A,
    /// Emitted color.
    pub color: Vec3A,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3A, color: Vec3A) -> Self {
        Self { position, color }
    }
}

impl Light for PointLight {
    fn direction_to(&self, point: Vec3A) -> Vec3A {
        (self.position - point).normalize()
    }

    fn distance_to(&self, point: Vec3A) -> f32 {
        (self.position - point).length()
    }

    fn color(&self) -> Vec3A {
        self.color
    }
}

/// Directional light infinitely far away, like the sun.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Direction the light travels in (normalized at construction).
    pub direction: Vec3A,
    /// Emitted color.
    pub color: Vec3A,
}

impl DirectionalLight {
    /// Create a new directional light travelling along `direction`.
    pub fn new(direction: Vec3A, color: Vec3A) -> Self {
        Self {
            direction: direction.normalize(),
            color,
        }
    }
}

impl Light for DirectionalLight {
    fn direction_to(&self, _point: Vec3A) -> Vec3A {
        -self.direction
    }

    fn distance_to(&self, _point: Vec3A) -> f32 {
        -1.0
    }

    fn color(&self) -> Vec3A {
        self.color
    }
}
