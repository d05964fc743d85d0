//! Recursive whitted-style scene tracing.
//!
//! A [`Scene`] owns the object and light lists plus the ambient color and
//! fog distance, and exposes the recursive [`Scene::cast`] algorithm with
//! its [`Scene::lighting`] and shadow-test helpers. A scene is immutable
//! after construction, so it can be shared freely across parallel ray
//! workers.

use std::sync::Arc;

use glam::Vec3A;

use crate::light::Light;
use crate::object::Object;
use crate::vecmath;

/// Bias applied along the surface normal so secondary rays do not
/// immediately re-intersect the surface they started from.
const SURFACE_BIAS: f32 = 0.001;

/// Recursion budgets below this fraction of a pixel are not worth tracing.
const MIN_RETAINED_ENERGY: f32 = 0.01;

/// Hard cap on the recursion depth a caller may request.
const MAX_DEPTH: i32 = 64;

/// Output projection dimensions, stored on behalf of the render driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Projection plane width.
    pub width: f32,
    /// Projection plane height.
    pub height: f32,
}

/// Immutable scene description plus the recursive ray tracing core.
pub struct Scene {
    view: View,
    objects: Vec<Arc<dyn Object>>,
    lights: Vec<Arc<dyn Light>>,
    ambient: Vec3A,
    fog_distance: f32,
}

impl Default for Scene {
    /// Empty scene with a 100x70 view, zero ambient and fog distance 1000.
    fn default() -> Self {
        Self {
            view: View {
                width: 100.0,
                height: 70.0,
            },
            objects: Vec::new(),
            lights: Vec::new(),
            ambient: Vec3A::ZERO,
            fog_distance: 1000.0,
        }
    }
}

impl Scene {
    /// Create a scene from explicit parts.
    ///
    /// The ambient color is clamped component-wise to at most 1; values
    /// below 0 are left to the caller's input domain.
    pub fn new(
        view: View,
        objects: Vec<Arc<dyn Object>>,
        lights: Vec<Arc<dyn Light>>,
        ambient: Vec3A,
        fog_distance: f32,
    ) -> Self {
        Self {
            view,
            objects,
            lights,
            ambient: ambient.min(Vec3A::ONE),
            fog_distance,
        }
    }

    /// The stored output projection.
    pub fn view(&self) -> View {
        self.view
    }

    /// The clamped ambient color.
    pub fn ambient(&self) -> Vec3A {
        self.ambient
    }

    /// Distance at which fog fully saturates to the ambient color.
    pub fn fog_distance(&self) -> f32 {
        self.fog_distance
    }

    /// Compute the color seen along a ray.
    ///
    /// Recursively follows reflection and refraction branches, weighting
    /// them by the hit material's albedo and opacity, composites direct
    /// lighting at each hit, and blends toward the ambient color with
    /// distance fog. Recursion stops once `depth` runs out or the ray's
    /// remaining contribution (`retained`) drops below 1%; both bounds are
    /// required for the visible output. Every returned channel lies in
    /// [0, 1].
    pub fn cast(&self, origin: Vec3A, direction: Vec3A, depth: i32, retained: f32) -> Vec3A {
        // Non-positive depth terminates too, guarding pathological inputs.
        let depth = depth.min(MAX_DEPTH);
        if depth <= 0 || retained < MIN_RETAINED_ENERGY {
            return self.ambient;
        }
        let depth = depth - 1;

        // Direct lighting along the ray, sharpened by the fixed exponent.
        let mut c = vecmath::powv(self.lighting(origin, direction), 40.0);

        // Closest hit by linear scan; strict < keeps the first of a tie.
        let mut closest_distance = -1.0_f32;
        let mut closest_object: Option<&dyn Object> = None;
        for object in &self.objects {
            let d = object.intersect(origin, direction);
            if d > 0.0 && (d < closest_distance || closest_distance < 0.0) {
                closest_distance = d;
                closest_object = Some(object.as_ref());
            }
        }

        if let Some(object) = closest_object {
            let point = direction * closest_distance + origin;
            let hit = object.at(point);
            let hover = hit.surface_normal * SURFACE_BIAS + point;
            let mut light_color = self.lighting(hover, hit.mapped_normal);

            if hit.albedo > 0.0 {
                let reflected = vecmath::reflect(direction, hit.mapped_normal);
                let albedo = (hit.albedo
                    + hit.albedo * vecmath::fresnel(direction, reflected))
                .min(1.0);
                let reflection = self.cast(hover, reflected, depth, retained * albedo);
                light_color =
                    (reflection * albedo + light_color * (1.0 - albedo)).min(Vec3A::ONE);
            }

            if hit.opacity < 1.0 {
                // Bias into the surface when entering, out of it when
                // exiting.
                let sink = if direction.dot(hit.surface_normal) < 0.0 {
                    -hit.surface_normal * SURFACE_BIAS + point
                } else {
                    hit.surface_normal * SURFACE_BIAS + point
                };
                let refracted =
                    vecmath::refract(direction, hit.mapped_normal, hit.refraction);
                let refraction =
                    self.cast(sink, refracted, depth, retained * (1.0 - hit.opacity));
                light_color = (light_color * hit.opacity
                    + refraction * (1.0 - hit.opacity))
                .min(Vec3A::ONE);
            }

            c += hit.color * light_color;

            // fog
            let fog = (closest_distance / self.fog_distance).min(1.0);
            c = c * (1.0 - fog) + self.ambient * fog;
        } else {
            c += self.ambient;
        }

        c.min(Vec3A::ONE)
    }

    /// Direct illumination at `origin` for a ray or normal `direction`.
    ///
    /// Accumulates each unoccluded light's color scaled by the cosine
    /// between `direction` and the light direction, starting from the
    /// ambient color, clamped to 1. The cosine deliberately uses the
    /// passed direction rather than a surface normal.
    pub fn lighting(&self, origin: Vec3A, direction: Vec3A) -> Vec3A {
        let mut c = self.ambient;
        for light in &self.lights {
            let light_dir = light.direction_to(origin);
            let light_distance = light.distance_to(origin);
            if !self.simple_cast(origin, light_dir, light_distance) {
                let m = direction.dot(light_dir).max(0.0);
                c += light.color() * m;
            }
        }
        c.min(Vec3A::ONE)
    }

    /// Occlusion test toward a light.
    ///
    /// Returns true as soon as any object intersects the ray closer than
    /// `max_distance`; a negative `max_distance` means unbounded.
    pub fn simple_cast(&self, origin: Vec3A, direction: Vec3A, max_distance: f32) -> bool {
        for object in &self.objects {
            let d = object.intersect(origin, direction);
            if d > 0.0 && (max_distance < 0.0 || d < max_distance) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::light::PointLight;
    use crate::object::{Hit, Material};
    use crate::sphere::Sphere;

    /// Object that reports a fixed distance for rays starting at the world
    /// origin and a miss everywhere else, so secondary rays never re-hit
    /// it. Counts trait calls for recursion assertions.
    struct FixedObject {
        distance: f32,
        hit: Hit,
        intersect_calls: AtomicUsize,
        at_calls: AtomicUsize,
    }

    impl FixedObject {
        fn new(distance: f32, color: Vec3A, albedo: f32, opacity: f32) -> Self {
            Self {
                distance,
                hit: Hit {
                    color,
                    surface_normal: Vec3A::new(0.0, 0.0, -1.0),
                    mapped_normal: Vec3A::new(0.0, 0.0, -1.0),
                    albedo,
                    opacity,
                    refraction: 1.5,
                },
                intersect_calls: AtomicUsize::new(0),
                at_calls: AtomicUsize::new(0),
            }
        }
    }

    impl Object for FixedObject {
        fn intersect(&self, origin: Vec3A, _direction: Vec3A) -> f32 {
            self.intersect_calls.fetch_add(1, Ordering::SeqCst);
            if origin == Vec3A::ZERO {
                self.distance
            } else {
                -1.0
            }
        }

        fn at(&self, _point: Vec3A) -> Hit {
            self.at_calls.fetch_add(1, Ordering::SeqCst);
            self.hit
        }
    }

    /// Light with a fixed direction, range and color.
    struct FixedLight {
        direction: Vec3A,
        distance: f32,
        color: Vec3A,
    }

    impl Light for FixedLight {
        fn direction_to(&self, _point: Vec3A) -> Vec3A {
            self.direction
        }

        fn distance_to(&self, _point: Vec3A) -> f32 {
            self.distance
        }

        fn color(&self) -> Vec3A {
            self.color
        }
    }

    fn toward_camera_light(color: Vec3A) -> Arc<dyn Light> {
        Arc::new(FixedLight {
            direction: Vec3A::new(0.0, 0.0, -1.0),
            distance: -1.0,
            color,
        })
    }

    #[test]
    fn default_scene_matches_documented_configuration() {
        let scene = Scene::default();
        assert_eq!(
            scene.view(),
            View {
                width: 100.0,
                height: 70.0
            }
        );
        assert_eq!(scene.ambient(), Vec3A::ZERO);
        assert_eq!(scene.fog_distance(), 1000.0);
        assert!(!scene.simple_cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), -1.0));
    }

    #[test]
    fn ambient_is_clamped_to_one_at_construction() {
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            Vec::new(),
            Vec::new(),
            Vec3A::new(2.0, 0.5, 3.0),
            100.0,
        );
        assert_eq!(scene.ambient(), Vec3A::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn cast_at_depth_zero_returns_ambient() {
        let ambient = Vec3A::new(0.2, 0.3, 0.4);
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![Arc::new(FixedObject::new(2.0, Vec3A::ONE, 0.0, 1.0)) as Arc<dyn Object>],
            vec![toward_camera_light(Vec3A::ONE)],
            ambient,
            1000.0,
        );
        let c = scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 0, 1.0);
        assert_eq!(c, ambient);
    }

    #[test]
    fn cast_with_negligible_energy_returns_ambient() {
        let ambient = Vec3A::new(0.2, 0.3, 0.4);
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![Arc::new(FixedObject::new(2.0, Vec3A::ONE, 0.0, 1.0)) as Arc<dyn Object>],
            vec![toward_camera_light(Vec3A::ONE)],
            ambient,
            1000.0,
        );
        let c = scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 5, 0.005);
        assert_eq!(c, ambient);
    }

    #[test]
    fn negative_depth_terminates_immediately() {
        let ambient = Vec3A::new(0.1, 0.1, 0.1);
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            Vec::new(),
            Vec::new(),
            ambient,
            1000.0,
        );
        assert_eq!(scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), -5, 1.0), ambient);
    }

    #[test]
    fn empty_scene_cast_is_sharpened_lighting_plus_ambient() {
        let ambient = Vec3A::new(0.05, 0.05, 0.05);
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            Vec::new(),
            vec![toward_camera_light(Vec3A::ONE)],
            ambient,
            1000.0,
        );
        let origin = Vec3A::ZERO;
        let direction = Vec3A::new(0.0, 0.0, -1.0);
        let expected =
            (vecmath::powv(scene.lighting(origin, direction), 40.0) + ambient).min(Vec3A::ONE);
        assert_eq!(scene.cast(origin, direction, 4, 1.0), expected);
    }

    #[test]
    fn empty_scene_simple_cast_never_occludes() {
        let scene = Scene::default();
        assert!(!scene.simple_cast(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 1.0, 0.0), 5.0));
    }

    #[test]
    fn closest_hit_record_wins() {
        // Farther object listed first so list order cannot mask selection.
        let far = Arc::new(FixedObject::new(5.0, Vec3A::new(0.0, 1.0, 0.0), 0.0, 1.0));
        let near = Arc::new(FixedObject::new(2.0, Vec3A::new(1.0, 0.0, 0.0), 0.0, 1.0));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![far.clone() as Arc<dyn Object>, near.clone() as Arc<dyn Object>],
            vec![toward_camera_light(Vec3A::ONE)],
            Vec3A::ZERO,
            1000.0,
        );
        let c = scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 4, 1.0);
        // Near object is pure red; only fog attenuates it.
        assert!(c.x > 0.9);
        assert_eq!(c.y, 0.0);
        assert_eq!(c.z, 0.0);
        assert_eq!(near.at_calls.load(Ordering::SeqCst), 1);
        assert_eq!(far.at_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn occluded_light_contributes_nothing() {
        let ambient = Vec3A::new(0.1, 0.1, 0.1);
        let blocker = Arc::new(Sphere::new(
            Vec3A::new(0.0, 5.0, 0.0),
            1.0,
            Material::matte(Vec3A::ONE),
        ));
        let light = Arc::new(PointLight::new(Vec3A::new(0.0, 10.0, 0.0), Vec3A::ONE));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![blocker as Arc<dyn Object>],
            vec![light as Arc<dyn Light>],
            ambient,
            1000.0,
        );
        let c = scene.lighting(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(c, ambient);
    }

    #[test]
    fn fog_saturates_to_ambient_beyond_fog_distance() {
        let ambient = Vec3A::new(0.2, 0.1, 0.3);
        let object = Arc::new(FixedObject::new(50.0, Vec3A::ONE, 0.0, 1.0));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![object as Arc<dyn Object>],
            vec![toward_camera_light(Vec3A::ONE)],
            ambient,
            10.0,
        );
        let c = scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 4, 1.0);
        assert_eq!(c, ambient);
    }

    #[test]
    fn returned_channels_stay_in_unit_range() {
        let object = Arc::new(FixedObject::new(1.0, Vec3A::new(1.0, 1.0, 1.0), 0.5, 1.0));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![object as Arc<dyn Object>],
            vec![
                toward_camera_light(Vec3A::new(3.0, 4.0, 5.0)),
                toward_camera_light(Vec3A::new(2.0, 2.0, 2.0)),
            ],
            Vec3A::new(0.9, 0.9, 0.9),
            1000.0,
        );
        for direction in [
            Vec3A::new(0.0, 0.0, 1.0),
            Vec3A::new(0.0, 0.0, -1.0),
            Vec3A::new(0.0, 1.0, 0.0).normalize(),
        ] {
            let c = scene.cast(Vec3A::ZERO, direction, 6, 1.0);
            for channel in [c.x, c.y, c.z] {
                assert!((0.0..=1.0).contains(&channel), "channel {channel} out of range");
            }
            let l = scene.lighting(Vec3A::ZERO, direction);
            for channel in [l.x, l.y, l.z] {
                assert!((0.0..=1.0).contains(&channel), "channel {channel} out of range");
            }
        }
    }

    #[test]
    fn opaque_matte_hit_traces_no_secondary_rays() {
        // No lights, so every intersect call comes from a cast scan. An
        // opaque non-reflective hit must scan exactly once.
        let object = Arc::new(FixedObject::new(2.0, Vec3A::new(0.5, 0.5, 0.5), 0.0, 1.0));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![object.clone() as Arc<dyn Object>],
            Vec::new(),
            Vec3A::ZERO,
            1000.0,
        );
        scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 6, 1.0);
        assert_eq!(object.intersect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(object.at_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transparent_hit_traces_a_refraction_ray() {
        let object = Arc::new(FixedObject::new(2.0, Vec3A::new(0.5, 0.5, 0.5), 0.0, 0.5));
        let scene = Scene::new(
            View {
                width: 10.0,
                height: 10.0,
            },
            vec![object.clone() as Arc<dyn Object>],
            Vec::new(),
            Vec3A::ZERO,
            1000.0,
        );
        scene.cast(Vec3A::ZERO, Vec3A::new(0.0, 0.0, 1.0), 6, 1.0);
        // Primary scan plus at least the refraction branch's scan.
        assert!(object.intersect_calls.load(Ordering::SeqCst) >= 2);
    }
}
