//! Camera for ray generation and scene rendering

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use crate::ray::Ray;
use crate::scene::Scene;

/// Pinhole camera generating one primary ray per pixel.
///
/// The projection plane takes its physical dimensions from the scene's
/// stored [`View`](crate::scene::View), placed one plane-width in front of
/// the camera. Rendering walks every pixel in parallel; the scene itself is
/// read-only during tracing, so no synchronization is needed.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count.
    pub image_width: u32,
    /// Rendered image height in pixel count.
    pub image_height: u32,
    /// Maximum number of ray bounces (recursion depth limit).
    pub max_depth: i32,
    /// Point camera is looking from (camera position).
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target).
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector.
    pub vup: Vec3A,
}

impl Camera {
    /// Create a camera with default settings.
    ///
    /// Default: 100x100 image, 8 bounces, looking down the -Z axis.
    pub fn new() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            max_depth: 8,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
        }
    }

    /// Orthonormal camera frame: right, up, and backward basis vectors.
    fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        let w = (self.lookfrom - self.lookat).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);
        (u, v, w)
    }

    /// Generate the primary ray through the center of pixel `(i, j)`.
    fn get_ray(&self, scene: &Scene, u: Vec3A, v: Vec3A, w: Vec3A, i: u32, j: u32) -> Ray {
        let view = scene.view();
        // Pixel center in [-0.5, 0.5] screen coordinates, y flipped so
        // j grows downward.
        let sx = ((i as f32 + 0.5) / self.image_width as f32 - 0.5) * view.width;
        let sy = (0.5 - (j as f32 + 0.5) / self.image_height as f32) * view.height;
        let direction = (u * sx + v * sy - w * view.width).normalize();
        Ray::new(self.lookfrom, direction)
    }

    /// Render the scene to an HDR image buffer with linear f32 RGB values.
    ///
    /// Traces one ray per pixel through [`Scene::cast`] with full retained
    /// energy, in parallel across all CPU cores.
    pub fn render(&self, scene: &Scene) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Generating image using {} CPU cores...",
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.image_width * self.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        let (u, v, w) = self.basis();

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let r = self.get_ray(scene, u, v, w, i, j);
            let color = scene.cast(r.origin, r.direction, self.max_depth, 1.0);
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
