use clap::Parser;
use glam::Vec3A;
use log::info;
use std::sync::Arc;

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use mistray::camera::Camera;
use mistray::light::{DirectionalLight, Light, PointLight};
use mistray::object::{Material, Object};
use mistray::plane::Plane;
use mistray::random;
use mistray::scene::{Scene, View};
use mistray::sphere::Sphere;
use output::{save_image_as_exr, save_image_as_png, send_image_to_tev};

/// Create the demo scene: a checkered ground plane, three feature spheres,
/// and a scatter of small randomized spheres under two lights.
fn create_scene(fog_distance: f32) -> Scene {
    let mut objects: Vec<Arc<dyn Object>> = Vec::new();

    // Checkered ground plane
    objects.push(Arc::new(Plane::checkered(
        Vec3A::ZERO,
        Vec3A::new(0.0, 1.0, 0.0),
        Material::matte(Vec3A::new(0.85, 0.85, 0.85)),
        Vec3A::new(0.25, 0.3, 0.35),
    )));

    // Three large feature spheres: mirror, glass, and rippled matte
    objects.push(Arc::new(Sphere::new(
        Vec3A::new(-2.5, 1.0, 0.0),
        1.0,
        Material::mirror(Vec3A::new(0.9, 0.9, 0.95), 0.8),
    )));
    objects.push(Arc::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        Material::glass(Vec3A::new(0.95, 0.95, 1.0), 0.15, 1.5),
    )));
    let mut rippled = Material::matte(Vec3A::new(0.8, 0.3, 0.25));
    rippled.bump = 0.15;
    objects.push(Arc::new(Sphere::new(Vec3A::new(2.5, 1.0, 0.0), 1.0, rippled)));

    // Scatter of small randomized spheres
    for a in -5..5 {
        for b in -5..2 {
            let center = Vec3A::new(
                a as f32 * 1.6 + 0.8 * random::random_f32(),
                0.3,
                b as f32 * 1.6 + 0.8 * random::random_f32(),
            );

            // Keep clear of the large feature spheres
            if (center - Vec3A::new(0.0, 1.0, 0.0)).length() < 1.6
                || (center - Vec3A::new(-2.5, 1.0, 0.0)).length() < 1.6
                || (center - Vec3A::new(2.5, 1.0, 0.0)).length() < 1.6
            {
                continue;
            }

            let choose_mat = random::random_f32();
            let material = if choose_mat < 0.7 {
                Material::matte(random::random_color() * random::random_color())
            } else if choose_mat < 0.9 {
                Material::mirror(
                    random::random_color_range(0.5, 1.0),
                    random::random_f32_range(0.3, 0.9),
                )
            } else {
                Material::glass(
                    random::random_color_range(0.8, 1.0),
                    random::random_f32_range(0.05, 0.3),
                    1.5,
                )
            };
            objects.push(Arc::new(Sphere::new(center, 0.3, material)));
        }
    }

    let lights: Vec<Arc<dyn Light>> = vec![
        Arc::new(DirectionalLight::new(
            Vec3A::new(-0.4, -1.0, -0.3),
            Vec3A::new(0.9, 0.85, 0.7),
        )),
        Arc::new(PointLight::new(
            Vec3A::new(4.0, 6.0, 5.0),
            Vec3A::new(0.4, 0.45, 0.6),
        )),
    ];

    Scene::new(
        View {
            width: 100.0,
            height: 70.0,
        },
        objects,
        lights,
        Vec3A::new(0.08, 0.09, 0.12),
        fog_distance,
    )
}

/// Create the camera for the demo scene shot.
fn create_camera(width: u32, height: u32, max_depth: i32) -> Camera {
    let mut camera = Camera::new();
    camera.image_width = width;
    camera.image_height = height;
    camera.max_depth = max_depth;
    camera.lookfrom = Vec3A::new(0.0, 2.5, 9.0);
    camera.lookat = Vec3A::new(0.0, 1.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera
}

fn main() {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    let scene = create_scene(args.fog_distance);
    let camera = create_camera(args.width, args.height, args.depth);

    info!(
        "Rendering {}x{} with up to {} bounces, fog distance {}",
        args.width, args.height, args.depth, args.fog_distance
    );
    let image = camera.render(&scene);

    // Send image to TEV if requested
    let should_send_to_tev = args.tev || args.tev_address.is_some();
    if should_send_to_tev {
        let tev_address = args.tev_address.as_deref().unwrap_or("localhost:14158");
        send_image_to_tev(&image, tev_address, args.width, args.height);
    }

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output, args.width, args.height);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output, args.width, args.height);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
