//! MistRay whitted-style ray tracer
//!
//! Computes the color seen along a ray by recursively following reflection
//! and refraction paths, attenuated by the hit material's albedo and
//! opacity, composited with direct lighting and distance fog.
//! Outputs PNG and EXR formats with optional TEV viewer integration.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod light;
pub mod object;
pub mod plane;
pub mod random;
pub mod ray;
pub mod scene;
pub mod sphere;
pub mod vecmath;
