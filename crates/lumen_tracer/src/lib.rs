//! Lumen tracer - CPU path tracing over spheres.
//!
//! A Monte Carlo path tracer: the camera produces a ray, the scene resolves
//! the nearest hit, the material scatters it and the integrator recurses
//! until the ray escapes to the sky or its depth runs out.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, SurfaceHit};
pub use material::{reflect, reflectance, Material, ScatterResult};
pub use renderer::{
    background, ray_color, render, render_pixel, render_with_progress, ImageBuffer,
    RenderSettings, T_MIN,
};
pub use sampling::{random_f64, random_in_unit_sphere, random_range};
pub use scene::{Scene, SceneObject};
pub use sphere::Sphere;

/// Re-export the math types from lumen_math
pub use lumen_math::{unit_vector, Color, Interval, Ray, Vec3};
