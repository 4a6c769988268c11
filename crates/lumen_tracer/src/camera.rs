//! Camera for ray generation.

use crate::sampling::random_f64;
use lumen_math::{unit_vector, Ray, Vec3};
use rand::RngCore;

/// World up direction used to orient a general camera.
const WORLD_UP: Vec3 = Vec3::Y;

/// Viewport height in scene units. The focal length adapts to the field of view.
const VIEWPORT_HEIGHT: f64 = 2.0;

/// Pinhole camera mapping image pixels onto a virtual viewport.
///
/// The viewport is described by its lower-left corner and the two vectors
/// spanning it. Viewport row 0 sits on its bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    image_width: u32,
    image_height: u32,

    eye: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    focal_length: f64,
}

impl Camera {
    /// Eye at the origin looking down +Z, 2-unit-high viewport at distance 1.
    pub fn axis_aligned(image_width: u32, image_height: u32) -> Self {
        let aspect_ratio = image_width as f64 / image_height as f64;
        let viewport_width = VIEWPORT_HEIGHT * aspect_ratio;
        let focal_length = 1.0;

        let eye = Vec3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, VIEWPORT_HEIGHT, 0.0);
        let lower_left = eye + Vec3::new(0.0, 0.0, focal_length) - horizontal / 2.0 - vertical / 2.0;

        Self {
            image_width,
            image_height,
            eye,
            lower_left,
            horizontal,
            vertical,
            focal_length,
        }
    }

    /// Eye at `eye` looking along `direction` with the given vertical field
    /// of view in radians.
    ///
    /// `direction` must be nonzero and not parallel to +Y.
    pub fn look_along(
        eye: Vec3,
        direction: Vec3,
        vertical_fov: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let aspect_ratio = image_width as f64 / image_height as f64;
        let viewport_width = VIEWPORT_HEIGHT * aspect_ratio;
        let focal_length = VIEWPORT_HEIGHT / (2.0 * (vertical_fov / 2.0).tan());

        // Camera basis: w forward, u to the right, v up
        let w = unit_vector(direction);
        let u = unit_vector(WORLD_UP.cross(w));
        let v = w.cross(u);

        let horizontal = viewport_width * u;
        let vertical = VIEWPORT_HEIGHT * v;
        let lower_left = eye + focal_length * w - horizontal / 2.0 - vertical / 2.0;

        Self {
            image_width,
            image_height,
            eye,
            lower_left,
            horizontal,
            vertical,
            focal_length,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image_width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image_height
    }

    /// Origin shared by every primary ray.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Distance from the eye to the viewport plane.
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Ray from the eye through viewport fraction `(s, t)`, both in [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner, `(0.5, 0.5)` the center.
    pub fn ray_through_viewport(&self, s: f64, t: f64) -> Ray {
        let target = self.lower_left + s * self.horizontal + t * self.vertical;
        Ray::new(self.eye, target - self.eye)
    }

    /// Jittered ray through pixel (`row`, `col`).
    ///
    /// Every call draws a fresh offset in [0, 1), so averaging many calls
    /// antialiases the pixel.
    pub fn get_ray_through_pixel(&self, row: u32, col: u32, rng: &mut dyn RngCore) -> Ray {
        let s = (col as f64 + random_f64(rng)) / self.image_width as f64;
        let t = (row as f64 + random_f64(rng)) / self.image_height as f64;
        self.ray_through_viewport(s, t)
    }
}
