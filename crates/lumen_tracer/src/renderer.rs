//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by a maximum depth
//! - Anti-aliasing via jittered multi-sampling
//! - A white to sky-blue background gradient

use crate::{Camera, Color, Scene};
use lumen_math::{unit_vector, Interval, Ray};
use rand::RngCore;

/// Lower ray bound for secondary rays; keeps a scattered ray from hitting
/// the surface it starts on.
pub const T_MIN: f64 = 0.001;

const WHITE: Color = Color::ONE;
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Render settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 50,
            max_depth: 50,
        }
    }
}

/// Compute the color seen along a ray.
///
/// Each bounce multiplies the material attenuation into the light gathered
/// further down the path. A path that runs out of depth contributes black.
pub fn ray_color(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return background(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, scene, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical gradient from white (looking down) to sky blue (looking up).
pub fn background(ray: &Ray) -> Color {
    let a = 0.5 * (unit_vector(ray.direction()).y + 1.0);
    (1.0 - a) * WHITE + a * SKY_BLUE
}

/// Average `samples_per_pixel` jittered paths through one pixel.
///
/// `row` counts viewport rows from the bottom.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    row: u32,
    col: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = settings.samples_per_pixel.max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let ray = camera.get_ray_through_pixel(row, col, rng);
        pixel_color += ray_color(&ray, scene, settings.max_depth, rng);
    }

    pixel_color / samples as f64
}

/// Linear colors in row-major order, top image row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y); y = 0 is the top row.
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y); y = 0 is the top row.
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Iterate rows from the top.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the entire scene to an image buffer.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    render_with_progress(camera, scene, settings, rng, |_, _| {})
}

/// Render the scene, calling `on_row(rows_done, total_rows)` after each row.
///
/// Rows are produced top first. Rendering is sequential: one generator
/// drives every sample, so a seeded generator reproduces the image.
pub fn render_with_progress<F>(
    camera: &Camera,
    scene: &Scene,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
    mut on_row: F,
) -> ImageBuffer
where
    F: FnMut(u32, u32),
{
    let width = camera.width();
    let height = camera.height();
    let mut image = ImageBuffer::new(width, height);

    log::debug!(
        "Rendering {}x{} @ {} spp, max depth {}, {} objects",
        width,
        height,
        settings.samples_per_pixel,
        settings.max_depth,
        scene.len()
    );

    for y in 0..height {
        // Image row 0 is the top, which is the last viewport row
        let row = height - 1 - y;
        for x in 0..width {
            let color = render_pixel(camera, scene, row, x, settings, rng);
            image.set(x, y, color);
        }
        log::trace!("Row {} of {} done", y + 1, height);
        on_row(y + 1, height);
    }

    image
}
