//! Lumen math - vectors, rays and intervals shared by the tracer.
//!
//! Everything here is double precision. The tracer relies on `f64` so that
//! points computed on a sphere stay within 1e-9 of its surface.

pub use glam::DVec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// Three-component vector used for points, directions and colors.
pub type Vec3 = DVec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Scale `v` to unit length.
///
/// A zero vector yields NaN components. Callers never pass one: every ray
/// direction in the tracer is nonzero by construction.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}
