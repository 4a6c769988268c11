//! Materials describing how light scatters off a surface.

use crate::hittable::HitRecord;
use crate::sampling::{random_f64, random_in_unit_sphere};
use lumen_math::{unit_vector, Color, Ray, Vec3};
use rand::RngCore;

/// Result of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered light that survives
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
}

/// Surface material. The set of kinds is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian {
        albedo: Color,
    },
    /// Mirror-like surface. `fuzz` is in [0, 1]; 0 is a perfect mirror.
    Metal {
        albedo: Color,
        fuzz: f64,
    },
    /// Transparent surface that refracts (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric {
        refraction_index: f64,
    },
}

impl Material {
    /// Create a diffuse material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a metal. Fuzz is clamped into [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a dielectric with the given index of refraction.
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Lambertian { albedo } => Some(scatter_lambertian(albedo, rec, rng)),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, ray_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Some(scatter_dielectric(refraction_index, ray_in, rec, rng))
            }
        }
    }
}

fn scatter_lambertian(albedo: Color, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> ScatterResult {
    let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

    // Catch degenerate scatter direction
    if scatter_direction.length_squared() < 1e-8 {
        scatter_direction = rec.normal;
    }

    ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.p, unit_vector(scatter_direction)),
    }
}

/// A fuzzed reflection that ends up below the surface is absorbed.
fn scatter_metal(
    albedo: Color,
    fuzz: f64,
    ray_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut dyn RngCore,
) -> Option<ScatterResult> {
    let reflected = unit_vector(reflect(ray_in.direction(), rec.normal));
    let direction = unit_vector(reflected + fuzz * random_in_unit_sphere(rng));

    if direction.dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(rec.p, direction),
    })
}

fn scatter_dielectric(
    refraction_index: f64,
    ray_in: &Ray,
    rec: &HitRecord<'_>,
    rng: &mut dyn RngCore,
) -> ScatterResult {
    let ratio = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = unit_vector(ray_in.direction());
    let cos_alpha = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_alpha = (1.0 - cos_alpha * cos_alpha).sqrt();

    let cannot_refract = ratio * sin_alpha >= 1.0;

    let direction = if cannot_refract || reflectance(cos_alpha, ratio) > random_f64(rng) {
        unit_vector(reflect(unit_direction, rec.normal))
    } else {
        refract(unit_direction, rec.normal, cos_alpha, ratio)
    };

    ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Schlick's approximation for reflectance.
pub fn reflectance(cosine: f64, ratio: f64) -> f64 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with Snell's law.
///
/// `cos_alpha` is `-dot(uv, n)`.
#[inline]
fn refract(uv: Vec3, n: Vec3, cos_alpha: f64, ratio: f64) -> Vec3 {
    let perpendicular = ratio * (uv + cos_alpha * n);
    let parallel = -(1.0 - perpendicular.length_squared()).abs().sqrt() * n;
    perpendicular + parallel
}
