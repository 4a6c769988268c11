//! Hittable trait and hit records for ray-object intersection.

use crate::Material;
use lumen_math::{Interval, Ray, Vec3};

/// Geometric result of a single ray-primitive test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl SurfaceHit {
    /// Build a hit whose normal is oriented against the incoming ray.
    ///
    /// `outward_normal` is the geometric normal and must be unit length.
    pub fn with_face_normal(ray: &Ray, t: f64, p: Vec3, outward_normal: Vec3) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            front_face,
        }
    }
}

/// Record of a ray-scene intersection.
///
/// Lives only as long as the scene query that produced it; the material is
/// borrowed from the scene, never owned.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Attach a material to a geometric hit.
    pub fn new(hit: SurfaceHit, material: &'a Material) -> Self {
        Self {
            p: hit.p,
            normal: hit.normal,
            t: hit.t,
            front_face: hit.front_face,
            material,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Test if a ray hits this object strictly inside `ray_t`.
    ///
    /// Returns the nearest such hit, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<SurfaceHit>;
}
