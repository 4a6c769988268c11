//! Scene aggregate: primitives paired with shared materials.

use crate::hittable::{HitRecord, Hittable};
use crate::{Material, Sphere};
use lumen_math::{Interval, Ray, Vec3};
use std::sync::Arc;

/// A primitive together with the material active on its surface.
pub struct SceneObject {
    object: Box<dyn Hittable>,
    material: Arc<Material>,
}

impl SceneObject {
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

/// An insertion-ordered list of scene objects.
///
/// The scene owns its primitives. Materials are reference counted so one
/// material can sit on any number of primitives. Intersection is a linear
/// scan.
#[derive(Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object bound to `material`.
    pub fn add(&mut self, object: Box<dyn Hittable>, material: Arc<Material>) {
        self.objects.push(SceneObject { object, material });
    }

    /// Add a sphere bound to `material`.
    pub fn add_sphere(&mut self, center: Vec3, radius: f64, material: Arc<Material>) {
        self.add(Box::new(Sphere::new(center, radius)), material);
    }

    /// Clear all objects from the scene.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    /// Find the nearest hit strictly inside `ray_t`.
    ///
    /// The upper bound shrinks to the best `t` found so far, so every later
    /// object is tested against a tighter interval.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for entry in &self.objects {
            if let Some(hit) = entry.object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = hit.t;
                closest = Some(HitRecord::new(hit, &entry.material));
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn forward() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.hit(&Ray::new(Vec3::ZERO, Vec3::Z), forward()).is_none());
    }

    #[test]
    fn test_nearest_of_two_spheres() {
        let near = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.3)));
        let far = Arc::new(Material::metal(Color::ONE, 0.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Insertion order must not matter
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 0.5, far.clone());
        scene.add_sphere(Vec3::new(0.0, 0.0, 2.0), 0.5, near.clone());

        let rec = scene.hit(&ray, forward()).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!(std::ptr::eq(rec.material, near.as_ref()));

        let mut reversed = Scene::new();
        reversed.add_sphere(Vec3::new(0.0, 0.0, 2.0), 0.5, near.clone());
        reversed.add_sphere(Vec3::new(0.0, 0.0, 5.0), 0.5, far);

        let rec = reversed.hit(&ray, forward()).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!(std::ptr::eq(rec.material, near.as_ref()));
    }

    #[test]
    fn test_nothing_in_range() {
        let mut scene = Scene::new();
        scene.add_sphere(
            Vec3::new(0.0, 0.0, 5.0),
            0.5,
            Arc::new(Material::dielectric(1.5)),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(scene.hit(&ray, Interval::new(0.001, 4.0)).is_none());
        assert!(scene.hit(&Ray::new(Vec3::ZERO, -Vec3::Z), forward()).is_none());
    }

    #[test]
    fn test_materials_are_shared() {
        let glass = Arc::new(Material::dielectric(1.5));
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(-2.0, 0.0, 0.0), 1.0, glass.clone());
        scene.add_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0, glass.clone());

        assert_eq!(scene.len(), 2);
        assert_eq!(Arc::strong_count(&glass), 3);
        assert!(scene.objects().all(|o| Arc::ptr_eq(o.material(), &glass)));

        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(Arc::strong_count(&glass), 1);
    }
}
