//! Built-in scenes.

use std::sync::Arc;

use clap::ValueEnum;
use lumen_tracer::{random_f64, random_range, Color, Material, Scene, Vec3};
use rand::RngCore;

use crate::config::CameraConfig;

/// Scenes that ship with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinScene {
    /// Four spheres around (0, 0, 5) on a large floor sphere
    Demo,
    /// Three feature spheres in a field of small random spheres
    Cover,
}

impl BuiltinScene {
    pub fn build(self, rng: &mut dyn RngCore) -> Scene {
        match self {
            BuiltinScene::Demo => demo_scene(),
            BuiltinScene::Cover => cover_scene(rng),
        }
    }

    /// Camera framing this scene.
    pub fn camera(self) -> CameraConfig {
        match self {
            BuiltinScene::Demo => CameraConfig::default(),
            BuiltinScene::Cover => CameraConfig {
                eye: [13.0, 2.0, 3.0],
                direction: [-13.0, -2.0, -3.0],
                vertical_fov_degrees: 20.0,
            },
        }
    }
}

pub const DEMO_CENTER: Vec3 = Vec3::new(0.0, 0.0, 5.0);

fn demo_scene() -> Scene {
    let orange = Arc::new(Material::lambertian(Color::new(0.8, 0.4, 0.0)));
    let green = Arc::new(Material::lambertian(Color::new(0.4, 0.8, 0.0)));
    let chrome = Arc::new(Material::metal(Color::new(0.8, 0.8, 0.8), 0.2));
    let glass = Arc::new(Material::dielectric(1.5));

    let big_radius = 100.0;
    let small_radius = 1.0;

    let mut scene = Scene::new();
    // Floor sphere, its top half a unit below the small spheres
    scene.add_sphere(
        DEMO_CENTER - Vec3::new(0.0, big_radius + small_radius + 0.5, 0.0),
        big_radius,
        orange,
    );
    scene.add_sphere(DEMO_CENTER, small_radius, green);
    scene.add_sphere(DEMO_CENTER + Vec3::new(2.0, 1.0, 0.0), small_radius, chrome);
    scene.add_sphere(DEMO_CENTER + Vec3::new(-2.5, 0.0, 0.0), small_radius, glass);
    scene
}

fn cover_scene(rng: &mut dyn RngCore) -> Scene {
    let mut scene = Scene::new();

    // Ground
    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
    );

    // One glass material shared by every glass sphere
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat = random_f64(rng);
            let material = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                glass.clone()
            };

            scene.add_sphere(center, 0.2, material);
        }
    }

    // Three main spheres
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);
    scene.add_sphere(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    );
    scene.add_sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    );

    scene
}

fn random_color(rng: &mut dyn RngCore, min: f64, max: f64) -> Color {
    Color::new(
        random_range(rng, min, max),
        random_range(rng, min, max),
        random_range(rng, min, max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_tracer::{Interval, Ray, T_MIN};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_scene_layout() {
        let scene = BuiltinScene::Demo.build(&mut StdRng::seed_from_u64(0));
        assert_eq!(scene.len(), 4);

        // Straight down from the green sphere's center reaches the floor top at y = -1.5
        let ray = Ray::new(DEMO_CENTER - Vec3::new(0.0, 1.2, 0.0), -Vec3::Y);
        let rec = scene.hit(&ray, Interval::new(T_MIN, f64::INFINITY)).unwrap();
        assert!((rec.p.y + 1.5).abs() < 1e-9);
        assert!(matches!(rec.material, Material::Lambertian { .. }));
    }

    #[test]
    fn test_demo_camera_sees_green_sphere() {
        let config = BuiltinScene::Demo.camera();
        config.validate().unwrap();

        let camera = config.build(400, 225);
        let scene = BuiltinScene::Demo.build(&mut StdRng::seed_from_u64(0));
        let rec = scene
            .hit(&camera.ray_through_viewport(0.5, 0.5), Interval::new(T_MIN, f64::INFINITY))
            .unwrap();
        assert_eq!(*rec.material, Material::lambertian(Color::new(0.4, 0.8, 0.0)));
    }

    #[test]
    fn test_cover_scene_is_seeded() {
        let a = BuiltinScene::Cover.build(&mut StdRng::seed_from_u64(21));
        let b = BuiltinScene::Cover.build(&mut StdRng::seed_from_u64(21));

        assert_eq!(a.len(), b.len());
        assert!(a.len() > 4);
        for (x, y) in a.objects().zip(b.objects()) {
            assert_eq!(x.material().as_ref(), y.material().as_ref());
        }
        BuiltinScene::Cover.camera().validate().unwrap();
    }
}
