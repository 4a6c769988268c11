//! Lumen command-line renderer.
//!
//! Loads a configuration, builds the scene and camera, renders with a single
//! seeded generator and writes the image.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use lumen_tracer::{render_with_progress, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod config;
mod logger;
mod output;
mod progress;
mod scenes;

use cli::Args;
use config::{CameraConfig, RenderConfig};
use logger::init_logger;
use output::save_image;
use progress::ProgressLog;
use scenes::BuiltinScene;

/// Percentage step between progress log lines.
const PROGRESS_STEP_PERCENT: u32 = 5;

/// Pick the scene and the camera that frames it.
///
/// A `--scene` flag beats a scene in the config file, which beats the demo.
/// An explicit camera in the config file always wins.
fn resolve_scene(
    args: &Args,
    config: &RenderConfig,
    rng: &mut StdRng,
) -> Result<(Scene, CameraConfig)> {
    let (scene, default_camera) = match (args.scene, &config.scene) {
        (Some(builtin), file_scene) => {
            if file_scene.is_some() {
                warn!("--scene {:?} overrides the scene in the config file", builtin);
            }
            (builtin.build(rng), builtin.camera())
        }
        (None, Some(description)) => (
            description.build().context("failed to build scene from config")?,
            CameraConfig::default(),
        ),
        (None, None) => (BuiltinScene::Demo.build(rng), BuiltinScene::Demo.camera()),
    };

    let camera = config.camera.clone().unwrap_or(default_camera);
    camera.validate()?;
    Ok((scene, camera))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    let mut rng = match config.render.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (scene, camera_config) = resolve_scene(&args, &config, &mut rng)?;
    let width = config.image.width;
    let height = config.image.height();
    let camera = camera_config.build(width, height);
    let settings = config.render.settings();

    info!("Scene has {} objects", scene.len());
    info!(
        "Camera at {:?} looking along {:?}, {} degree field of view",
        camera_config.eye, camera_config.direction, camera_config.vertical_fov_degrees
    );
    info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width, height, settings.samples_per_pixel, settings.max_depth
    );

    let start = Instant::now();
    let mut progress = ProgressLog::new(PROGRESS_STEP_PERCENT);
    let image = render_with_progress(&camera, &scene, &settings, &mut rng, |done, total| {
        progress.on_row(done, total);
    });
    info!("Rendered in {:?}", start.elapsed());

    save_image(&image, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_renders_demo() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(0);

        let (scene, camera) = resolve_scene(&args, &config, &mut rng).unwrap();
        assert_eq!(scene.len(), 4);
        assert_eq!(camera, BuiltinScene::Demo.camera());
    }

    #[test]
    fn test_scene_flag_beats_config_scene() {
        let args = Args::try_parse_from(["lumen", "--scene", "demo"]).unwrap();
        let config = RenderConfig::from_json(
            r#"{ "scene": {
                "materials": { "m": { "type": "lambertian", "albedo": [1, 1, 1] } },
                "spheres": [ { "center": [0, 0, 3], "radius": 1, "material": "m" } ]
            } }"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let (scene, _) = resolve_scene(&args, &config, &mut rng).unwrap();
        assert_eq!(scene.len(), 4);

        let args = Args::try_parse_from(["lumen"]).unwrap();
        let (scene, camera) = resolve_scene(&args, &config, &mut rng).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(camera, CameraConfig::default());
    }

    #[test]
    fn test_broken_file_scene_is_ignored_under_scene_flag() {
        let config = RenderConfig::from_json(
            r#"{ "scene": {
                "materials": {},
                "spheres": [ { "center": [0, 0, 3], "radius": 1, "material": "gold" } ]
            } }"#,
        )
        .unwrap();
        config.validate().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let args = Args::try_parse_from(["lumen", "--scene", "demo"]).unwrap();
        let (scene, _) = resolve_scene(&args, &config, &mut rng).unwrap();
        assert_eq!(scene.len(), 4);

        let args = Args::try_parse_from(["lumen"]).unwrap();
        let err = resolve_scene(&args, &config, &mut rng).err().unwrap();
        assert!(err.to_string().contains("failed to build scene"));
    }

    #[test]
    fn test_config_camera_wins() {
        let args = Args::try_parse_from(["lumen", "--scene", "cover"]).unwrap();
        let config = RenderConfig::from_json(
            r#"{ "camera": { "eye": [0, 1, -5], "direction": [0, 0, 1], "vertical_fov_degrees": 45 } }"#,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let (_, camera) = resolve_scene(&args, &config, &mut rng).unwrap();
        assert_eq!(camera.eye, [0.0, 1.0, -5.0]);
        assert_eq!(camera.vertical_fov_degrees, 45.0);
    }

    #[test]
    fn test_small_end_to_end_render() {
        let config = RenderConfig::from_json(
            r#"{ "image": { "width": 16, "height": 9 }, "render": { "samples_per_pixel": 2, "max_depth": 4 } }"#,
        )
        .unwrap();
        config.validate().unwrap();

        let args = Args::try_parse_from(["lumen"]).unwrap();
        let mut rng = StdRng::seed_from_u64(123);
        let (scene, camera_config) = resolve_scene(&args, &config, &mut rng).unwrap();
        let camera = camera_config.build(config.image.width, config.image.height());

        let image =
            render_with_progress(&camera, &scene, &config.render.settings(), &mut rng, |_, _| {});
        assert_eq!((image.width, image.height), (16, 9));
        assert!(image.pixels.iter().all(|c| c.is_finite()));
        assert!(image.pixels.iter().any(|c| c.length() > 0.0));
    }
}
