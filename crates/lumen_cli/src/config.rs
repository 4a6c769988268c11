//! Render configuration loaded from JSON.
//!
//! Every field has a default, so an empty object `{}` describes the demo
//! render. Command-line flags are applied on top of the loaded values.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumen_tracer::{Camera, Color, Material, RenderSettings, Scene, Vec3};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Image size must be at least 1x1, got {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("Aspect ratio must be positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Vertical field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFov(f64),

    #[error("Look direction {0:?} is zero or parallel to the world up axis")]
    DegenerateDirection([f64; 3]),

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Sphere {index} uses unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Material '{name}' has non-positive refraction index {value}")]
    InvalidRefractionIndex { name: String, value: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub image: ImageConfig,
    /// When absent, the chosen scene's own camera is used
    pub camera: Option<CameraConfig>,
    pub render: RenderOptions,
    /// When absent, a built-in scene is rendered
    pub scene: Option<SceneDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub width: u32,
    /// Width over height; ignored when `height` is set
    pub aspect_ratio: f64,
    pub height: Option<u32>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            aspect_ratio: 16.0 / 9.0,
            height: None,
        }
    }
}

impl ImageConfig {
    pub fn height(&self) -> u32 {
        self.height
            .unwrap_or_else(|| (self.width as f64 / self.aspect_ratio) as u32)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub eye: [f64; 3],
    pub direction: [f64; 3],
    pub vertical_fov_degrees: f64,
}

impl Default for CameraConfig {
    /// Looks at the demo scene centered on (0, 0, 5).
    fn default() -> Self {
        Self {
            eye: [-2.0, 3.0, 0.0],
            direction: [2.0, -3.0, 5.0],
            vertical_fov_degrees: 90.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        let fov = self.vertical_fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFov(fov));
        }

        let direction = Vec3::from_array(self.direction);
        if direction.length_squared() == 0.0 || Vec3::Y.cross(direction).length_squared() == 0.0 {
            return Err(ConfigError::DegenerateDirection(self.direction));
        }

        Ok(())
    }

    pub fn build(&self, width: u32, height: u32) -> Camera {
        Camera::look_along(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.direction),
            self.vertical_fov_degrees.to_radians(),
            width,
            height,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Fixed seed for a reproducible image; random when absent
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            seed: None,
        }
    }
}

impl RenderOptions {
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
        }
    }
}

/// Material entry of a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDescription {
    Lambertian { albedo: [f64; 3] },
    Metal { albedo: [f64; 3], fuzz: f64 },
    Dielectric { refraction_index: f64 },
}

impl MaterialDescription {
    pub fn build(&self) -> Material {
        match *self {
            MaterialDescription::Lambertian { albedo } => {
                Material::lambertian(Color::from_array(albedo))
            }
            MaterialDescription::Metal { albedo, fuzz } => {
                Material::metal(Color::from_array(albedo), fuzz)
            }
            MaterialDescription::Dielectric { refraction_index } => {
                Material::dielectric(refraction_index)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDescription {
    pub center: [f64; 3],
    pub radius: f64,
    /// Key into `SceneDescription::materials`
    pub material: String,
}

/// Named materials plus the spheres that reference them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneDescription {
    pub materials: BTreeMap<String, MaterialDescription>,
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, material) in &self.materials {
            if let MaterialDescription::Dielectric { refraction_index } = *material {
                if refraction_index <= 0.0 {
                    return Err(ConfigError::InvalidRefractionIndex {
                        name: name.clone(),
                        value: refraction_index,
                    });
                }
            }
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if sphere.radius <= 0.0 {
                return Err(ConfigError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            if !self.materials.contains_key(&sphere.material) {
                return Err(ConfigError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
        }

        Ok(())
    }

    /// Build the scene. Each named material is created once and shared by
    /// every sphere that uses it.
    pub fn build(&self) -> ConfigResult<Scene> {
        self.validate()?;

        let materials: BTreeMap<&str, Arc<Material>> = self
            .materials
            .iter()
            .map(|(name, description)| (name.as_str(), Arc::new(description.build())))
            .collect();

        let unused = materials
            .keys()
            .filter(|name| !self.spheres.iter().any(|s| s.material == **name))
            .count();
        if unused > 0 {
            log::warn!("{} material(s) defined but not used by any sphere", unused);
        }

        let mut scene = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                ConfigError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            scene.add_sphere(Vec3::from_array(sphere.center), sphere.radius, material.clone());
        }

        Ok(scene)
    }
}

impl RenderConfig {
    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Check the image, render and camera parameters before rendering starts.
    ///
    /// The scene description is checked when it is built, since a `--scene`
    /// flag may replace it.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.image.aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.image.aspect_ratio));
        }

        let (width, height) = (self.image.width, self.image.height());
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidImageSize { width, height });
        }

        if self.render.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }

        if let Some(camera) = &self.camera {
            camera.validate()?;
        }

        Ok(())
    }
}
