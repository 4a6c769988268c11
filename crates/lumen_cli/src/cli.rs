use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::RenderConfig;
use crate::scenes::BuiltinScene;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A recursive Monte Carlo path tracer for spheres")]
pub struct Args {
    /// JSON render configuration; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file path (.ppm for plain text, .png/.jpg via the image encoder)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (defaults to width / aspect ratio)
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render a built-in scene instead of the config file's scene
    #[arg(long, value_enum)]
    pub scene: Option<BuiltinScene>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image.width = width;
        }
        if let Some(height) = self.height {
            config.image.height = Some(height);
        }
        if let Some(samples) = self.samples {
            config.render.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.render.max_depth = max_depth;
        }
        if self.seed.is_some() {
            config.render.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert!(args.config.is_none());
        assert!(args.scene.is_none());
        assert!(matches!(args.log_level, LogLevel::Info));

        let mut config = RenderConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "lumen", "--width", "200", "--samples", "4", "--max-depth", "8", "--seed", "5",
            "--scene", "cover", "-o", "out.png",
        ])
        .unwrap();

        let mut config = RenderConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.image.width, 200);
        assert_eq!(config.image.height(), 112);
        assert_eq!(config.render.samples_per_pixel, 4);
        assert_eq!(config.render.max_depth, 8);
        assert_eq!(config.render.seed, Some(5));
        assert_eq!(args.scene, Some(BuiltinScene::Cover));
        assert_eq!(args.output, PathBuf::from("out.png"));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(LogLevel::Trace), LevelFilter::Trace);
    }
}
