//! Image output.
//!
//! Converts linear colors to 8-bit sRGB-ish values (gamma 2) and writes
//! either a plain-text PPM or any format the `image` crate can encode.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{Rgb, RgbImage};
use lumen_tracer::{Color, ImageBuffer, Interval};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Each channel is gamma corrected and mapped onto 256 equal bins.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f64| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Write a plain PPM (P3), one pixel per line, top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Convert to an 8-bit RGB image for encoding.
pub fn to_rgb_image(image: &ImageBuffer) -> RgbImage {
    RgbImage::from_fn(image.width, image.height, |x, y| {
        Rgb(color_to_rgb8(image.get(x, y)))
    })
}

/// Save the image, picking the format from the file extension.
///
/// `.ppm` is written as plain text; everything else goes through `image`.
pub fn save_image(image: &ImageBuffer, path: &Path) -> OutputResult<()> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        let file = File::create(path)?;
        write_ppm(image, BufWriter::new(file))?;
    } else {
        to_rgb_image(image).save(path)?;
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
