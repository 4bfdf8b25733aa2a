//! Image writers: plain-text PPM and PNG.
//!
//! Both apply gamma 2 and quantize to 8 bits per channel.

use crate::{Color, ImageBuffer};
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use prism_math::Interval;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Apply gamma correction (gamma = 2.0). Non-positive and NaN inputs give 0.
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Displayable intensity range before quantization.
const INTENSITY: Interval = Interval::new(0.0, 1.0);

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * INTENSITY.clamp(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * INTENSITY.clamp(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * INTENSITY.clamp(linear_to_gamma(color.z))) as u8;
    [r, g, b]
}

/// Something that can encode an [`ImageBuffer`].
pub trait ImageWriter {
    /// Encode `image` into `out`.
    fn write(&self, image: &ImageBuffer, out: &mut dyn Write) -> OutputResult<()>;

    /// Encode `image` into a newly created file at `path`.
    fn write_file(&self, image: &ImageBuffer, path: &Path) -> OutputResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write(image, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// ASCII `P3` portable pixmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PpmWriter;

impl ImageWriter for PpmWriter {
    fn write(&self, image: &ImageBuffer, out: &mut dyn Write) -> OutputResult<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", image.width, image.height)?;
        writeln!(out, "255")?;

        for row in 0..image.height {
            let line = image
                .row(row)
                .iter()
                .map(|&color| {
                    let [r, g, b] = color_to_rgb(color);
                    format!("{r} {g} {b}")
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "{line}")?;
        }

        Ok(())
    }
}

/// 8-bit RGB PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl ImageWriter for PngWriter {
    fn write(&self, image: &ImageBuffer, out: &mut dyn Write) -> OutputResult<()> {
        let bytes: Vec<u8> = image.pixels.iter().flat_map(|&c| color_to_rgb(c)).collect();

        PngEncoder::new(out).write_image(&bytes, image.width, image.height, ColorType::Rgb8)?;
        Ok(())
    }
}

/// Pick a writer from the file extension of `path` (`ppm` or `png`).
pub fn writer_for_path(path: &Path) -> OutputResult<Box<dyn ImageWriter>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("ppm") => Ok(Box::new(PpmWriter)),
        Some("png") => Ok(Box::new(PngWriter)),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
}
