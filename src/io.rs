//! Image file loading and PNG writing.
//!
//! Files store their top row first while [`PixelGrid`] keeps the bottom row at
//! `y = 0`, so rows are flipped in both directions.

use std::path::Path;

use bevy::log::debug;
use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

use crate::error::Result;
use crate::pixels::{PixelGrid, unorm8, unorm16};

/// Loads any image the enabled codecs understand (PNG, and JPEG with the
/// `jpeg` feature) into a [`PixelGrid`].
pub fn load_image(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let path = path.as_ref();
    let decoded = image::open(path)?;
    debug!(
        "loaded {}x{} image from {}",
        decoded.width(),
        decoded.height(),
        path.display()
    );
    Ok(from_dynamic_image(&decoded))
}

/// Converts a decoded image into a bottom-up [`PixelGrid`].
pub fn from_dynamic_image(decoded: &DynamicImage) -> PixelGrid {
    let rgba = decoded.to_rgba32f();
    let (width, height) = rgba.dimensions();
    let mut grid = PixelGrid::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        grid.set(x, height - 1 - y, pixel.0);
    }
    grid
}

/// Writes `image` as an 8-bit RGB PNG; alpha is dropped.
pub fn save_png(image: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, _] = image.get(x, height - 1 - y);
        Rgb([unorm8(r), unorm8(g), unorm8(b)])
    });
    write(DynamicImage::ImageRgb8(buffer), path.as_ref())
}

/// Writes `image` as a 16-bit RGB PNG, for heightmaps that need more than
/// 256 height levels.
pub fn save_png16(image: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let [r, g, b, _] = image.get(x, height - 1 - y);
        Rgb([unorm16(r), unorm16(g), unorm16(b)])
    });
    write(DynamicImage::ImageRgb16(buffer), path.as_ref())
}

/// Writes `image` as an 8-bit RGBA PNG, keeping all four channels.
pub fn save_png_rgba(image: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba(image.get(x, height - 1 - y).map(unorm8))
    });
    write(DynamicImage::ImageRgba8(buffer), path.as_ref())
}

fn write(image: DynamicImage, path: &Path) -> Result<()> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    debug!("wrote {}x{} PNG to {}", image.width(), image.height(), path.display());
    Ok(())
}
