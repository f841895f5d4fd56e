//! In-memory RGBA image with float channels.
//!
//! [`PixelGrid`] is the image side of heightmap import/export. Pixel `(x, y)`
//! uses texture-space orientation: `(0, 0)` is the bottom-left pixel and `y`
//! grows upwards. File codecs in [`crate::io`] flip rows on the way in and out.

use bevy::image::{ImageAddressMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Grayscale weight of an RGB sample (`0.299 R + 0.587 G + 0.114 B`).
pub fn grayscale(pixel: [f32; 4]) -> f32 {
    0.299 * pixel[0] + 0.587 * pixel[1] + 0.114 * pixel[2]
}

/// A `width × height` grid of RGBA samples, each channel in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl PixelGrid {
    /// Creates a transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0.0; 4])
    }

    /// Creates an image where every pixel is `pixel`.
    pub fn filled(width: u32, height: u32, pixel: [f32; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data laid out as `x + y * width`.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[f32; 4]>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Pixel data laid out as `x + y * width`.
    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: [f32; 4]) {
        let i = self.index(x, y);
        self.pixels[i] = pixel;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        x as usize + y as usize * self.width as usize
    }

    /// Bilinearly filtered pixel at normalized texture coordinates.
    ///
    /// Texel centres sit at `(i + 0.5) / size`; addressing is clamped, so
    /// `(0, 0)` and `(1, 1)` return the corner pixels exactly and nothing
    /// wraps around the edges.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> [f32; 4] {
        let (x0, x1, fx) = Self::texel_span(u, self.width);
        let (y0, y1, fy) = Self::texel_span(v, self.height);

        let p00 = self.get(x0, y0);
        let p10 = self.get(x1, y0);
        let p01 = self.get(x0, y1);
        let p11 = self.get(x1, y1);

        std::array::from_fn(|c| {
            let top = p00[c] * (1.0 - fx) + p10[c] * fx;
            let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
            top * (1.0 - fy) + bottom * fy
        })
    }

    /// Neighbouring texel indices and blend factor for one axis.
    fn texel_span(t: f32, size: u32) -> (u32, u32, f32) {
        let last = size.saturating_sub(1) as f32;
        let pos = (t * size as f32 - 0.5).clamp(0.0, last);
        let i0 = pos.floor();
        let i1 = (i0 + 1.0).min(last);
        (i0 as u32, i1 as u32, pos - i0)
    }

    /// Converts to a Bevy [`Image`] (RGBA8Unorm, clamp-to-edge sampling).
    ///
    /// Rows are written top-first, matching how Bevy uploads texture data.
    pub fn to_bevy_image(&self) -> Image {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                raw.extend(self.get(x, y).map(unorm8));
            }
        }

        let mut image = Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            raw,
            TextureFormat::Rgba8Unorm,
            default(),
        );

        image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
            address_mode_u: ImageAddressMode::ClampToEdge,
            address_mode_v: ImageAddressMode::ClampToEdge,
            ..default()
        });

        image
    }
}

/// Quantises a `[0, 1]` channel to 8 bits, clamping out-of-range values.
pub(crate) fn unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Quantises a `[0, 1]` channel to 16 bits, clamping out-of-range values.
pub(crate) fn unorm16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * 65535.0).round() as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_of_white_is_one() {
        assert!((grayscale([1.0, 1.0, 1.0, 1.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn corners_sample_exactly() {
        let mut img = PixelGrid::new(4, 4);
        img.set(0, 0, [0.2, 0.2, 0.2, 1.0]);
        img.set(3, 3, [0.9, 0.9, 0.9, 1.0]);
        assert_eq!(img.sample_bilinear(0.0, 0.0), [0.2, 0.2, 0.2, 1.0]);
        assert_eq!(img.sample_bilinear(1.0, 1.0), [0.9, 0.9, 0.9, 1.0]);
    }

    #[test]
    fn midpoint_between_two_texels_is_their_average() {
        let pixels = vec![[0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0]];
        let img = PixelGrid::from_pixels(2, 1, pixels).unwrap();
        let mid = img.sample_bilinear(0.5, 0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn quantisation_clamps() {
        assert_eq!(unorm8(1.5), 255);
        assert_eq!(unorm8(-0.1), 0);
        assert_eq!(unorm16(0.5), 32768);
    }
}
