//! Conversion between heightmap images and terrain heightfields.
//!
//! Import turns a square [`PixelGrid`] into a [`Heightfield`], either copying
//! pixels 1:1 or bilinearly fitting the image onto the target grid. Export
//! writes a heightfield back out as a grayscale image.

use bevy::prelude::*;

use crate::error::{Result, TerrainHelperError};
use crate::heightfield::Heightfield;
use crate::pixels::{PixelGrid, grayscale};
use crate::resolution::HeightmapResolution;
use crate::store::HeightfieldStore;

/// How an image whose size differs from the target heightmap is imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Bilinearly resample the image onto the target's current grid.
    #[default]
    FitToTarget,
    /// Resize the target grid to the image resolution and copy pixels 1:1.
    ResizeTargetToMatch,
}

/// Imports heightmap images into heightfields.
///
/// # Example
///
/// ```ignore
/// use bevy_terrain_helper::{HeightmapImporter, HeightmapResolution, ImportMode, TerrainData};
///
/// let mut terrain = TerrainData::new(HeightmapResolution::R129);
/// let image = bevy_terrain_helper::io::load_image("heightmap.png")?;
/// HeightmapImporter::new()
///     .with_mode(ImportMode::ResizeTargetToMatch)
///     .with_intensity(0.5)
///     .import_into(&image, &mut terrain)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HeightmapImporter {
    mode: ImportMode,
    intensity: f32,
}

impl Default for HeightmapImporter {
    fn default() -> Self {
        Self {
            mode: ImportMode::default(),
            intensity: 1.0,
        }
    }
}

impl HeightmapImporter {
    /// Creates an importer in [`ImportMode::FitToTarget`] with intensity `1.0`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ImportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the multiplier applied to every imported height, clamped to `[0, 1]`.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity.clamp(0.0, 1.0);
        self
    }

    pub fn mode(&self) -> ImportMode {
        self.mode
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Checks that `image` can be imported in the current mode.
    ///
    /// An empty image is rejected as resolution `0` in every mode.
    pub fn validate(&self, image: &PixelGrid) -> Result<()> {
        if !image.is_square() {
            return Err(TerrainHelperError::NotSquare {
                width: image.width(),
                height: image.height(),
            });
        }
        if image.width() == 0 {
            return Err(TerrainHelperError::UnsupportedResolution(0));
        }
        if self.mode == ImportMode::ResizeTargetToMatch {
            HeightmapResolution::try_from(image.width())?;
        }
        Ok(())
    }

    /// Converts `image` into a heightfield for a target whose current
    /// resolution is `target_resolution`.
    ///
    /// The result has the image's resolution when pixels are copied 1:1
    /// (resize mode, or matching sizes) and `target_resolution` when the image
    /// is fitted. Sample `[x, y]` takes pixel `(x, y)`.
    pub fn resample(&self, image: &PixelGrid, target_resolution: u32) -> Result<Heightfield> {
        self.validate(image)?;

        let size = image.width();
        if self.mode == ImportMode::ResizeTargetToMatch || size == target_resolution {
            debug!("copying {size}x{size} heightmap image 1:1");
            let res = size as usize;
            return Ok(Heightfield::from_fn(res, res, |x, y| {
                grayscale(image.get(x as u32, y as u32)) * self.intensity
            }));
        }

        debug!("fitting {size}x{size} heightmap image onto {target_resolution}x{target_resolution} grid");
        let res = target_resolution as usize;
        let step = 1.0 / res.saturating_sub(1).max(1) as f32;
        Ok(Heightfield::from_fn(res, res, |x, y| {
            let pixel = image.sample_bilinear(x as f32 * step, y as f32 * step);
            grayscale(pixel) * self.intensity
        }))
    }

    /// Imports `image` into `store`.
    ///
    /// Validation happens before anything is written. If the imported
    /// heightfield has a different resolution, the store is resized and its
    /// physical size restored before the heights are set.
    pub fn import_into(&self, image: &PixelGrid, store: &mut impl HeightfieldStore) -> Result<()> {
        let heights = self.resample(image, store.heightmap_resolution())?;

        let res = heights.resolution() as u32;
        if store.heightmap_resolution() != res {
            let resolution = HeightmapResolution::try_from(res)?;
            debug!(
                "resizing heightmap from {} to {res}",
                store.heightmap_resolution()
            );
            store.resize_preserving_size(resolution);
        }
        store.set_heights(0, 0, &heights);

        info!(
            "imported {}x{} heightmap ({:?}, intensity {})",
            image.width(),
            image.height(),
            self.mode,
            self.intensity
        );
        Ok(())
    }
}

/// Encodes a heightfield as a grayscale image of the same resolution.
///
/// Pixel `(x, y)` gets `R = G = B = heights[x, y]` and full alpha. Values are
/// passed through unclamped; the file encoder clamps to its storage range.
pub fn export_heightmap(heights: &Heightfield) -> PixelGrid {
    let width = heights.rows() as u32;
    let height = heights.cols() as u32;
    let mut image = PixelGrid::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let h = heights.get(x as usize, y as usize);
            image.set(x, y, [h, h, h, 1.0]);
        }
    }
    image
}
