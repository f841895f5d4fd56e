//! Splatmap (alpha map) packing and texture conversion.
//!
//! A terrain keeps one weight layer per ground texture. Layers are packed four
//! at a time into RGBA images: R = layer `4i`, G = `4i + 1`, B = `4i + 2`,
//! A = `4i + 3`. Channels without a layer stay at `0`.

use bevy::prelude::*;

use crate::error::{Result, TerrainHelperError};
use crate::heightfield::Heightfield;
use crate::pixels::PixelGrid;

/// Layers packed into one splat image.
pub const LAYERS_PER_SPLAT: usize = 4;

/// Packs alpha-map layers into RGBA splat images.
///
/// Layer sample `[row, col]` lands in pixel `(col, row)`. All layers must
/// share one resolution. An empty slice yields no images.
pub fn alphamaps_to_splat_images(layers: &[Heightfield]) -> Result<Vec<PixelGrid>> {
    let Some(first) = layers.first() else {
        return Ok(Vec::new());
    };
    let (rows, cols) = (first.rows(), first.cols());

    if let Some((layer, mismatched)) = layers
        .iter()
        .enumerate()
        .find(|(_, l)| l.rows() != rows || l.cols() != cols)
    {
        return Err(TerrainHelperError::MismatchedLayers {
            layer,
            rows: mismatched.rows(),
            cols: mismatched.cols(),
        });
    }

    let images = layers
        .chunks(LAYERS_PER_SPLAT)
        .map(|group| {
            let mut image = PixelGrid::new(cols as u32, rows as u32);
            for row in 0..rows {
                for col in 0..cols {
                    let mut pixel = [0.0; 4];
                    for (channel, layer) in group.iter().enumerate() {
                        pixel[channel] = layer.get(row, col);
                    }
                    image.set(col as u32, row as u32, pixel);
                }
            }
            image
        })
        .collect();

    Ok(images)
}

/// Converts a packed splat image into a Bevy [`Image`] (RGBA8Unorm).
///
/// The image uses `ClampToEdge` addressing since splatmaps span the terrain
/// exactly once.
///
/// # Example
///
/// ```ignore
/// use bevy_terrain_helper::{TerrainData, HeightfieldStore};
/// use bevy_terrain_helper::splat::{alphamaps_to_splat_images, splat_to_image};
///
/// let splats = alphamaps_to_splat_images(terrain.alphamap_layers())?;
/// let textures: Vec<Image> = splats.iter().map(splat_to_image).collect();
/// ```
pub fn splat_to_image(splat: &PixelGrid) -> Image {
    splat.to_bevy_image()
}
