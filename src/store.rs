//! The terrain store the resampler and bake commands read from and write to.
//!
//! [`HeightfieldStore`] is the boundary to whatever owns the live terrain
//! (an editor, a scene, a file-backed asset). [`TerrainData`] is the in-memory
//! implementation used by tools and tests.

use bevy::prelude::*;

use crate::error::Result;
use crate::heightfield::Heightfield;
use crate::resolution::HeightmapResolution;

/// Physical size a store falls back to whenever its grid is resized.
pub const DEFAULT_TERRAIN_SIZE: Vec3 = Vec3::new(1000.0, 600.0, 1000.0);

/// Heightmap resolution of a freshly created [`TerrainData`].
pub const DEFAULT_HEIGHTMAP_RESOLUTION: HeightmapResolution = HeightmapResolution::R513;

/// Owner of a square terrain heightfield and its physical footprint.
pub trait HeightfieldStore {
    /// Samples along one edge of the heightmap.
    fn heightmap_resolution(&self) -> u32;

    /// Reads a `rows × cols` window starting at `(row, col)`.
    fn heights(&self, row: usize, col: usize, rows: usize, cols: usize) -> Heightfield;

    /// Writes `heights` with its first sample at `(row, col)`.
    fn set_heights(&mut self, row: usize, col: usize, heights: &Heightfield);

    /// Changes the grid resolution.
    ///
    /// This is destructive: samples outside the new bounds are lost and the
    /// physical size is reset to [`DEFAULT_TERRAIN_SIZE`]. Callers that need
    /// to keep the size must re-apply it, or use
    /// [`resize_preserving_size`](Self::resize_preserving_size).
    fn set_heightmap_resolution(&mut self, resolution: HeightmapResolution);

    /// World-space extent of the terrain (`x` width, `y` max height, `z` depth).
    fn size(&self) -> Vec3;

    fn set_size(&mut self, size: Vec3);

    /// Splat weight layers, one heightfield per ground texture.
    fn alphamap_layers(&self) -> &[Heightfield];

    /// World-space size of one heightmap cell; `y` is the full height range.
    fn heightmap_scale(&self) -> Vec3 {
        let size = self.size();
        let cells = self.heightmap_resolution().saturating_sub(1).max(1) as f32;
        Vec3::new(size.x / cells, size.y, size.z / cells)
    }

    /// Reads the whole heightmap.
    fn all_heights(&self) -> Heightfield {
        let res = self.heightmap_resolution() as usize;
        self.heights(0, 0, res, res)
    }

    /// Resizes the grid and restores the physical size the resize cleared.
    fn resize_preserving_size(&mut self, resolution: HeightmapResolution) {
        let size = self.size();
        self.set_heightmap_resolution(resolution);
        self.set_size(size);
    }
}

/// In-memory terrain: a square heightmap, a physical size and splat layers.
#[derive(Component, Debug, Clone)]
pub struct TerrainData {
    heights: Heightfield,
    size: Vec3,
    alphamaps: Vec<Heightfield>,
}

impl Default for TerrainData {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHTMAP_RESOLUTION)
    }
}

impl TerrainData {
    /// Creates a flat terrain of the given heightmap resolution and the
    /// default size.
    pub fn new(resolution: HeightmapResolution) -> Self {
        Self {
            heights: Heightfield::square(resolution.size() as usize),
            size: DEFAULT_TERRAIN_SIZE,
            alphamaps: Vec::new(),
        }
    }

    /// Like [`new`](Self::new) for a raw edge length, failing with
    /// `UnsupportedResolution` if it is not a valid heightmap size.
    pub fn try_new(resolution: u32) -> Result<Self> {
        Ok(Self::new(HeightmapResolution::try_from(resolution)?))
    }

    pub fn with_size(mut self, size: Vec3) -> Self {
        self.size = size;
        self
    }

    pub fn with_heights(mut self, heights: Heightfield) -> Self {
        self.heights.blit(0, 0, &heights);
        self
    }

    pub fn with_alphamap_layers(mut self, layers: Vec<Heightfield>) -> Self {
        self.alphamaps = layers;
        self
    }
}

impl HeightfieldStore for TerrainData {
    fn heightmap_resolution(&self) -> u32 {
        self.heights.resolution() as u32
    }

    fn heights(&self, row: usize, col: usize, rows: usize, cols: usize) -> Heightfield {
        self.heights.region(row, col, rows, cols)
    }

    fn set_heights(&mut self, row: usize, col: usize, heights: &Heightfield) {
        self.heights.blit(row, col, heights);
    }

    fn set_heightmap_resolution(&mut self, resolution: HeightmapResolution) {
        let res = resolution.size() as usize;
        self.heights.resize(res, res);
        self.size = DEFAULT_TERRAIN_SIZE;
    }

    fn size(&self) -> Vec3 {
        self.size
    }

    fn set_size(&mut self, size: Vec3) {
        self.size = size;
    }

    fn alphamap_layers(&self) -> &[Heightfield] {
        &self.alphamaps
    }
}
