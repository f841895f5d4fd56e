//! Fixed resolution sets used by heightmaps, export meshes and captured textures.

use crate::error::TerrainHelperError;

/// A heightmap grid size the terrain store accepts (`2^n + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeightmapResolution {
    R33,
    R65,
    R129,
    R257,
    R513,
    R1025,
    R2049,
    R4097,
}

impl HeightmapResolution {
    pub const ALL: [HeightmapResolution; 8] = [
        HeightmapResolution::R33,
        HeightmapResolution::R65,
        HeightmapResolution::R129,
        HeightmapResolution::R257,
        HeightmapResolution::R513,
        HeightmapResolution::R1025,
        HeightmapResolution::R2049,
        HeightmapResolution::R4097,
    ];

    /// Samples along one edge.
    pub const fn size(self) -> u32 {
        match self {
            HeightmapResolution::R33 => 33,
            HeightmapResolution::R65 => 65,
            HeightmapResolution::R129 => 129,
            HeightmapResolution::R257 => 257,
            HeightmapResolution::R513 => 513,
            HeightmapResolution::R1025 => 1025,
            HeightmapResolution::R2049 => 2049,
            HeightmapResolution::R4097 => 4097,
        }
    }

    pub fn is_valid(size: u32) -> bool {
        Self::try_from(size).is_ok()
    }
}

impl TryFrom<u32> for HeightmapResolution {
    type Error = TerrainHelperError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.size() == size)
            .ok_or(TerrainHelperError::UnsupportedResolution(size))
    }
}

/// Resolution at which a heightfield is turned into a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeshResolution {
    /// Use the heightfield's own resolution.
    #[default]
    MatchSource,
    /// Resample the heightfield to this resolution first.
    Fixed(HeightmapResolution),
}

impl MeshResolution {
    /// Working resolution for a source heightfield of `source` samples per edge.
    pub fn resolve(self, source: usize) -> usize {
        match self {
            MeshResolution::MatchSource => source,
            MeshResolution::Fixed(r) => r.size() as usize,
        }
    }
}

/// Offscreen capture size accepted when baking a terrain texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptureResolution {
    R512,
    #[default]
    R1024,
    R2048,
    R4096,
}

impl CaptureResolution {
    pub const ALL: [CaptureResolution; 4] = [
        CaptureResolution::R512,
        CaptureResolution::R1024,
        CaptureResolution::R2048,
        CaptureResolution::R4096,
    ];

    pub const fn size(self) -> u32 {
        match self {
            CaptureResolution::R512 => 512,
            CaptureResolution::R1024 => 1024,
            CaptureResolution::R2048 => 2048,
            CaptureResolution::R4096 => 4096,
        }
    }
}

impl TryFrom<u32> for CaptureResolution {
    type Error = TerrainHelperError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.size() == size)
            .ok_or(TerrainHelperError::UnsupportedCaptureResolution {
                width: size,
                height: size,
            })
    }
}
