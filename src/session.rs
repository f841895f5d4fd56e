//! Tool state a hosting shell keeps between user actions.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::error::{Result, TerrainHelperError};
use crate::io;
use crate::pixels::PixelGrid;
use crate::resampler::{HeightmapImporter, ImportMode};
use crate::resolution::{CaptureResolution, MeshResolution};

/// Selections and options of one open terrain helper panel.
///
/// The algorithms in this crate are stateless; the shell owns one session,
/// mutates it from UI events and passes it to the [`commands`](crate::commands).
#[derive(Resource, Debug, Clone)]
pub struct TerrainHelperSession {
    pub import_expanded: bool,
    pub export_expanded: bool,
    pub import_mode: ImportMode,
    pub mesh_resolution: MeshResolution,
    pub capture_resolution: CaptureResolution,
    intensity: f32,
    selected_image_path: Option<PathBuf>,
    selected_image: Option<PixelGrid>,
}

impl Default for TerrainHelperSession {
    fn default() -> Self {
        Self {
            import_expanded: true,
            export_expanded: true,
            import_mode: ImportMode::FitToTarget,
            mesh_resolution: MeshResolution::MatchSource,
            capture_resolution: CaptureResolution::default(),
            intensity: 1.0,
            selected_image_path: None,
            selected_image: None,
        }
    }
}

impl TerrainHelperSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores every option and drops the selected image.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Sets the import intensity, clamped to `[0, 1]`.
    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }

    pub fn selected_image_path(&self) -> Option<&Path> {
        self.selected_image_path.as_deref()
    }

    pub fn selected_image(&self) -> Option<&PixelGrid> {
        self.selected_image.as_ref()
    }

    /// Selects the heightmap image at `path`.
    ///
    /// The file is only decoded when the path differs from the current
    /// selection. A path that does not exist clears the selection. On a decode
    /// failure the selection is cleared and the error returned.
    pub fn select_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_file() {
            warn!("heightmap image {} does not exist", path.display());
            self.clear_selection();
            return Ok(());
        }

        let unchanged = self.selected_image_path.as_deref() == Some(path);
        if unchanged && self.selected_image.is_some() {
            return Ok(());
        }

        match io::load_image(path) {
            Ok(image) => {
                self.selected_image_path = Some(path.to_path_buf());
                self.selected_image = Some(image);
                Ok(())
            }
            Err(err) => {
                self.clear_selection();
                Err(err)
            }
        }
    }

    /// Selects an already decoded image, e.g. one produced in memory.
    pub fn select_pixels(&mut self, image: PixelGrid) {
        self.selected_image_path = None;
        self.selected_image = Some(image);
    }

    pub fn clear_selection(&mut self) {
        self.selected_image_path = None;
        self.selected_image = None;
    }

    /// Importer configured from this session's mode and intensity.
    pub fn importer(&self) -> HeightmapImporter {
        HeightmapImporter::new()
            .with_mode(self.import_mode)
            .with_intensity(self.intensity)
    }

    /// Checks whether the selected image can be imported with the current
    /// options, without touching any terrain.
    pub fn validate_import(&self) -> Result<&PixelGrid> {
        let image = self
            .selected_image
            .as_ref()
            .ok_or(TerrainHelperError::MissingSelection("heightmap image"))?;
        self.importer().validate(image)?;
        Ok(image)
    }
}
