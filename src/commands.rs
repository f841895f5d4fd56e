//! Actions a hosting shell triggers from its UI.
//!
//! Each command reads the options it needs from a [`TerrainHelperSession`],
//! runs to completion and reports failures as [`TerrainHelperError`]s.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::error::{Result, TerrainHelperError};
use crate::io;
use crate::mesher::TerrainMeshBuilder;
use crate::pixels::PixelGrid;
use crate::resampler::export_heightmap;
use crate::session::TerrainHelperSession;
use crate::splat::alphamaps_to_splat_images;
use crate::store::HeightfieldStore;

/// Imports the session's selected image into `store`.
pub fn import_heightmap(
    session: &TerrainHelperSession,
    store: &mut impl HeightfieldStore,
) -> Result<()> {
    let image = session.validate_import()?;
    session.importer().import_into(image, store)
}

/// Writes the store's heightmap to `path` as an 8-bit grayscale PNG.
pub fn export_heightmap_to(store: &impl HeightfieldStore, path: impl AsRef<Path>) -> Result<()> {
    let image = export_heightmap(&store.all_heights());
    io::save_png(&image, path.as_ref())?;
    info!(
        "exported {}x{} heightmap to {}",
        image.width(),
        image.height(),
        path.as_ref().display()
    );
    Ok(())
}

/// Converts the store's heightmap into a mesh at the session's mesh
/// resolution, scaled by the store's cell size.
pub fn bake_terrain_mesh(session: &TerrainHelperSession, store: &impl HeightfieldStore) -> Mesh {
    let mesh = TerrainMeshBuilder::new()
        .with_resolution(session.mesh_resolution)
        .with_cell_scale(store.heightmap_scale())
        .build(&store.all_heights());
    info!(
        "baked terrain mesh with {} vertices",
        mesh.count_vertices()
    );
    mesh
}

/// Turns a top-down capture of the terrain into a texture.
///
/// The capture must be square and match the session's capture resolution.
pub fn bake_terrain_texture(session: &TerrainHelperSession, captured: &PixelGrid) -> Result<Image> {
    let expected = session.capture_resolution.size();
    if !captured.is_square() || captured.width() != expected {
        return Err(TerrainHelperError::UnsupportedCaptureResolution {
            width: captured.width(),
            height: captured.height(),
        });
    }
    Ok(captured.to_bevy_image())
}

/// Writes the store's splat layers as RGBA PNGs named `{stem}_{index}.png`
/// in `dir`, returning the written paths. `dir` must already exist.
pub fn export_splatmaps_to(
    store: &impl HeightfieldStore,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("splatmap directory {} does not exist", dir.display()),
        )
        .into());
    }
    let splats = alphamaps_to_splat_images(store.alphamap_layers())?;
    if splats.is_empty() {
        warn!("terrain has no alpha map layers to export");
    }

    let mut written = Vec::with_capacity(splats.len());
    for (index, splat) in splats.iter().enumerate() {
        let path = dir.join(format!("{stem}_{index}.png"));
        io::save_png_rgba(splat, &path)?;
        written.push(path);
    }

    info!("exported {} splatmaps to {}", written.len(), dir.display());
    Ok(written)
}
