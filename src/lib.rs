//! Terrain heightmap tooling for Bevy asset pipelines.
//!
//! Moves terrain data between images, heightfields and meshes:
//!
//! - **Heightmap import**: turn a square image into a [`Heightfield`], either
//!   copying pixels 1:1 (resizing the terrain grid to match) or bilinearly
//!   fitting the image onto the existing grid, via [`HeightmapImporter`].
//! - **Heightmap export**: encode a heightfield as a grayscale image with
//!   [`export_heightmap`] and write it with [`io::save_png`].
//! - **Mesh baking**: convert a heightfield into triangle buffers or a Bevy
//!   [`Mesh`](bevy::prelude::Mesh), optionally at a lower resolution, via
//!   [`TerrainMeshBuilder`].
//! - **Splatmaps**: pack alpha-map layers into RGBA images via [`splat`].
//!
//! Terrain ownership sits behind the [`HeightfieldStore`] trait; [`TerrainData`]
//! is an in-memory store. A hosting shell keeps its options in a
//! [`TerrainHelperSession`] and runs the actions in [`commands`].
//!
//! # Example
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_terrain_helper::{commands, HeightmapResolution, TerrainData, TerrainHelperSession};
//!
//! fn bake(
//!     mut commands_: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//! ) -> Result<(), bevy_terrain_helper::TerrainHelperError> {
//!     let mut session = TerrainHelperSession::new();
//!     let mut terrain = TerrainData::new(HeightmapResolution::R129);
//!
//!     session.select_image("assets/heightmap.png")?;
//!     commands::import_heightmap(&session, &mut terrain)?;
//!
//!     let mesh = commands::bake_terrain_mesh(&session, &terrain);
//!     commands_.spawn((
//!         Mesh3d(meshes.add(mesh)),
//!         MeshMaterial3d(materials.add(StandardMaterial::default())),
//!     ));
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod error;
pub mod heightfield;
pub mod io;
pub mod mesher;
pub mod pixels;
pub mod resampler;
pub mod resolution;
pub mod session;
pub mod splat;
pub mod store;

pub use error::{ErrorKind, Result, TerrainHelperError};
pub use heightfield::Heightfield;
pub use mesher::{MeshBuffers, TerrainMeshBuilder};
pub use pixels::{PixelGrid, grayscale};
pub use resampler::{HeightmapImporter, ImportMode, export_heightmap};
pub use resolution::{CaptureResolution, HeightmapResolution, MeshResolution};
pub use session::TerrainHelperSession;
pub use splat::{alphamaps_to_splat_images, splat_to_image};
pub use store::{HeightfieldStore, TerrainData};
