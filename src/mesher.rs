//! Mesh generation from [`Heightfield`] data.
//!
//! Converts a heightfield into [`MeshBuffers`] (positions, UVs, indices) at
//! its native resolution or a lower export resolution, and from there into a
//! Bevy [`Mesh`] with:
//! - `TriangleList` topology
//! - Smooth per-vertex normals (area-weighted average of adjacent face normals)
//! - UV coordinates spanning `[0, 1]` over the whole grid

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::heightfield::Heightfield;
use crate::resolution::MeshResolution;

/// Raw triangle-list buffers for a `W × W` terrain grid.
///
/// `positions.len() == uvs.len() == W²` and `indices.len() == (W-1)² · 6`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Computes smooth per-vertex normals from the triangle geometry.
    ///
    /// Each triangle's unnormalized cross product (proportional to its area)
    /// is accumulated at its three vertices, then normalized. Vertices with no
    /// contribution default to `+Y`.
    pub fn compute_normals(&self) -> Vec<[f32; 3]> {
        let mut normals: Vec<Vec3> = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(self.positions[i0]);
            let p1 = Vec3::from(self.positions[i1]);
            let p2 = Vec3::from(self.positions[i2]);
            let face_normal = (p1 - p0).cross(p2 - p0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        normals
            .iter()
            .map(|n| {
                let len = n.length();
                if len > f32::EPSILON { (*n / len).into() } else { [0.0, 1.0, 0.0] }
            })
            .collect()
    }

    /// Builds a `TriangleList` Bevy [`Mesh`] with positions, normals and UV_0.
    pub fn into_mesh(self) -> Mesh {
        let normals = self.compute_normals();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, self.uvs);
        mesh.insert_indices(Indices::U32(self.indices));
        mesh
    }
}

/// Converts a square [`Heightfield`] into a terrain mesh.
///
/// Vertex `(x, y)` sits at `(x · sx, h[y, x] · sy, y · sz)`: columns run along
/// +X, rows along +Z and heights along +Y. Each quad is split into the
/// triangles `(v, v+W, v+W+1)` and `(v, v+W+1, v+1)`, which wind
/// counter-clockwise seen from above, so flat terrain faces +Y in Bevy's
/// right-handed coordinate system.
///
/// When an export resolution `W` different from the heightfield's `Rh` is
/// requested, the heightfield is bilinearly resampled at `(x/(W-1), y/(W-1))`
/// and the horizontal cell scale becomes `s · (Rh-1)/(W-1)`, so the far edge
/// stays at `(Rh-1) · s` for every `W`. Resampled heights are multiplied by
/// `sy` up front and the vertical scale is then `1.0`; mesh heights are in
/// world units at any resolution.
///
/// # Example
///
/// ```ignore
/// use bevy_terrain_helper::{Heightfield, HeightmapResolution, MeshResolution, TerrainMeshBuilder};
///
/// let heights = Heightfield::square(129);
/// let mesh = TerrainMeshBuilder::new()
///     .with_resolution(MeshResolution::Fixed(HeightmapResolution::R65))
///     .with_cell_scale(Vec3::new(2.0, 100.0, 2.0))
///     .build(&heights);
/// ```
pub struct TerrainMeshBuilder {
    resolution: MeshResolution,
    cell_scale: Vec3,
}

impl Default for TerrainMeshBuilder {
    fn default() -> Self {
        Self {
            resolution: MeshResolution::MatchSource,
            cell_scale: Vec3::ONE,
        }
    }
}

impl TerrainMeshBuilder {
    /// Creates a builder at the source resolution with a unit cell scale.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: MeshResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the physical size of one heightfield cell: `x`/`z` are the cell
    /// width and depth, `y` converts normalized heights to world units.
    pub fn with_cell_scale(mut self, scale: Vec3) -> Self {
        self.cell_scale = scale;
        self
    }

    /// Builds the raw mesh buffers.
    ///
    /// # Panics
    ///
    /// Panics if the heightfield is not square or is smaller than 2×2, as at
    /// least one quad is required to produce triangle geometry.
    pub fn build_buffers(&self, heightfield: &Heightfield) -> MeshBuffers {
        assert!(heightfield.is_square(), "Heightfield must be square to generate a mesh");
        assert!(
            heightfield.rows() >= 2 && heightfield.cols() >= 2,
            "Heightfield must be at least 2×2 to generate a mesh (got {}×{})",
            heightfield.rows(),
            heightfield.cols()
        );

        let source_res = heightfield.resolution();
        let w = self.resolution.resolve(source_res);

        let resampled;
        let (heights, scale) = if w == source_res {
            (heightfield, self.cell_scale)
        } else {
            debug!("resampling {source_res}² heightfield to {w}² for meshing");
            let step = 1.0 / (w - 1) as f32;
            let sy = self.cell_scale.y;
            resampled = Heightfield::from_fn(w, w, |row, col| {
                heightfield.sample_bilinear(col as f32 * step, row as f32 * step) * sy
            });
            let ratio = (source_res - 1) as f32 / (w - 1) as f32;
            let scale = Vec3::new(self.cell_scale.x * ratio, 1.0, self.cell_scale.z * ratio);
            (&resampled, scale)
        };

        let vertex_count = w * w;
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
        let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);
        let mut indices: Vec<u32> = Vec::with_capacity((w - 1) * (w - 1) * 6);

        let uv_step = 1.0 / (w - 1) as f32;
        let stride = w as u32;

        for y in 0..w {
            for x in 0..w {
                positions.push([
                    x as f32 * scale.x,
                    heights.get(y, x) * scale.y,
                    y as f32 * scale.z,
                ]);
                uvs.push([x as f32 * uv_step, y as f32 * uv_step]);

                if x < w - 1 && y < w - 1 {
                    // v ───── v+1
                    // │  ╲     │   Triangle 1: v, v+W, v+W+1
                    // │     ╲  │   Triangle 2: v, v+W+1, v+1
                    // v+W ── v+W+1
                    let v = (x + y * w) as u32;
                    indices.extend_from_slice(&[v, v + stride, v + stride + 1]);
                    indices.extend_from_slice(&[v, v + stride + 1, v + 1]);
                }
            }
        }

        MeshBuffers {
            positions,
            uvs,
            indices,
        }
    }

    /// Builds a Bevy [`Mesh`] from the heightfield.
    ///
    /// # Panics
    ///
    /// See [`build_buffers`](Self::build_buffers).
    pub fn build(&self, heightfield: &Heightfield) -> Mesh {
        self.build_buffers(heightfield).into_mesh()
    }
}
