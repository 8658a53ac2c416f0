//! Chunk mesh generation from per-hex samples.
//!
//! Every hex becomes an independent flat-topped prism with no bottom cap:
//! a 6-triangle top fan plus 6 side quads down to `y = 0`. Vertices are never
//! shared between hexes, so each hex writes a fixed-size slice of the output
//! buffers and hexes can be built in any order, or in parallel.
//!
//! Per hex, vertex `0` is the top center, `1..=6` the top rim and `7..=12`
//! the bottom rim, rim vertex `i` sitting at corner `i` of
//! [`math::hex_corner_offsets`].

use bevy::asset::RenderAssetUsages;
use bevy::color::ColorToComponents;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use rayon::prelude::*;

use crate::error::TerrainError;
use crate::hex::HexCoord;
use crate::math;

/// Default chunk edge length, in hexes.
pub const CHUNK_SIZE: usize = 32;
/// Vertices emitted per hex: top center, 6 top rim, 6 bottom rim.
pub const VERTICES_PER_HEX: usize = 13;
/// Triangles emitted per hex: 6 top fan + 6 sides × 2.
pub const TRIANGLES_PER_HEX: usize = 18;
/// Indices emitted per hex.
pub const INDICES_PER_HEX: usize = TRIANGLES_PER_HEX * 3;

/// Terrain sample for one hex cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexTile {
    /// Terrain height before [`ChunkMeshBuilder`] scaling.
    pub height: f32,
    /// Flat color shared by all vertices of the hex.
    pub color: Color,
}

/// Raw geometry of one chunk, ready for upload.
///
/// `positions`, `normals` and `colors` are parallel per-vertex arrays;
/// `indices` is a triangle list into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// World-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (unit length, or zero on degenerate sides).
    pub normals: Vec<Vec3>,
    /// Per-vertex linear RGBA colors.
    pub colors: Vec<[f32; 4]>,
    /// Counter-clockwise triangle list.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Zero-filled buffers sized for `hex_count` hexes.
    fn for_hexes(hex_count: usize) -> Self {
        let vertices = hex_count * VERTICES_PER_HEX;
        Self {
            positions: vec![Vec3::ZERO; vertices],
            normals: vec![Vec3::ZERO; vertices],
            colors: vec![[0.0; 4]; vertices],
            indices: vec![0; hex_count * INDICES_PER_HEX],
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl From<MeshBuffers> for Mesh {
    fn from(buffers: MeshBuffers) -> Self {
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, buffers.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, buffers.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, buffers.colors)
        .with_inserted_indices(Indices::U32(buffers.indices))
    }
}

/// Output region owned by a single hex.
struct HexSlot<'a> {
    positions: &'a mut [Vec3],
    normals: &'a mut [Vec3],
    colors: &'a mut [[f32; 4]],
    indices: &'a mut [u32],
}

/// Builds [`MeshBuffers`] for a square `dimension × dimension` grid of hexes.
///
/// Tiles are row-major: tile `i` is the hex `(q, r) = (i % D, i / D)`.
///
/// # Example
///
/// ```
/// # use bevy::prelude::*;
/// # use hex_chunk_terrain::mesh::{ChunkMeshBuilder, HexTile};
/// let tile = HexTile { height: 2.0, color: Color::WHITE };
/// let buffers = ChunkMeshBuilder::new()
///     .with_dimension(1)
///     .build(&[tile], Vec2::ZERO)
///     .unwrap();
/// assert_eq!(buffers.vertex_count(), 13);
/// assert_eq!(buffers.indices.len(), 54);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkMeshBuilder {
    dimension: usize,
    hex_size: f32,
    height_scale: f32,
    corners: [Vec3; 6],
}

impl Default for ChunkMeshBuilder {
    fn default() -> Self {
        Self {
            dimension: CHUNK_SIZE,
            hex_size: 1.0,
            height_scale: 0.5,
            corners: math::hex_corner_offsets(1.0),
        }
    }
}

impl ChunkMeshBuilder {
    /// Creates a builder for a 32×32 chunk of unit hexes with height scale `0.5`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk edge length `D`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets the hex corner radius in world units.
    pub fn with_hex_size(mut self, size: f32) -> Self {
        self.hex_size = size;
        self.corners = math::hex_corner_offsets(size);
        self
    }

    /// Sets the factor applied to tile heights.
    pub fn with_height_scale(mut self, scale: f32) -> Self {
        self.height_scale = scale;
        self
    }

    /// Chunk edge length `D`.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Hex corner radius in world units.
    pub fn hex_size(&self) -> f32 {
        self.hex_size
    }

    /// Factor applied to tile heights.
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    /// Builds the chunk geometry on the current thread.
    ///
    /// `chunk_offset` is the chunk origin in the XZ plane. Fails with
    /// [`TerrainError::GridSizeMismatch`] unless `tiles.len() == D * D`.
    /// Heights are used as given.
    pub fn build(
        &self,
        tiles: &[HexTile],
        chunk_offset: Vec2,
    ) -> Result<MeshBuffers, TerrainError> {
        self.check_len(tiles)?;
        let mut buffers = MeshBuffers::for_hexes(tiles.len());
        let MeshBuffers {
            positions,
            normals,
            colors,
            indices,
        } = &mut buffers;

        positions
            .chunks_exact_mut(VERTICES_PER_HEX)
            .zip(normals.chunks_exact_mut(VERTICES_PER_HEX))
            .zip(colors.chunks_exact_mut(VERTICES_PER_HEX))
            .zip(indices.chunks_exact_mut(INDICES_PER_HEX))
            .zip(tiles)
            .enumerate()
            .for_each(|(i, ((((positions, normals), colors), indices), tile))| {
                let slot = HexSlot {
                    positions,
                    normals,
                    colors,
                    indices,
                };
                self.write_hex(i, tile, chunk_offset, slot);
            });

        Ok(buffers)
    }

    /// Same as [`ChunkMeshBuilder::build`], spreading hexes over the rayon pool.
    ///
    /// Output is bit-identical to the sequential build.
    pub fn build_par(
        &self,
        tiles: &[HexTile],
        chunk_offset: Vec2,
    ) -> Result<MeshBuffers, TerrainError> {
        self.check_len(tiles)?;
        let mut buffers = MeshBuffers::for_hexes(tiles.len());
        let MeshBuffers {
            positions,
            normals,
            colors,
            indices,
        } = &mut buffers;

        positions
            .par_chunks_exact_mut(VERTICES_PER_HEX)
            .zip(normals.par_chunks_exact_mut(VERTICES_PER_HEX))
            .zip(colors.par_chunks_exact_mut(VERTICES_PER_HEX))
            .zip(indices.par_chunks_exact_mut(INDICES_PER_HEX))
            .zip(tiles.par_iter())
            .enumerate()
            .for_each(|(i, ((((positions, normals), colors), indices), tile))| {
                let slot = HexSlot {
                    positions,
                    normals,
                    colors,
                    indices,
                };
                self.write_hex(i, tile, chunk_offset, slot);
            });

        Ok(buffers)
    }

    fn check_len(&self, tiles: &[HexTile]) -> Result<(), TerrainError> {
        let expected = self.dimension * self.dimension;
        if tiles.len() != expected {
            return Err(TerrainError::GridSizeMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(())
    }

    /// Writes the 13 vertices and 18 triangles of tile `index` into `slot`.
    fn write_hex(&self, index: usize, tile: &HexTile, chunk_offset: Vec2, slot: HexSlot<'_>) {
        let q = (index % self.dimension) as i32;
        let r = (index / self.dimension) as i32;
        let center_2d = HexCoord::new(q, r).to_world() * self.hex_size + chunk_offset;
        let center = Vec3::new(center_2d.x, tile.height * self.height_scale, center_2d.y);

        slot.positions[0] = center;
        for (i, corner) in self.corners.iter().enumerate() {
            let top = center + *corner;
            slot.positions[1 + i] = top;
            slot.positions[7 + i] = Vec3::new(top.x, 0.0, top.z);
        }

        // Flat top; each bottom rim vertex takes the normal of the side it starts.
        slot.normals[..7].fill(Vec3::Y);
        for i in 0..6 {
            let top_a = slot.positions[1 + i];
            let top_b = slot.positions[1 + (i + 1) % 6];
            let bottom_a = slot.positions[7 + i];
            slot.normals[7 + i] = math::compute_normal(top_a, top_b, bottom_a);
        }

        slot.colors.fill(tile.color.to_linear().to_f32_array());

        let base = (index * VERTICES_PER_HEX) as u32;
        for i in 0..6u32 {
            let next = (i + 1) % 6;
            let top_a = base + 1 + i;
            let top_b = base + 1 + next;
            let bottom_a = base + 7 + i;
            let bottom_b = base + 7 + next;

            let fan = 3 * i as usize;
            slot.indices[fan..fan + 3].copy_from_slice(&[base, top_b, top_a]);

            let side = 18 + 6 * i as usize;
            slot.indices[side..side + 6]
                .copy_from_slice(&[top_a, top_b, bottom_a, bottom_a, top_b, bottom_b]);
        }
    }
}
