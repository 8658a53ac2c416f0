//! Chunk orchestration: noise → tiles → mesh for a range of chunks.
//!
//! Chunks never share state, so [`ChunkGenerator::generate_range`] builds them
//! on the rayon pool and only reorders the results.

use bevy::prelude::*;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rayon::prelude::*;

use crate::classify::{self, ColorBands, HeightCurve};
use crate::error::TerrainError;
use crate::hex::HexCoord;
use crate::mesh::{ChunkMeshBuilder, HexTile, MeshBuffers};

/// Height-field oracle sampled once per hex.
///
/// Implementations return values roughly in `[-1, 1]` and must be
/// deterministic for a given `(x, y)`.
pub trait NoiseSource: Sync {
    /// Samples the field at a global hex coordinate.
    fn sample(&self, x: i32, y: i32) -> f32;
}

impl<F> NoiseSource for F
where
    F: Fn(i32, i32) -> f32 + Sync,
{
    fn sample(&self, x: i32, y: i32) -> f32 {
        self(x, y)
    }
}

/// Fractal Perlin noise over hex coordinates.
pub struct FbmNoise {
    fbm: Fbm<Perlin>,
    scale: f64,
}

impl FbmNoise {
    /// Builds `octaves` of Perlin noise; coordinates are divided by `scale`.
    pub fn new(seed: u32, octaves: usize, scale: f64) -> Self {
        Self {
            fbm: Fbm::new(seed).set_octaves(octaves),
            scale,
        }
    }
}

impl NoiseSource for FbmNoise {
    fn sample(&self, x: i32, y: i32) -> f32 {
        self.fbm.get([x as f64 / self.scale, y as f64 / self.scale]) as f32
    }
}

/// Inclusive rectangle of chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    /// Lowest chunk coordinate on both axes.
    pub min: IVec2,
    /// Highest chunk coordinate on both axes.
    pub max: IVec2,
}

impl Default for ChunkRange {
    fn default() -> Self {
        Self::centered(5)
    }
}

impl ChunkRange {
    /// Range spanning `min ..= max`.
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self { min, max }
    }

    /// Square range `[-radius, radius]²` around the origin chunk.
    pub fn centered(radius: i32) -> Self {
        Self::new(IVec2::splat(radius.saturating_neg()), IVec2::splat(radius))
    }

    /// Chunks along `x` and `y`, saturating at `usize::MAX`.
    pub fn extent(&self) -> (usize, usize) {
        let axis = |min: i32, max: i32| {
            let span = (i64::from(max) - i64::from(min) + 1).max(0);
            usize::try_from(span).unwrap_or(usize::MAX)
        };
        (axis(self.min.x, self.max.x), axis(self.min.y, self.max.y))
    }

    /// Number of chunks in the range, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        let (w, h) = self.extent();
        w.saturating_mul(h)
    }

    /// `true` when `min` exceeds `max` on either axis.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chunk coordinates, `x` outer and `y` inner.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| IVec2::new(x, y)))
    }
}

/// A meshed chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Chunk-grid coordinate.
    pub coord: IVec2,
    /// World-space XZ origin the mesh was offset by.
    pub origin: Vec2,
    /// Geometry in world space.
    pub mesh: MeshBuffers,
}

/// Samples, classifies and meshes chunks.
pub struct ChunkGenerator<N> {
    noise: N,
    curve: HeightCurve,
    bands: ColorBands,
    mesher: ChunkMeshBuilder,
}

impl<N: NoiseSource> ChunkGenerator<N> {
    /// Bundles the noise oracle, height curve, color bands and mesh builder.
    pub fn new(
        noise: N,
        curve: HeightCurve,
        bands: ColorBands,
        mesher: ChunkMeshBuilder,
    ) -> Self {
        Self {
            noise,
            curve,
            bands,
            mesher,
        }
    }

    /// The mesh builder (and with it the chunk dimension) in use.
    pub fn mesher(&self) -> &ChunkMeshBuilder {
        &self.mesher
    }

    /// World-space XZ origin of chunk `coord`: the center of its `(0, 0)` hex.
    pub fn chunk_origin(&self, coord: IVec2) -> Vec2 {
        let d = self.mesher.dimension() as i32;
        HexCoord::from(coord * d).to_world() * self.mesher.hex_size()
    }

    /// Row-major tile grid of chunk `coord`.
    ///
    /// Tile `(q, r)` samples the noise at global hex `(q + x·D, r + y·D)`.
    pub fn sample_tiles(&self, coord: IVec2) -> Vec<HexTile> {
        let d = self.mesher.dimension();
        let base = coord * d as i32;
        (0..d * d)
            .map(|i| {
                let q = (i % d) as i32;
                let r = (i / d) as i32;
                let noise = self.noise.sample(base.x + q, base.y + r);
                classify::classify(noise, &self.curve, &self.bands)
            })
            .collect()
    }

    /// Samples and meshes one chunk.
    pub fn generate(&self, coord: IVec2) -> Result<Chunk, TerrainError> {
        let tiles = self.sample_tiles(coord);
        let origin = self.chunk_origin(coord);
        let mesh = self.mesher.build(&tiles, origin)?;
        debug!(
            "chunk ({}, {}) meshed: {} vertices at {origin}",
            coord.x,
            coord.y,
            mesh.vertex_count()
        );
        Ok(Chunk {
            coord,
            origin,
            mesh,
        })
    }

    /// Generates every chunk of `range` in parallel.
    ///
    /// Results come back in [`ChunkRange::iter`] order; the first error aborts.
    pub fn generate_range(&self, range: ChunkRange) -> Result<Vec<Chunk>, TerrainError> {
        let coords: Vec<IVec2> = range.iter().collect();
        coords.par_iter().map(|&coord| self.generate(coord)).collect()
    }
}
