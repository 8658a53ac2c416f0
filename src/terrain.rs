//! Bevy integration: config resource, plugin, and chunk entity spawning.
//!
//! Chunks are (re)generated whenever [`TerrainConfig`] is inserted or
//! mutated, so editing the resource in an inspector rebuilds the terrain.

mod entities;
mod systems;

pub use entities::{HexTerrain, TerrainChunk};
pub use systems::{draw_chunk_origins, regenerate_chunks};

use bevy::prelude::*;

use crate::chunk::{ChunkGenerator, ChunkRange, FbmNoise};
use crate::classify::{ColorBands, HeightCurve};
use crate::error::TerrainError;
use crate::mesh::{CHUNK_SIZE, ChunkMeshBuilder};

/// Nested configuration for the terrain subsystem.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct TerrainConfig {
    /// Chunk range and hex geometry.
    pub chunks: ChunkSettings,
    /// Height noise parameters.
    pub noise: NoiseSettings,
    /// `(noise, height)` control points, ascending by noise.
    pub curve: Vec<Vec2>,
    /// Height → color bands.
    pub bands: ColorBands,
    /// Background clear color.
    pub clear_color: Color,
}

/// Which chunks to build and how large their hexes are.
#[derive(Clone, Debug, Reflect)]
pub struct ChunkSettings {
    /// Lowest chunk coordinate (inclusive).
    pub range_min: IVec2,
    /// Highest chunk coordinate (inclusive).
    pub range_max: IVec2,
    /// Hexes along each chunk edge.
    pub chunk_size: usize,
    /// Hex corner radius in world units.
    pub hex_size: f32,
    /// World-units of elevation per unit of tile height.
    pub height_scale: f32,
}

/// Fractal noise sampled once per hex.
#[derive(Clone, Debug, Reflect)]
pub struct NoiseSettings {
    /// Seed for the height noise generator.
    pub seed: u32,
    /// Number of octaves for height noise.
    pub octaves: usize,
    /// Spatial scale divisor applied to hex coordinates before sampling.
    pub scale: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunks: ChunkSettings {
                range_min: IVec2::splat(-5),
                range_max: IVec2::splat(5),
                chunk_size: CHUNK_SIZE,
                hex_size: 1.0,
                height_scale: 0.5,
            },
            noise: NoiseSettings {
                seed: 42,
                octaves: 4,
                scale: 60.0,
            },
            curve: vec![
                Vec2::new(-1.0, -8.0),
                Vec2::new(-0.2, -1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.3, 3.0),
                Vec2::new(0.6, 9.0),
                Vec2::new(1.0, 16.0),
            ],
            bands: ColorBands::default(),
            clear_color: Color::srgb(0.55, 0.7, 0.85),
        }
    }
}

impl ChunkSettings {
    /// The configured chunk range.
    pub fn range(&self) -> ChunkRange {
        ChunkRange::new(self.range_min, self.range_max)
    }

    /// Mesh builder matching these settings.
    pub fn mesher(&self) -> ChunkMeshBuilder {
        ChunkMeshBuilder::new()
            .with_dimension(self.chunk_size)
            .with_hex_size(self.hex_size)
            .with_height_scale(self.height_scale)
    }
}

impl TerrainConfig {
    /// Builds a chunk generator from this configuration.
    ///
    /// Fails when the height curve is empty or unsorted.
    pub fn generator(&self) -> Result<ChunkGenerator<FbmNoise>, TerrainError> {
        let curve = HeightCurve::new(self.curve.clone())?;
        let noise = FbmNoise::new(self.noise.seed, self.noise.octaves, self.noise.scale);
        Ok(ChunkGenerator::new(
            noise,
            curve,
            self.bands.clone(),
            self.chunks.mesher(),
        ))
    }
}

/// Terrain plugin: chunk generation on config insert/change.
pub struct TerrainPlugin(pub TerrainConfig);

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerrainConfig>()
            .register_type::<HexTerrain>()
            .register_type::<TerrainChunk>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.clear_color))
            .add_systems(
                Update,
                systems::regenerate_chunks.run_if(resource_changed::<TerrainConfig>),
            );
    }
}
