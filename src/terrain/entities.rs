use bevy::prelude::*;

/// Root entity parenting every spawned [`TerrainChunk`].
///
/// Despawning it removes the whole terrain.
#[derive(Component, Reflect)]
pub struct HexTerrain;

/// Marker on chunk mesh entities.
#[derive(Component, Reflect, Debug, Clone, Copy)]
pub struct TerrainChunk {
    /// Chunk-grid coordinate.
    pub coord: IVec2,
    /// World-space XZ origin of the chunk's `(0, 0)` hex.
    pub origin: Vec2,
}
