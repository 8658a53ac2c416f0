#![warn(missing_docs)]
//! Chunked hexagonal terrain for Bevy.
//!
//! Axial hex coordinates, noise → height/color classification and a
//! fan-and-skirt chunk mesher, wired into a Bevy plugin that spawns one mesh
//! entity per chunk.

pub mod chunk;
pub mod classify;
pub mod error;
pub mod hex;
pub mod math;
pub mod mesh;
pub mod terrain;

pub use chunk::{Chunk, ChunkGenerator, ChunkRange, FbmNoise, NoiseSource};
pub use classify::{ColorBands, HeightCurve, classify};
pub use error::TerrainError;
pub use hex::HexCoord;
pub use mesh::{ChunkMeshBuilder, HexTile, MeshBuffers};
pub use terrain::{TerrainConfig, TerrainPlugin};
