use bevy::prelude::*;

use super::TerrainConfig;
use super::entities::{HexTerrain, TerrainChunk};

// ── Update: chunk (re)generation ───────────────────────────────────

/// Despawns any existing terrain and spawns one mesh entity per chunk.
///
/// Runs whenever [`TerrainConfig`] is added or changed. Generation errors are
/// logged and leave the world without terrain.
pub fn regenerate_chunks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<TerrainConfig>,
    roots: Query<Entity, With<HexTerrain>>,
) {
    for root in &roots {
        commands.entity(root).despawn();
    }
    commands.insert_resource(ClearColor(cfg.clear_color));

    let range = cfg.chunks.range();
    let chunks = match cfg
        .generator()
        .and_then(|generator| generator.generate_range(range))
    {
        Ok(chunks) => chunks,
        Err(err) => {
            error!("terrain generation failed: {err}");
            return;
        }
    };

    // Vertex colors carry the band color; the material stays white.
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        ..default()
    });

    let root = commands
        .spawn((
            Name::new("HexTerrain"),
            HexTerrain,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    let count = chunks.len();
    let mut vertices = 0;
    for chunk in chunks {
        vertices += chunk.mesh.vertex_count();
        let entity = commands
            .spawn((
                TerrainChunk {
                    coord: chunk.coord,
                    origin: chunk.origin,
                },
                Name::new(format!("Chunk({},{})", chunk.coord.x, chunk.coord.y)),
                Mesh3d(meshes.add(Mesh::from(chunk.mesh))),
                MeshMaterial3d(material.clone()),
                Transform::default(),
            ))
            .id();
        commands.entity(root).add_child(entity);
    }

    info!("spawned {count} terrain chunks ({vertices} vertices)");
}

// ── Debug ──────────────────────────────────────────────────────────

/// Draws a vertical marker at each chunk origin.
pub fn draw_chunk_origins(mut gizmos: Gizmos, chunks: Query<&TerrainChunk>) {
    for chunk in &chunks {
        let base = Vec3::new(chunk.origin.x, 0.0, chunk.origin.y);
        gizmos.line(base, base + Vec3::Y * 12.0, Color::srgb(1.0, 0.2, 0.6));
    }
}
