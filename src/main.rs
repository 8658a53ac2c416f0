//! Hex chunk terrain viewer.
//!
//! Static overview of the generated chunk range. Tab toggles the world
//! inspector, where editing `TerrainConfig` rebuilds the terrain.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_chunk_terrain::terrain::{self, TerrainConfig, TerrainPlugin};

/// Viewer state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
enum ViewerState {
    #[default]
    Running,
    /// Inspector and chunk-origin gizmos visible (Tab to toggle).
    Debugging,
}

/// Command-line overrides for the default terrain config.
#[cfg(feature = "native")]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Height noise seed.
    #[arg(long)]
    seed: Option<u32>,
    /// Chunk range half-width: chunks from -radius to +radius on both axes.
    #[arg(long)]
    radius: Option<i32>,
    /// Hexes along each chunk edge.
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[cfg(feature = "native")]
impl Cli {
    fn apply(self, cfg: &mut TerrainConfig) {
        if let Some(seed) = self.seed {
            cfg.noise.seed = seed;
        }
        if let Some(radius) = self.radius {
            cfg.chunks.range_min = IVec2::splat(radius.saturating_neg());
            cfg.chunks.range_max = IVec2::splat(radius);
        }
        if let Some(size) = self.chunk_size {
            cfg.chunks.chunk_size = size;
        }
    }
}

fn main() {
    #[cfg_attr(not(feature = "native"), allow(unused_mut))]
    let mut cfg = TerrainConfig::default();
    #[cfg(feature = "native")]
    Cli::parse().apply(&mut cfg);

    let camera = overview_camera(&cfg);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Chunk Terrain".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<ViewerState>()
    .init_state::<ViewerState>();

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(TerrainPlugin(cfg))
        .add_systems(
            Startup,
            move |mut commands: Commands| spawn_view(&mut commands, camera),
        )
        .add_systems(Update, (exit_on_esc, toggle_inspector))
        .add_systems(
            Update,
            terrain::draw_chunk_origins.run_if(in_state(ViewerState::Debugging)),
        )
        .add_plugins(WorldInspectorPlugin::new().run_if(in_state(ViewerState::Debugging)));

    app.run();
}

/// Camera transform framing the configured chunk range from above.
fn overview_camera(cfg: &TerrainConfig) -> Transform {
    let chunks = &cfg.chunks;
    let (w, h) = chunks.range().extent();
    let span = w.max(h).max(1) as f32;
    let extent = span * chunks.chunk_size.max(1) as f32 * 1.5 * chunks.hex_size;
    Transform::from_xyz(0.0, extent * 0.6, extent * 0.8).looking_at(Vec3::ZERO, Vec3::Y)
}

fn spawn_view(commands: &mut Commands, camera: Transform) {
    commands.spawn((Name::new("Camera"), Camera3d::default(), camera));
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(1.0, 2.0, 0.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<ViewerState>>,
    mut next: ResMut<NextState<ViewerState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            ViewerState::Running => ViewerState::Debugging,
            ViewerState::Debugging => ViewerState::Running,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
