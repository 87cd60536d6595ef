use bevy::prelude::*;
use crate::config::WorldConfig;
use crate::world::grid::FoxelWorld;
use crate::world::persistence::{load_world, saved_world_exists};

#[derive(Default)]
pub struct FoxelWorldPlugin {
    pub config: WorldConfig,
}

impl FoxelWorldPlugin {
    pub fn new(config: WorldConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FoxelWorldPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(self.config.clone())
            .init_resource::<FoxelWorld>()
            .add_systems(Startup, setup_foxel_world);
    }
}

fn setup_foxel_world(
    config: Res<WorldConfig>,
    mut world: ResMut<FoxelWorld>,
) {
    if config.load_on_startup
        && let Some(path) = config.save_path.as_ref().filter(|p| saved_world_exists(p))
    {
        match load_world(path) {
            Ok(loaded) => {
                *world = loaded;
                return;
            }
            Err(err) => warn!("Failed to load saved world from {}: {err}", path.display()),
        }
    }

    if config.sample_scene
        && let Err(err) = world.setup_sample_scene(config.sample_arm_length)
    {
        warn!("Sample scene truncated: {err}");
    }

    info!(
        "Foxel world ready: {} composite bricks, {} solid bricks",
        world.composite_brick_count(),
        world.solid_brick_count()
    );
}
