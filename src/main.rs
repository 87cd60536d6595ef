use bevy::log::LogPlugin;
use bevy::prelude::*;
use foxel_lattice::config::{WorldConfig, load_config};
use foxel_lattice::lattice::{SAMPLE_POSITIONS, describe_decomposition};
use foxel_lattice::world::{FoxelWorld, FoxelWorldPlugin};

fn main() {
    // Optional first argument: path to a world config YAML
    let config = match std::env::args().nth(1) {
        Some(path) => match load_config::<WorldConfig, _>(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {path}: {err}");
                std::process::exit(1);
            }
        },
        None => WorldConfig::default(),
    };

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(FoxelWorldPlugin::new(config))
        .add_systems(PostStartup, print_sample_decompositions);
    // One frame is enough: everything interesting happens at startup
    app.update();
}

fn print_sample_decompositions(world: Res<FoxelWorld>) {
    for pos in SAMPLE_POSITIONS {
        println!("{}", describe_decomposition(pos));
        match world.get(pos) {
            Ok(material) => debug!("{pos} holds {material:?}"),
            Err(err) => warn!("{err}"),
        }
    }
}
