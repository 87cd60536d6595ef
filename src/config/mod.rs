pub mod loader;

use crate::constants::{DEFAULT_SAMPLE_ARM_LENGTH, DEFAULT_WORLD_SAVE_PATH};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use loader::{ConfigError, load_config};

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Build the axis-arm sample scene when no saved world is loaded
    pub sample_scene: bool,
    pub sample_arm_length: i32,
    pub save_path: Option<PathBuf>,
    /// Prefer a saved world at `save_path` over generating one
    pub load_on_startup: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            sample_scene: true,
            sample_arm_length: DEFAULT_SAMPLE_ARM_LENGTH,
            save_path: Some(PathBuf::from(DEFAULT_WORLD_SAVE_PATH)),
            load_on_startup: false,
        }
    }
}
