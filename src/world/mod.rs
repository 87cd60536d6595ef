pub mod brick;
pub mod foxel;
pub mod grid;
pub mod persistence;
pub mod plugin;
pub mod raycast;

pub use brick::Brick;
pub use foxel::Foxel;
pub use grid::{BrickRef, BrickSlot, FoxelWorld};
pub use plugin::FoxelWorldPlugin;
pub use raycast::{RayHit, raycast_foxels};
