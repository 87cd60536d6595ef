use crate::lattice::GridIndex;
use crate::world::brick::Brick;
use crate::world::foxel::Foxel;
use crate::world::grid::{BrickRef, BrickSlot, FoxelWorld};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("corrupt world snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Serializable contents of one grid cell, foxels stored as their byte codes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum BrickData {
    Solid(u8),
    Composite(Vec<u8>),
}

/// Serializable world data
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldData {
    pub bricks: Vec<(GridIndex, BrickData)>,
}

impl FoxelWorld {
    /// Snapshot sorted by grid index, so equal worlds encode identically.
    pub fn to_data(&self) -> WorldData {
        let mut bricks: Vec<(GridIndex, BrickData)> = self
            .iter_bricks()
            .map(|(grid, brick)| {
                let data = match brick {
                    BrickRef::Solid(foxel) => BrickData::Solid(foxel.encode()),
                    BrickRef::Composite(brick) => BrickData::Composite(
                        brick.foxels().iter().map(|foxel| foxel.encode()).collect(),
                    ),
                };
                (grid, data)
            })
            .collect();
        bricks.sort_by_key(|(grid, _)| *grid);
        WorldData { bricks }
    }

    /// Unknown byte codes load as `Foxel::Invalid`.
    pub fn from_data(data: WorldData) -> Result<Self, PersistenceError> {
        let mut world = FoxelWorld::new();
        let mut seen = HashSet::with_capacity(data.bricks.len());
        for (grid, brick) in data.bricks {
            if grid.slot().is_none() {
                return Err(PersistenceError::CorruptSnapshot(format!(
                    "grid index {grid} outside the world"
                )));
            }
            if !seen.insert(grid) {
                return Err(PersistenceError::CorruptSnapshot(format!(
                    "grid index {grid} appears twice"
                )));
            }
            let slot = match brick {
                BrickData::Solid(code) => BrickSlot::Solid(Foxel::decode(code)),
                BrickData::Composite(codes) => {
                    let len = codes.len();
                    let foxels = codes.into_iter().map(Foxel::decode).collect();
                    let brick = Brick::from_foxels(foxels).ok_or_else(|| {
                        PersistenceError::CorruptSnapshot(format!(
                            "brick {grid} holds {len} foxels"
                        ))
                    })?;
                    match brick.uniform() {
                        Some(foxel) => BrickSlot::Solid(foxel),
                        None => BrickSlot::Composite(Box::new(brick)),
                    }
                }
            };
            world.insert_slot(grid, slot);
        }
        Ok(world)
    }
}

/// Save the world to disk using bincode for fast serialization
pub fn save_world(world: &FoxelWorld, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let data = world.to_data();

    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, &data)?;

    info!("World saved to {} ({} bricks)", path.display(), data.bricks.len());
    Ok(())
}

/// Load the world from disk
pub fn load_world(path: impl AsRef<Path>) -> Result<FoxelWorld, PersistenceError> {
    let path = path.as_ref();

    let reader = BufReader::new(File::open(path)?);
    let data: WorldData = bincode::deserialize_from(reader)?;

    info!("World loaded from {} ({} bricks)", path.display(), data.bricks.len());
    FoxelWorld::from_data(data)
}

/// Check if a saved world exists
pub fn saved_world_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().exists()
}

/// Delete the saved world file
pub fn delete_saved_world(path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    if path.exists() {
        fs::remove_file(path)?;
        info!("Deleted saved world at {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BRICK_VOLUME;
    use crate::lattice::BlockPos;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("foxel_lattice_{}_{name}.bin", std::process::id()))
    }

    #[test]
    fn snapshot_survives_disk_round_trip() {
        let mut world = FoxelWorld::new();
        world.setup_sample_scene(12).unwrap();
        world.set(BlockPos::new(-100, 50, -3, 7), Foxel::GB).unwrap();

        let path = temp_path("round_trip");
        save_world(&world, &path).unwrap();
        assert!(saved_world_exists(&path));

        let loaded = load_world(&path).unwrap();
        assert_eq!(loaded.to_data(), world.to_data());
        assert_eq!(loaded.get(BlockPos::new(-100, 50, -3, 7)), Ok(Foxel::GB));
        assert_eq!(loaded.composite_brick_count(), world.composite_brick_count());

        delete_saved_world(&path).unwrap();
        assert!(!saved_world_exists(&path));
    }

    #[test]
    fn deleting_missing_file_is_ok() {
        assert!(delete_saved_world(temp_path("never_written")).is_ok());
    }

    #[test]
    fn loading_missing_file_is_io_error() {
        let err = load_world(temp_path("missing")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    #[test]
    fn rejects_short_brick() {
        let data = WorldData {
            bricks: vec![(GridIndex(0), BrickData::Composite(vec![Foxel::Red.encode(); 10]))],
        };
        assert!(matches!(
            FoxelWorld::from_data(data),
            Err(PersistenceError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn rejects_grid_index_outside_world() {
        let data = WorldData {
            bricks: vec![(GridIndex(-5), BrickData::Solid(Foxel::Red.encode()))],
        };
        assert!(matches!(
            FoxelWorld::from_data(data),
            Err(PersistenceError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn uniform_composite_loads_as_solid() {
        let blue = vec![Foxel::Blue.encode(); BRICK_VOLUME];
        let data = WorldData {
            bricks: vec![(GridIndex(3), BrickData::Composite(blue))],
        };
        let world = FoxelWorld::from_data(data).unwrap();
        assert_eq!(world.composite_brick_count(), 0);
        assert_eq!(world.solid_brick_count(), 1);
    }

    #[test]
    fn composite_brick_costs_one_byte_per_foxel() {
        let mut world = FoxelWorld::new();
        world.set(BlockPos::ORIGIN, Foxel::Red).unwrap();
        let size = bincode::serialized_size(&world.to_data()).unwrap();
        // outer vec length, grid index, variant tag, foxel vec length
        assert_eq!(size, 8 + 8 + 4 + 8 + BRICK_VOLUME as u64);
    }

    #[test]
    fn unknown_foxel_byte_loads_as_invalid() {
        let (grid, _) = crate::lattice::decompose(BlockPos::ORIGIN);
        let mut codes = vec![Foxel::Air.encode(); BRICK_VOLUME];
        codes[0] = 42;
        let data = WorldData {
            bricks: vec![(grid, BrickData::Composite(codes))],
        };
        let world = FoxelWorld::from_data(data).unwrap();
        assert_eq!(world.get(BlockPos::ORIGIN), Ok(Foxel::Invalid));
        assert_eq!(world.get(BlockPos::new(1, 0, 0, 0)), Ok(Foxel::Air));
    }

    #[test]
    fn rejects_duplicate_grid_index() {
        let data = WorldData {
            bricks: vec![
                (GridIndex(7), BrickData::Solid(Foxel::Red.encode())),
                (GridIndex(7), BrickData::Solid(Foxel::Blue.encode())),
            ],
        };
        let err = FoxelWorld::from_data(data).unwrap_err();
        assert!(matches!(err, PersistenceError::CorruptSnapshot(msg) if msg.contains("twice")));
    }
}
