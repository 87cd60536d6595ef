use crate::lattice::{BlockPos, FoxelIndex, GridIndex, LatticeError, try_decompose};
use crate::world::brick::Brick;
use crate::world::foxel::Foxel;
use bevy::prelude::*;
use std::collections::HashMap;

/// Storage for one grid cell.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BrickSlot {
    /// The whole brick is a single foxel.
    Solid(Foxel),
    Composite(Box<Brick>),
}

/// Borrowed view of a grid cell.
#[derive(Copy, Clone, Debug)]
pub enum BrickRef<'a> {
    Solid(Foxel),
    Composite(&'a Brick),
}

impl BrickRef<'_> {
    pub fn get(&self, index: FoxelIndex) -> Foxel {
        match self {
            BrickRef::Solid(foxel) => *foxel,
            BrickRef::Composite(brick) => brick.get(index),
        }
    }
}

/// Sparse grid of bricks. Cells without an entry are solid air.
#[derive(Resource, Clone, Default, Debug)]
pub struct FoxelWorld {
    bricks: HashMap<GridIndex, BrickSlot>,
}

impl FoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: BlockPos) -> Result<Foxel, LatticeError> {
        let (grid, index) = try_decompose(pos)?;
        Ok(self.brick(grid).get(index))
    }

    /// Returns the previous foxel.
    pub fn set(&mut self, pos: BlockPos, foxel: Foxel) -> Result<Foxel, LatticeError> {
        let (grid, index) = try_decompose(pos)?;
        let slot = self
            .bricks
            .entry(grid)
            .or_insert(BrickSlot::Solid(Foxel::Air));

        let previous = match slot {
            BrickSlot::Solid(current) => {
                let current = *current;
                if current != foxel {
                    let mut brick = Brick::filled(current);
                    brick.set(index, foxel);
                    *slot = BrickSlot::Composite(Box::new(brick));
                    log::trace!("split brick {grid} ({current:?}) at {pos}");
                }
                current
            }
            BrickSlot::Composite(brick) => {
                let previous = brick.set(index, foxel);
                if let Some(uniform) = brick.uniform() {
                    *slot = BrickSlot::Solid(uniform);
                    log::trace!("collapsed brick {grid} to {uniform:?}");
                }
                previous
            }
        };

        if matches!(slot, BrickSlot::Solid(Foxel::Air)) {
            self.bricks.remove(&grid);
        }
        Ok(previous)
    }

    pub fn brick(&self, grid: GridIndex) -> BrickRef<'_> {
        match self.bricks.get(&grid) {
            None => BrickRef::Solid(Foxel::Air),
            Some(BrickSlot::Solid(foxel)) => BrickRef::Solid(*foxel),
            Some(BrickSlot::Composite(brick)) => BrickRef::Composite(brick),
        }
    }

    /// Every stored (non-air) brick, in no particular order.
    pub fn iter_bricks(&self) -> impl Iterator<Item = (GridIndex, BrickRef<'_>)> {
        self.bricks.iter().map(|(grid, slot)| {
            let brick = match slot {
                BrickSlot::Solid(foxel) => BrickRef::Solid(*foxel),
                BrickSlot::Composite(brick) => BrickRef::Composite(brick),
            };
            (*grid, brick)
        })
    }

    pub fn composite_brick_count(&self) -> usize {
        self.bricks
            .values()
            .filter(|slot| matches!(slot, BrickSlot::Composite(_)))
            .count()
    }

    pub fn solid_brick_count(&self) -> usize {
        self.bricks.len() - self.composite_brick_count()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn clear(&mut self) {
        self.bricks.clear();
    }

    /// Place a whole cell at once. Solid air removes the entry.
    pub(crate) fn insert_slot(&mut self, grid: GridIndex, slot: BrickSlot) {
        match slot {
            BrickSlot::Solid(Foxel::Air) => {
                self.bricks.remove(&grid);
            }
            slot => {
                self.bricks.insert(grid, slot);
            }
        }
    }

    /// White foxel at the origin with a coloured arm along each positive axis.
    pub fn setup_sample_scene(&mut self, arm_length: i32) -> Result<(), LatticeError> {
        self.set(BlockPos::ORIGIN, Foxel::White)?;
        for v in 1..arm_length {
            self.set(BlockPos::new(v, 0, 0, 0), Foxel::Red)?;
            self.set(BlockPos::new(0, v, 0, 0), Foxel::Green)?;
            self.set(BlockPos::new(0, 0, v, 0), Foxel::Blue)?;
            self.set(BlockPos::new(0, 0, 0, v), Foxel::RB)?;
        }
        log::debug!(
            "sample scene built: {} composite bricks, {} solid bricks",
            self.composite_brick_count(),
            self.solid_brick_count()
        );
        Ok(())
    }
}
