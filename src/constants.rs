// Lattice radices
pub const BRICKS_ACROSS_WORLD: i32 = 32;
pub const FOXELS_ACROSS_BRICK: i32 = 8;

// Coarse digits are re-centred so the origin sits mid-grid
pub const GRID_CENTER_OFFSET: i32 = BRICKS_ACROSS_WORLD / 2;

pub const BRICK_VOLUME: usize = (FOXELS_ACROSS_BRICK as usize).pow(4);
pub const TOTAL_BRICK_COUNT: usize = (BRICKS_ACROSS_WORLD as usize).pow(4);

// World bounds (inclusive) implied by the grid radix
pub const WORLD_MIN_COORD: i32 = -GRID_CENTER_OFFSET * FOXELS_ACROSS_BRICK;
pub const WORLD_MAX_COORD: i32 = GRID_CENTER_OFFSET * FOXELS_ACROSS_BRICK - 1;

// Defaults (overridden by config)
pub const DEFAULT_SAMPLE_ARM_LENGTH: i32 = 10;
pub const DEFAULT_WORLD_SAVE_PATH: &str = "foxel_world.bin";
