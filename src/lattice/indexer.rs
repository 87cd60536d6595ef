use crate::constants::{
    BRICKS_ACROSS_WORLD, BRICK_VOLUME, FOXELS_ACROSS_BRICK, GRID_CENTER_OFFSET, TOTAL_BRICK_COUNT,
};
use crate::lattice::pos::BlockPos;
use ndshape::{ConstShape, ConstShape4u32};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shape of the coarse grid. Linearised as `[w, z, y, x]` so x is the most
/// significant digit, matching [`decompose`].
type GridShape = ConstShape4u32<
    { BRICKS_ACROSS_WORLD as u32 },
    { BRICKS_ACROSS_WORLD as u32 },
    { BRICKS_ACROSS_WORLD as u32 },
    { BRICKS_ACROSS_WORLD as u32 },
>;

/// Shape of a single brick, same digit order as [`GridShape`].
type BrickShape = ConstShape4u32<
    { FOXELS_ACROSS_BRICK as u32 },
    { FOXELS_ACROSS_BRICK as u32 },
    { FOXELS_ACROSS_BRICK as u32 },
    { FOXELS_ACROSS_BRICK as u32 },
>;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Axis {
    X,
    Y,
    Z,
    W,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::X, Axis::Y, Axis::Z, Axis::W];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::W => "w",
        };
        f.write_str(name)
    }
}

/// Packed coarse position of a brick. Nominally in `[0, 32^4)`, but
/// [`decompose`] can produce values outside that band for far-away input.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct GridIndex(pub i64);

/// Packed offset of a foxel inside its brick, always in `[0, 8^4)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct FoxelIndex(pub u16);

impl GridIndex {
    /// Slot in a dense brick array, if this index lies in the nominal band.
    pub fn slot(self) -> Option<usize> {
        usize::try_from(self.0)
            .ok()
            .filter(|slot| *slot < TOTAL_BRICK_COUNT)
    }

    /// Lowest-corner foxel of the brick this index names.
    pub fn min_corner(self) -> Result<BlockPos, LatticeError> {
        recompose(self, FoxelIndex(0))
    }
}

impl FoxelIndex {
    pub fn from_offsets(offsets: [u32; 4]) -> Self {
        let [x, y, z, w] = offsets;
        Self(BrickShape::linearize([w, z, y, x]) as u16)
    }

    /// Per-axis offsets inside the brick, `x, y, z, w` order.
    pub fn offsets(self) -> [u32; 4] {
        let [w, z, y, x] = BrickShape::delinearize(u32::from(self.0));
        [x, y, z, w]
    }

    pub fn slot(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FoxelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    #[error("{pos} is outside the world: {axis} brick digit {coarse} not in [0, {max})", max = BRICKS_ACROSS_WORLD)]
    OutsideWorld { pos: BlockPos, axis: Axis, coarse: i32 },
    #[error("grid index {0} not in [0, {max})", max = TOTAL_BRICK_COUNT)]
    GridIndexOutOfRange(GridIndex),
    #[error("foxel index {0} not in [0, {max})", max = BRICK_VOLUME)]
    FoxelIndexOutOfRange(FoxelIndex),
}

/// Split one axis value into its re-centred brick digit and its foxel offset.
///
/// Both halves use floored semantics, so `-1` lands in the brick below the
/// origin with offset 7.
pub fn decompose_axis(value: i32) -> (i32, i32) {
    let coarse = value.div_euclid(FOXELS_ACROSS_BRICK) + GRID_CENTER_OFFSET;
    let fine = value.rem_euclid(FOXELS_ACROSS_BRICK);
    (coarse, fine)
}

/// Mixed-radix packing, x first. Digits are OR-ed in rather than added;
/// the two agree only while every digit is in `[0, radix)`.
fn pack_digits(digits: [i64; 4], radix: i64) -> i64 {
    let last = digits.len() - 1;
    let mut packed = 0i64;
    for (i, digit) in digits.into_iter().enumerate() {
        packed |= digit;
        if i != last {
            packed *= radix;
        }
    }
    packed
}

/// Convert a lattice position into its (grid, foxel) index pair.
///
/// Total over every input. Positions outside the world still get a grid
/// index, which may alias another brick or fall outside `[0, 32^4)`; use
/// [`try_decompose`] when that matters.
pub fn decompose(pos: BlockPos) -> (GridIndex, FoxelIndex) {
    let mut coarse = [0i64; 4];
    let mut fine = [0i64; 4];
    for (axis, value) in pos.axes().into_iter().enumerate() {
        let (c, f) = decompose_axis(value);
        coarse[axis] = i64::from(c);
        fine[axis] = i64::from(f);
    }

    let grid = pack_digits(coarse, i64::from(BRICKS_ACROSS_WORLD));
    // Every fine digit is in [0, 8), so the packed value is below 8^4.
    let foxel = pack_digits(fine, i64::from(FOXELS_ACROSS_BRICK)) as u16;
    (GridIndex(grid), FoxelIndex(foxel))
}

/// Positions the demo binary prints: the origin and one unit step per axis.
pub const SAMPLE_POSITIONS: [BlockPos; 5] = [
    BlockPos::new(0, 0, 0, 0),
    BlockPos::new(1, 0, 0, 0),
    BlockPos::new(0, 1, 0, 0),
    BlockPos::new(0, 0, 1, 0),
    BlockPos::new(0, 0, 0, 1),
];

/// One demo output line, e.g. `(1, 0, 0, 0) -> 541200, 512`.
pub fn describe_decomposition(pos: BlockPos) -> String {
    let (grid, foxel) = decompose(pos);
    format!("{pos} -> {grid}, {foxel}")
}

/// Like [`decompose`], but rejects positions whose brick digit leaves the grid.
pub fn try_decompose(pos: BlockPos) -> Result<(GridIndex, FoxelIndex), LatticeError> {
    for axis in Axis::ALL {
        let (coarse, _) = decompose_axis(pos.axes()[axis.index()]);
        if !(0..BRICKS_ACROSS_WORLD).contains(&coarse) {
            return Err(LatticeError::OutsideWorld { pos, axis, coarse });
        }
    }
    Ok(decompose(pos))
}

/// Inverse of [`try_decompose`].
pub fn recompose(grid: GridIndex, foxel: FoxelIndex) -> Result<BlockPos, LatticeError> {
    let slot = grid.slot().ok_or(LatticeError::GridIndexOutOfRange(grid))?;
    if foxel.slot() >= BRICK_VOLUME {
        return Err(LatticeError::FoxelIndexOutOfRange(foxel));
    }

    let [cw, cz, cy, cx] = GridShape::delinearize(slot as u32);
    let coarse = [cx, cy, cz, cw];
    let fine = foxel.offsets();

    let axes: [i32; 4] = std::array::from_fn(|axis| {
        let brick = coarse[axis] as i32 - GRID_CENTER_OFFSET;
        brick * FOXELS_ACROSS_BRICK + fine[axis] as i32
    });
    Ok(BlockPos::from(axes))
}
