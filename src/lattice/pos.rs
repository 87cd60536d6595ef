use bevy::prelude::*;
use std::fmt;
use std::ops::Deref;

/// Coordinate of a single foxel in the 4D lattice.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BlockPos(pub IVec4);

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos(IVec4::ZERO);

    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self(IVec4::new(x, y, z, w))
    }

    /// Axis values in `x, y, z, w` order.
    pub fn axes(&self) -> [i32; 4] {
        self.0.to_array()
    }

    pub fn offset(&self, delta: IVec4) -> Self {
        Self(self.0 + delta)
    }
}

impl Deref for BlockPos {
    type Target = IVec4;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<[i32; 4]> for BlockPos {
    fn from(axes: [i32; 4]) -> Self {
        Self(IVec4::from_array(axes))
    }
}

impl From<(i32, i32, i32, i32)> for BlockPos {
    fn from((x, y, z, w): (i32, i32, i32, i32)) -> Self {
        Self::new(x, y, z, w)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}
