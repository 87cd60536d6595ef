pub mod indexer;
pub mod pos;

pub use indexer::{
    Axis, FoxelIndex, GridIndex, LatticeError, SAMPLE_POSITIONS, decompose, decompose_axis,
    describe_decomposition, recompose, try_decompose,
};
pub use pos::BlockPos;
