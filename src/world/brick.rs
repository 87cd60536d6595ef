use crate::constants::BRICK_VOLUME;
use crate::lattice::FoxelIndex;
use crate::world::foxel::Foxel;

/// A dense block of `8^4` foxels, addressed by [`FoxelIndex`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Brick {
    foxels: Box<[Foxel]>,
}

impl Brick {
    pub fn filled(foxel: Foxel) -> Self {
        Self {
            foxels: vec![foxel; BRICK_VOLUME].into_boxed_slice(),
        }
    }

    /// Rebuild a brick from raw foxels. `None` unless exactly one brick's worth.
    pub fn from_foxels(foxels: Vec<Foxel>) -> Option<Self> {
        (foxels.len() == BRICK_VOLUME).then(|| Self {
            foxels: foxels.into_boxed_slice(),
        })
    }

    pub fn get(&self, index: FoxelIndex) -> Foxel {
        self.foxels[index.slot()]
    }

    /// Returns the foxel that was there before.
    pub fn set(&mut self, index: FoxelIndex, foxel: Foxel) -> Foxel {
        std::mem::replace(&mut self.foxels[index.slot()], foxel)
    }

    /// The single foxel filling this brick, if there is one.
    pub fn uniform(&self) -> Option<Foxel> {
        let first = self.foxels[0];
        self.foxels.iter().all(|f| *f == first).then_some(first)
    }

    pub fn solid_count(&self) -> usize {
        self.foxels.iter().filter(|f| !f.is_transparent()).count()
    }

    pub fn foxels(&self) -> &[Foxel] {
        &self.foxels
    }
}
