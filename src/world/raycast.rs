use crate::constants::{WORLD_MAX_COORD, WORLD_MIN_COORD};
use crate::lattice::BlockPos;
use crate::world::grid::FoxelWorld;
use bevy::prelude::*;

/// First opaque foxel found along a ray.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct RayHit {
    pub pos: BlockPos,
    /// Unit axis vector on the face the ray entered through; zero when the
    /// ray starts inside the hit foxel.
    pub normal: IVec4,
    pub distance: f32,
}

/// Walk the foxel grid from `origin` along `direction` and return the first
/// opaque foxel within `max_distance`.
///
/// Amanatides & Woo traversal generalised to four axes. Cells outside the
/// world count as empty, and the walk stops once the ray has left the world
/// for good, so an infinite or NaN `max_distance` means "until the ray exits".
pub fn raycast_foxels(
    origin: Vec4,
    direction: Vec4,
    world: &FoxelWorld,
    max_distance: f32,
) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec4::ZERO {
        return None;
    }

    let mut cell = origin.floor().as_ivec4();
    let mut step = IVec4::ZERO;
    let mut t_max = Vec4::splat(f32::INFINITY);
    let mut t_delta = Vec4::splat(f32::INFINITY);

    for axis in 0..4 {
        let d = dir[axis];
        if d > 0.0 {
            step[axis] = 1;
            t_max[axis] = (cell[axis] as f32 + 1.0 - origin[axis]) / d;
            t_delta[axis] = 1.0 / d;
        } else if d < 0.0 {
            step[axis] = -1;
            t_max[axis] = (origin[axis] - cell[axis] as f32) / -d;
            t_delta[axis] = -1.0 / d;
        }
    }

    if is_opaque(world, cell) {
        return Some(RayHit {
            pos: BlockPos(cell),
            normal: IVec4::ZERO,
            distance: 0.0,
        });
    }

    let max_distance = if max_distance.is_nan() {
        f32::INFINITY
    } else {
        max_distance
    };

    loop {
        if leaving_world(cell, step) {
            return None;
        }

        let axis = min_axis(t_max);
        let distance = t_max[axis];
        if distance > max_distance {
            return None;
        }

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if is_opaque(world, cell) {
            let mut normal = IVec4::ZERO;
            normal[axis] = -step[axis];
            return Some(RayHit {
                pos: BlockPos(cell),
                normal,
                distance,
            });
        }
    }
}

fn is_opaque(world: &FoxelWorld, cell: IVec4) -> bool {
    world
        .get(BlockPos(cell))
        .is_ok_and(|foxel| !foxel.is_transparent())
}

/// True when some axis is past the world bounds and not heading back in.
fn leaving_world(cell: IVec4, step: IVec4) -> bool {
    (0..4).any(|axis| {
        (cell[axis] > WORLD_MAX_COORD && step[axis] >= 0)
            || (cell[axis] < WORLD_MIN_COORD && step[axis] <= 0)
    })
}

fn min_axis(t: Vec4) -> usize {
    let mut best = 0;
    for axis in 1..4 {
        if t[axis] < t[best] {
            best = axis;
        }
    }
    best
}
