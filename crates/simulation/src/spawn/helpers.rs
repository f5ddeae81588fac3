use bevy::prelude::*;

use crate::config::{
    CLUSTER_MAX_Y_LIFT, CLUSTER_MIN_HORIZONTAL_EXTENT, CLUSTER_MIN_Y_LIFT,
    CLUSTER_OVERSIZE_EXTENT, LOOK_AWAY_ANGLE_RADIAN,
};
use crate::fauna::{ClusterVolume, FaunaSpecies};
use crate::player::PlayerPose;
use crate::sim_rng::SimRng;

/// Flight volume above the plants of a planter.
///
/// The box around the plants is lifted (bottom by `CLUSTER_MIN_Y_LIFT`, top
/// by `CLUSTER_MAX_Y_LIFT`). Boxes oversized on both horizontal axes are
/// recentred on the planter and halved, then horizontal extents are floored
/// at `CLUSTER_MIN_HORIZONTAL_EXTENT`. Returns `None` without plants.
pub fn cluster_volume(plants: &[Vec3], planter_center: Vec3) -> Option<ClusterVolume> {
    let first = *plants.first()?;
    let (mut min, mut max) = plants
        .iter()
        .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
    min.y += CLUSTER_MIN_Y_LIFT;
    max.y += CLUSTER_MAX_Y_LIFT;

    let mut center = (min + max) * 0.5;
    let mut outer = max - min;

    if outer.x > CLUSTER_OVERSIZE_EXTENT && outer.z > CLUSTER_OVERSIZE_EXTENT {
        center.x = planter_center.x;
        center.z = planter_center.z;
        outer.x /= 2.0;
        outer.z /= 2.0;
    }

    outer.x = outer.x.max(CLUSTER_MIN_HORIZONTAL_EXTENT);
    outer.z = outer.z.max(CLUSTER_MIN_HORIZONTAL_EXTENT);

    Some(ClusterVolume::new(center, outer))
}

/// Whether the player faces far enough away from `target` for fauna to
/// appear there unseen. Degenerate directions never allow a spawn.
pub fn looking_away(player: &PlayerPose, target: Vec3) -> bool {
    player
        .angle_to(target)
        .is_some_and(|angle| angle > LOOK_AWAY_ANGLE_RADIAN)
}

/// Even odds between the two butterfly species.
pub fn random_butterfly(rng: &mut SimRng) -> FaunaSpecies {
    if rng.coin_flip() {
        FaunaSpecies::BlueButterfly
    } else {
        FaunaSpecies::OrangeButterfly
    }
}
