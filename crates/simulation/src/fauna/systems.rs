use bevy::prelude::*;

use crate::garden_clock::GardenClock;
use crate::player::PlayerPose;
use crate::GardenSet;

use super::steering::{cluster_visible, tick_cluster};
use super::types::{FaunaSpawnEvent, FlockCluster};

/// System: steer every cluster the player can currently see.
pub fn move_flocks(
    clock: Res<GardenClock>,
    player: Option<Res<PlayerPose>>,
    mut clusters: Query<&mut FlockCluster>,
) {
    if clock.delta <= 0.0 {
        return;
    }
    let player_ground = player.map(|pose| pose.ground_position());
    for mut cluster in &mut clusters {
        if !cluster_visible(&cluster.observation_points, player_ground) {
            continue;
        }
        tick_cluster(&mut cluster, clock.elapsed, clock.delta);
    }
}

pub struct FaunaPlugin;

impl Plugin for FaunaPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FaunaSpawnEvent>()
            .add_systems(Update, move_flocks.in_set(GardenSet::Fauna));
    }
}
