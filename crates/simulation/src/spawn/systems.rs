use bevy::prelude::*;

use crate::collision::{CollisionLayer, CollisionWorld, StaticCollider};
use crate::config::{PLANTER_RAY_FAR, PLANTER_RAY_LIFT};
use crate::fauna::{random_member, FaunaSpawnEvent, FlockCluster, FlockTuning};
use crate::plants::PlantLifecycleEvent;
use crate::player::PlayerPose;
use crate::sim_rng::SimRng;
use crate::GardenSet;

use super::helpers::{cluster_volume, looking_away, random_butterfly};
use super::types::PlanterState;

/// System: check the geometry of newly added planters. Planters without a
/// usable collider on the planter layer are disabled with a warning.
pub fn validate_planters(
    mut planters: Query<(Entity, &mut PlanterState, Option<&StaticCollider>, &Transform), Added<PlanterState>>,
) {
    for (entity, mut state, collider, transform) in &mut planters {
        let usable = collider.is_some_and(|c| {
            c.layer == CollisionLayer::Planter && c.world_box(transform).has_ground_area()
        });
        if !usable {
            warn!(
                "Planter {:?} has no usable collider on the planter layer; fauna disabled there",
                entity
            );
            state.disabled = true;
        }
    }
}

/// System: attribute plants that finished growing this frame to the planter
/// below them.
pub fn track_grown_plants(
    mut lifecycle_events: EventReader<PlantLifecycleEvent>,
    collisions: CollisionWorld,
    mut planters: Query<&mut PlanterState>,
) {
    for event in lifecycle_events.read() {
        let PlantLifecycleEvent::Grown { position, .. } = event else {
            continue;
        };
        let origin = *position + Vec3::Y * PLANTER_RAY_LIFT;
        let Some(hit) = collisions.raycast_down(origin, PLANTER_RAY_FAR, CollisionLayer::Planter)
        else {
            continue;
        };
        let Ok(mut state) = planters.get_mut(hit.entity) else {
            continue;
        };
        if state.disabled {
            continue;
        }
        state.record_plant(*position);
    }
}

/// System: serve pending spawns of planters the player is looking away from.
pub fn spawn_pending_fauna(
    mut commands: Commands,
    player: Option<Res<PlayerPose>>,
    mut planters: Query<(Entity, &mut PlanterState, &Transform)>,
    mut clusters: Query<&mut FlockCluster>,
    mut rng: ResMut<SimRng>,
    mut spawn_events: EventWriter<FaunaSpawnEvent>,
) {
    let Some(player) = player else {
        return;
    };

    for (planter, mut state, transform) in &mut planters {
        if state.disabled || !state.has_pending_spawn() {
            continue;
        }
        let planter_center = transform.translation;
        if !looking_away(&player, planter_center) {
            continue;
        }
        let Some(volume) = cluster_volume(&state.detected_plants, planter_center) else {
            continue;
        };

        if state.pending_first_spawn {
            let tuning = FlockTuning::butterflies();
            let species = random_butterfly(&mut rng);
            let member = random_member(&volume, &tuning, species, &mut rng);
            let mut cluster = FlockCluster::new(volume, tuning);
            cluster.members.push(member);
            let cluster_entity = commands.spawn(cluster).id();

            state.cluster = Some(cluster_entity);
            state.pending_first_spawn = false;
            info!(
                "Planter {:?}: {} cluster created with {} plants",
                planter,
                species.name(),
                state.detected_plants.len()
            );
            spawn_events.send(FaunaSpawnEvent {
                cluster: cluster_entity,
                planter,
                species,
                position: member.position,
            });
        } else if state.pending_member_add {
            let Some(cluster_entity) = state.cluster else {
                state.pending_member_add = false;
                continue;
            };
            let Ok(mut cluster) = clusters.get_mut(cluster_entity) else {
                // Spawned this frame; served once the cluster exists.
                continue;
            };
            let species = random_butterfly(&mut rng);
            cluster.volume = volume;
            let member = random_member(&volume, &cluster.tuning, species, &mut rng);
            cluster.members.push(member);

            state.pending_member_add = false;
            info!(
                "Planter {:?}: {} joined, cluster now has {} members",
                planter,
                species.name(),
                cluster.members.len()
            );
            spawn_events.send(FaunaSpawnEvent {
                cluster: cluster_entity,
                planter,
                species,
                position: member.position,
            });
        }
    }
}

pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (validate_planters, track_grown_plants, spawn_pending_fauna)
                .chain()
                .in_set(GardenSet::Detection),
        );
    }
}
