use std::collections::HashSet;

use bevy::prelude::*;

use crate::collision::{CollisionLayer, CollisionWorld, StaticCollider};
use crate::config::{
    PLANT_COLLIDER_HALF_EXTENTS, PLANT_COLLIDER_OFFSET, PROXIMITY_COLLIDER_HALF_EXTENTS,
};
use crate::garden_clock::GardenClock;
use crate::sim_rng::SimRng;
use crate::species::{SpeciesProfileTable, DEFAULT_SPECIES};
use crate::GardenSet;

use super::helpers::{
    advance_growth, advance_shrink, begin_shrink, first_unknown_species, roll_plant, water,
};
use super::types::{
    GardenSaveState, Lifecycle, Persistable, PickPlant, PlantInstance, PlantLifecycleEvent,
    ProximityCollider, RenderSync, SceneLighting, SeedLanded, WateringCan,
};

/// Spawn a plant entity plus its proximity helper collider. Returns the plant.
pub fn spawn_plant(
    commands: &mut Commands,
    mut instance: PlantInstance,
    position: Vec3,
    rotation: Quat,
) -> Entity {
    let plant = commands.spawn_empty().id();
    let proximity = commands
        .spawn((
            ProximityCollider { plant },
            StaticCollider::new(PROXIMITY_COLLIDER_HALF_EXTENTS, CollisionLayer::Plant)
                .with_offset(Vec3::new(0.0, PROXIMITY_COLLIDER_HALF_EXTENTS.y, 0.0)),
            Transform::from_translation(position),
        ))
        .id();
    instance.proximity_collider = Some(proximity);

    let transform = Transform {
        translation: position,
        rotation,
        scale: instance.rendered_scale(),
    };
    commands.entity(plant).insert((
        instance,
        transform,
        StaticCollider::new(PLANT_COLLIDER_HALF_EXTENTS, CollisionLayer::Plant)
            .with_offset(PLANT_COLLIDER_OFFSET),
        RenderSync { dirty: true },
    ));
    plant
}

/// Map a hit entity (plant or proximity collider) to its plant.
fn resolve_plant(target: Entity, proximity: &Query<&ProximityCollider>) -> Entity {
    proximity.get(target).map(|p| p.plant).unwrap_or(target)
}

// =============================================================================
// Input
// =============================================================================

/// System: turn landed seeds into growing plants. Unknown species grow with
/// the default profile; each unknown name is reported once.
pub fn plant_landed_seeds(
    mut commands: Commands,
    mut seeds: EventReader<SeedLanded>,
    table: Res<SpeciesProfileTable>,
    mut rng: ResMut<SimRng>,
    mut reported: Local<HashSet<String>>,
    mut lifecycle_events: EventWriter<PlantLifecycleEvent>,
) {
    for seed in seeds.read() {
        if first_unknown_species(&table, &mut reported, &seed.species) {
            warn!(
                "Unknown species '{}', using the '{}' profile",
                seed.species, DEFAULT_SPECIES
            );
        }
        let profile = table.lookup(&seed.species);
        let (instance, rotation) = roll_plant(&seed.species, profile, &mut rng);
        let plant = spawn_plant(&mut commands, instance, seed.position, rotation);
        lifecycle_events.send(PlantLifecycleEvent::Planted {
            plant,
            position: seed.position,
        });
    }
}

/// System: start shrinking picked plants. Picks of plants that are not fully
/// grown are ignored.
pub fn pick_plants(
    mut commands: Commands,
    mut picks: EventReader<PickPlant>,
    table: Res<SpeciesProfileTable>,
    proximity: Query<&ProximityCollider>,
    mut plants: Query<&mut PlantInstance>,
    mut save_state: ResMut<GardenSaveState>,
) {
    for pick in picks.read() {
        let plant_entity = resolve_plant(pick.target, &proximity);
        let Ok(mut plant) = plants.get_mut(plant_entity) else {
            debug!("Pick ignored: {:?} is not a plant", pick.target);
            continue;
        };
        if !plant.pickable() {
            debug!(
                "Pick ignored: plant {:?} is {:?}",
                plant_entity, plant.lifecycle
            );
            continue;
        }

        let profile = table.lookup(&plant.species);
        begin_shrink(&mut plant, profile);
        if let Some(helper) = plant.proximity_collider.take() {
            commands.entity(helper).despawn();
        }
        commands.entity(plant_entity).remove::<Persistable>();
        save_state.update_pending = true;
    }
}

/// System: grow grown plants touched by the active watering can.
pub fn water_plants(
    clock: Res<GardenClock>,
    can: Res<WateringCan>,
    collisions: CollisionWorld,
    proximity: Query<&ProximityCollider>,
    mut plants: Query<&mut PlantInstance>,
) {
    if !can.active || clock.delta <= 0.0 {
        return;
    }

    let touched: HashSet<Entity> = collisions
        .sphere_query(can.center, can.radius, CollisionLayer::Plant)
        .into_iter()
        .map(|hit| resolve_plant(hit, &proximity))
        .collect();

    for entity in touched {
        let Ok(mut plant) = plants.get_mut(entity) else {
            continue;
        };
        if plant.lifecycle == Lifecycle::Grown {
            water(&mut plant, clock.delta);
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// System: advance every growing plant and promote the finished ones.
pub fn advance_growing_plants(
    mut commands: Commands,
    clock: Res<GardenClock>,
    mut plants: Query<(Entity, &mut PlantInstance, &Transform)>,
    mut lighting: ResMut<SceneLighting>,
    mut save_state: ResMut<GardenSaveState>,
    mut lifecycle_events: EventWriter<PlantLifecycleEvent>,
) {
    for (entity, mut plant, transform) in &mut plants {
        if plant.lifecycle != Lifecycle::Growing {
            continue;
        }
        lighting.needs_fast_update = true;
        if advance_growth(&mut plant, clock.delta) {
            commands.entity(entity).insert(Persistable);
            save_state.update_pending = true;
            lifecycle_events.send(PlantLifecycleEvent::Grown {
                plant: entity,
                position: transform.translation,
            });
        }
    }
}

/// System: advance every shrinking plant and remove the finished ones along
/// with their colliders.
pub fn advance_shrinking_plants(
    mut commands: Commands,
    clock: Res<GardenClock>,
    mut plants: Query<(Entity, &mut PlantInstance, &Transform)>,
    mut lighting: ResMut<SceneLighting>,
    mut save_state: ResMut<GardenSaveState>,
    mut lifecycle_events: EventWriter<PlantLifecycleEvent>,
) {
    for (entity, mut plant, transform) in &mut plants {
        if plant.lifecycle != Lifecycle::Shrinking {
            continue;
        }
        lighting.needs_fast_update = true;
        if advance_shrink(&mut plant, clock.delta) {
            if let Some(helper) = plant.proximity_collider.take() {
                commands.entity(helper).despawn();
            }
            commands.entity(entity).despawn();
            save_state.update_pending = true;
            debug!("Plant {:?} ({}) removed", entity, plant.species);
            lifecycle_events.send(PlantLifecycleEvent::Removed {
                plant: entity,
                position: transform.translation,
            });
        }
    }
}

/// System: push changed plant state into the transform and flag the
/// instance for the renderer.
pub fn publish_plant_scales(
    mut plants: Query<(&PlantInstance, &mut Transform, &mut RenderSync), Changed<PlantInstance>>,
) {
    for (plant, mut transform, mut render) in &mut plants {
        transform.scale = plant.rendered_scale();
        render.mark();
    }
}

pub struct PlantsPlugin;

impl Plugin for PlantsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneLighting>()
            .init_resource::<GardenSaveState>()
            .init_resource::<WateringCan>()
            .add_event::<SeedLanded>()
            .add_event::<PickPlant>()
            .add_event::<PlantLifecycleEvent>()
            .add_systems(
                Update,
                (plant_landed_seeds, pick_plants, water_plants)
                    .chain()
                    .in_set(GardenSet::Input),
            )
            .add_systems(
                Update,
                (
                    advance_growing_plants,
                    advance_shrinking_plants,
                    publish_plant_scales,
                )
                    .chain()
                    .in_set(GardenSet::Lifecycle),
            );
    }
}
