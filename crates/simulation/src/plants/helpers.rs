use std::collections::HashSet;

use bevy::prelude::*;

use crate::sim_rng::SimRng;
use crate::species::{SpeciesProfile, SpeciesProfileTable};
use crate::spring::{growth_bank, shrink_bank};

use super::types::{Lifecycle, PlantInstance};

/// Whether planting `species` should report the fallback to the default
/// profile: true only the first time an unknown name is seen.
pub fn first_unknown_species(
    table: &SpeciesProfileTable,
    reported: &mut HashSet<String>,
    species: &str,
) -> bool {
    !table.contains(species) && reported.insert(species.to_string())
}

/// Roll a new growing plant: full-grown scale (height scattered by the
/// height margin), growth channels and yaw, drawn in that order.
pub fn roll_plant(species: &str, profile: &SpeciesProfile, rng: &mut SimRng) -> (PlantInstance, Quat) {
    let mut planted_scale = Vec3::splat(profile.baseline_scale);
    planted_scale.y *= rng.around_one(profile.height_margin);

    let channels = growth_bank(profile, rng);

    let (min_yaw, max_yaw) = profile.rotation_range;
    let yaw = rng.between(min_yaw, max_yaw);

    (
        PlantInstance::new(species, planted_scale, channels),
        Quat::from_rotation_y(yaw),
    )
}

/// Advance a growing plant by `dt`. Returns true on the tick it becomes grown,
/// which is the first tick with `timer >= growth_duration + convergence_duration`.
///
/// On completion the channels freeze and `scale_multiplier` takes over from
/// the root value, so the rendered scale does not jump.
pub fn advance_growth(plant: &mut PlantInstance, dt: f32) -> bool {
    if plant.lifecycle != Lifecycle::Growing {
        return false;
    }
    plant.timer += dt;
    let timer = plant.timer;
    plant.channels.step_all(timer, dt);
    plant.publish_segments();

    if plant.timer >= plant.channels.root.total_duration {
        plant.scale_multiplier = plant.root_value();
        plant.lifecycle = Lifecycle::Grown;
        return true;
    }
    false
}

/// Switch a grown plant to shrinking. The current rendered scale becomes the
/// reference the root channel multiplies.
pub fn begin_shrink(plant: &mut PlantInstance, profile: &SpeciesProfile) -> bool {
    if !plant.pickable() {
        return false;
    }
    plant.scale_before_shrinking = plant.rendered_scale();
    plant.channels = shrink_bank(profile);
    plant.timer = 0.0;
    plant.lifecycle = Lifecycle::Shrinking;
    plant.publish_segments();
    true
}

/// Advance a shrinking plant by `dt`. Returns true once it should be removed.
pub fn advance_shrink(plant: &mut PlantInstance, dt: f32) -> bool {
    if plant.lifecycle != Lifecycle::Shrinking {
        return false;
    }
    plant.timer += dt;
    let timer = plant.timer;
    plant.channels.step_all(timer, dt);
    plant.publish_segments();
    plant.timer >= plant.channels.root.total_duration
}

/// Grow a watered plant. Only grown plants respond; returns true if the
/// multiplier changed.
pub fn water(plant: &mut PlantInstance, dt: f32) -> bool {
    if plant.lifecycle != Lifecycle::Grown || dt <= 0.0 {
        return false;
    }
    plant.scale_multiplier += dt * plant.grow_speed;
    true
}
