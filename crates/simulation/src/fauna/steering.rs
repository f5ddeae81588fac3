use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::config::VERTICAL_NUDGE_RADIAN;
use crate::sim_rng::SimRng;

use super::types::{
    ClusterVolume, FaunaSpecies, FlockCluster, FlockMember, FlockTuning, ObservationPoint,
};

// =============================================================================
// Vector helpers
// =============================================================================

/// Elevation of `direction` above the ground plane, positive upward.
pub fn vertical_angle(direction: Vec3) -> f32 {
    let length = direction.length();
    if length <= f32::EPSILON {
        return 0.0;
    }
    (direction.y / length).clamp(-1.0, 1.0).asin()
}

/// Tilt `direction` up (positive angle) or down in its own vertical plane.
/// Vertical directions have no such plane and are returned unchanged.
pub fn pitch(direction: Vec3, angle: f32) -> Vec3 {
    match direction.cross(Vec3::Y).try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, angle) * direction,
        None => direction,
    }
}

fn yaw(direction: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * direction
}

fn roll(direction: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_z(angle) * direction
}

/// Orientation of a member travelling along `direction`: forward (-Z) points
/// along it, or against it for models authored backwards.
pub fn member_rotation(direction: Vec3, negate: bool) -> Quat {
    let facing = if negate { -direction } else { direction };
    Transform::IDENTITY.looking_to(facing, Vec3::Y).rotation
}

// =============================================================================
// Steering rules
// =============================================================================

/// Result of the containment rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Containment {
    pub direction: Vec3,
    pub corrected_y: bool,
}

/// Turn `direction` back toward the inner box.
///
/// Leaving along X or Z yaws by `turn` about the world Y axis, with the sign
/// chosen from where the member is heading on the other horizontal axis; an
/// X correction suppresses the Z one. Leaving along Y rolls about the world Z
/// axis, only for volumes with height.
pub fn contain(position: Vec3, direction: Vec3, volume: &ClusterVolume, turn: f32) -> Containment {
    let next = position + direction;
    let mut out = direction;
    let mut corrected_x = false;
    let mut corrected_y = false;

    if position.x < volume.inner_min.x {
        let angle = if position.z > next.z { -turn } else { turn };
        out = yaw(out, angle);
        corrected_x = true;
    } else if position.x > volume.inner_max.x {
        let angle = if position.z > next.z { turn } else { -turn };
        out = yaw(out, angle);
        corrected_x = true;
    }

    if !volume.is_flat() {
        if position.y < volume.inner_min.y {
            let angle = if position.x > next.x { -turn } else { turn };
            out = roll(out, angle);
            corrected_y = true;
        } else if position.y > volume.inner_max.y {
            let angle = if position.x > next.x { turn } else { -turn };
            out = roll(out, angle);
            corrected_y = true;
        }
    }

    if !corrected_x {
        if position.z < volume.inner_min.z {
            let angle = if position.x > next.x { turn } else { -turn };
            out = yaw(out, angle);
        } else if position.z > volume.inner_max.z {
            let angle = if position.x > next.x { -turn } else { turn };
            out = yaw(out, angle);
        }
    }

    Containment {
        direction: out,
        corrected_y,
    }
}

/// Change to `direction` from the periodic path wobble at time `now`.
/// Pitch and yaw contributions are computed from the same input and summed.
pub fn variation(direction: Vec3, member: &FlockMember, tuning: &FlockTuning, now: f32) -> Vec3 {
    let mut delta = Vec3::ZERO;

    if tuning.vertical_variation_factor != 0.0 {
        let phase = TAU * tuning.vertical_variation_frequency * (now + member.vertical_offset);
        let angle = phase.sin() * tuning.vertical_variation_factor;
        delta += pitch(direction, angle) - direction;
    }

    if tuning.horizontal_variation_factor != 0.0 {
        let phase =
            TAU * tuning.horizontal_variation_frequency * (now + member.horizontal_offset);
        let angle = phase.sin() * tuning.horizontal_variation_factor;
        delta += yaw(direction, angle) - direction;
    }

    delta
}

/// Keep a direction inside `[min_y_radian, max_y_radian]` by nudging it one
/// fixed step per tick.
pub fn clamp_vertical(direction: Vec3, tuning: &FlockTuning) -> Vec3 {
    let angle = vertical_angle(direction);
    if angle > tuning.max_y_radian {
        pitch(direction, -VERTICAL_NUDGE_RADIAN)
    } else if angle < tuning.min_y_radian {
        pitch(direction, VERTICAL_NUDGE_RADIAN)
    } else {
        direction
    }
}

/// Advance one member by `dt` seconds at session time `now`.
///
/// Turns are applied per tick, translation scales with `dt`. A zero step
/// leaves the member untouched.
pub fn steer_member(
    member: &mut FlockMember,
    volume: &ClusterVolume,
    tuning: &FlockTuning,
    now: f32,
    dt: f32,
) {
    if dt <= 0.0 {
        return;
    }

    let contained = contain(member.position, member.direction, volume, tuning.turn_radian);
    let mut direction = contained.direction;
    direction += variation(direction, member, tuning, now);
    let mut direction = direction.try_normalize().unwrap_or(member.direction);

    if !contained.corrected_y && !volume.is_flat() {
        direction = clamp_vertical(direction, tuning);
    }

    member.position += direction * member.speed * dt;
    member.rotation = member_rotation(direction, tuning.negate_direction);
    member.direction = direction;
}

/// Advance every member of a cluster.
pub fn tick_cluster(cluster: &mut FlockCluster, now: f32, dt: f32) {
    let FlockCluster {
        volume,
        tuning,
        members,
        ..
    } = cluster;
    for member in members.iter_mut() {
        steer_member(member, volume, tuning, now, dt);
    }
}

/// Whether a cluster should move this tick. Clusters without observation
/// points always move; otherwise the player, projected onto the ground, must
/// be inside the trigger radius of the nearest point.
pub fn cluster_visible(points: &[ObservationPoint], player_ground: Option<Vec3>) -> bool {
    if points.is_empty() {
        return true;
    }
    let Some(player) = player_ground else {
        return false;
    };
    points
        .iter()
        .min_by(|a, b| {
            a.position
                .distance_squared(player)
                .total_cmp(&b.position.distance_squared(player))
        })
        .is_some_and(|nearest| {
            nearest.position.distance_squared(player) < nearest.trigger_radius * nearest.trigger_radius
        })
}

// =============================================================================
// Spawning members
// =============================================================================

/// A new member at a random spot of the inner box with a random heading,
/// pitch (volumes with height only), speed and wobble phases.
pub fn random_member(
    volume: &ClusterVolume,
    tuning: &FlockTuning,
    species: FaunaSpecies,
    rng: &mut SimRng,
) -> FlockMember {
    let position = Vec3::new(
        volume.inner_min.x + rng.unit() * volume.inner_dims.x,
        volume.inner_min.y + rng.unit() * volume.inner_dims.y,
        volume.inner_min.z + rng.unit() * volume.inner_dims.z,
    );

    let heading = rng.between(0.0, TAU);
    let mut direction = Vec3::new(heading.cos(), 0.0, heading.sin());
    if !volume.is_flat() {
        let angle = rng.between(tuning.min_y_radian, tuning.max_y_radian);
        direction = pitch(direction, angle);
    }

    let speed = rng.between(tuning.min_speed, tuning.max_speed);

    let vertical_offset = if tuning.vertical_variation_factor != 0.0 {
        rng.unit() / tuning.vertical_variation_frequency
    } else {
        0.0
    };
    let horizontal_offset = if tuning.horizontal_variation_factor != 0.0 {
        rng.unit() / tuning.horizontal_variation_frequency
    } else {
        0.0
    };

    FlockMember {
        species,
        position,
        rotation: member_rotation(direction, tuning.negate_direction),
        direction,
        speed,
        vertical_offset,
        horizontal_offset,
    }
}
