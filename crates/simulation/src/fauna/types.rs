use std::f32::consts::PI;

use bevy::prelude::*;

use crate::config::{CLUSTER_INNER_RATIO, REFERENCE_FRAME_RATE};

/// Kinds of flying fauna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaunaSpecies {
    BlueButterfly,
    OrangeButterfly,
}

impl FaunaSpecies {
    pub fn name(self) -> &'static str {
        match self {
            FaunaSpecies::BlueButterfly => "blue_butterfly",
            FaunaSpecies::OrangeButterfly => "orange_butterfly",
        }
    }
}

// =============================================================================
// Cluster volume
// =============================================================================

/// Box a cluster flies in. Members start turning back once they leave the
/// inner box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterVolume {
    pub center: Vec3,
    pub outer_dims: Vec3,
    pub inner_dims: Vec3,
    pub inner_min: Vec3,
    pub inner_max: Vec3,
}

impl ClusterVolume {
    /// Volume centred on `center` with the inner box `CLUSTER_INNER_RATIO`
    /// of the outer one.
    pub fn new(center: Vec3, outer_dims: Vec3) -> Self {
        Self::with_inner(center, outer_dims, outer_dims * CLUSTER_INNER_RATIO)
    }

    pub fn with_inner(center: Vec3, outer_dims: Vec3, inner_dims: Vec3) -> Self {
        let half = inner_dims * 0.5;
        Self {
            center,
            outer_dims,
            inner_dims,
            inner_min: center - half,
            inner_max: center + half,
        }
    }

    /// Flat volumes (zero outer height) keep members at their height.
    pub fn is_flat(&self) -> bool {
        self.outer_dims.y == 0.0
    }
}

// =============================================================================
// Tuning
// =============================================================================

/// Per-cluster steering parameters. Speeds are in metres per second, angles
/// in radians, frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockTuning {
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_y_radian: f32,
    pub max_y_radian: f32,
    /// Turn applied per tick while a member is outside the inner box.
    pub turn_radian: f32,
    pub vertical_variation_frequency: f32,
    pub vertical_variation_factor: f32,
    pub horizontal_variation_frequency: f32,
    pub horizontal_variation_factor: f32,
    /// Models face away from their travel direction.
    pub negate_direction: bool,
    /// Declared for content parity; members never avoid each other.
    pub avoidance_distance: f32,
    pub avoidance_factor: f32,
}

impl Default for FlockTuning {
    fn default() -> Self {
        Self {
            min_speed: 0.0,
            max_speed: 0.0,
            min_y_radian: 0.0,
            max_y_radian: 0.0,
            turn_radian: PI / 180.0,
            vertical_variation_frequency: 1.0,
            vertical_variation_factor: 0.0,
            horizontal_variation_frequency: 1.0,
            horizontal_variation_factor: 0.0,
            negate_direction: false,
            avoidance_distance: 0.0,
            avoidance_factor: 1.0,
        }
    }
}

impl FlockTuning {
    pub fn butterflies() -> Self {
        Self {
            // 0.005..0.01 m per frame at the reference frame rate.
            min_speed: 0.005 * REFERENCE_FRAME_RATE,
            max_speed: 0.01 * REFERENCE_FRAME_RATE,
            min_y_radian: -20.0_f32.to_radians(),
            max_y_radian: 20.0_f32.to_radians(),
            turn_radian: 5.0_f32.to_radians(),
            vertical_variation_frequency: 0.5,
            vertical_variation_factor: PI / 180.0,
            horizontal_variation_frequency: 0.5,
            horizontal_variation_factor: PI / 180.0,
            negate_direction: true,
            avoidance_distance: 0.1,
            avoidance_factor: 0.5,
        }
    }
}

// =============================================================================
// Cluster and members
// =============================================================================

/// Players only see a cluster move while standing near one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub position: Vec3,
    pub trigger_radius: f32,
}

/// One flying creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMember {
    pub species: FaunaSpecies,
    pub position: Vec3,
    pub rotation: Quat,
    /// Unit travel direction.
    pub direction: Vec3,
    /// Metres per second along `direction`.
    pub speed: f32,
    pub vertical_offset: f32,
    pub horizontal_offset: f32,
}

/// A group of fauna sharing one volume. Never despawned during a session.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FlockCluster {
    pub volume: ClusterVolume,
    pub tuning: FlockTuning,
    pub observation_points: Vec<ObservationPoint>,
    pub members: Vec<FlockMember>,
}

impl FlockCluster {
    pub fn new(volume: ClusterVolume, tuning: FlockTuning) -> Self {
        Self {
            volume,
            tuning,
            observation_points: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// A cluster was created or grew by one member.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FaunaSpawnEvent {
    pub cluster: Entity,
    pub planter: Entity,
    pub species: FaunaSpecies,
    pub position: Vec3,
}
