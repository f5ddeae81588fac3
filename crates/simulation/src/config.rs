use std::f32::consts::PI;

use bevy::math::Vec3;

/// Frame rate the VR content was authored against.
pub const REFERENCE_FRAME_RATE: f32 = 72.0;

// ---------------------------------------------------------------------------
// Springs
// ---------------------------------------------------------------------------

/// Lower bound applied to spring frequencies so degenerate profile data can
/// never stall a channel or divide by zero.
pub const MIN_SPRING_FREQUENCY: f32 = 1e-3;

/// Convergence windows shorter than this are treated as instantaneous.
pub const MIN_CONVERGENCE_DURATION: f32 = 1e-4;

/// Longest single spring integration step. Longer frames are split so a
/// hitch still lands every channel on its target.
pub const MAX_SPRING_SUBSTEP: f32 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

/// Rate at which watering raises `scale_multiplier`, per second.
pub const DEFAULT_GROW_SPEED: f32 = 0.4;

/// Unscaled half extents of a plant's collider. The box is scaled with the
/// rendered scale of the plant.
pub const PLANT_COLLIDER_HALF_EXTENTS: Vec3 = Vec3::new(0.1, 0.2, 0.1);

/// Local offset of the plant collider's centre from the plant's base.
pub const PLANT_COLLIDER_OFFSET: Vec3 = Vec3::new(0.0, 0.2, 0.0);

/// Half extents of the small helper collider that keeps freshly planted
/// (still tiny) plants easy to hit.
pub const PROXIMITY_COLLIDER_HALF_EXTENTS: Vec3 = Vec3::new(0.1, 0.25, 0.1);

// ---------------------------------------------------------------------------
// Planter detection and fauna spawning
// ---------------------------------------------------------------------------

/// Every N plants detected in a planter, one more butterfly is due.
pub const BUTTERFLY_SPAWN_AFTER_COUNT: usize = 4;

/// The player must face further away than this from a planter before fauna
/// may appear there.
pub const LOOK_AWAY_ANGLE_RADIAN: f32 = PI / 2.0;

/// Height above a grown plant from which the planter ray starts.
pub const PLANTER_RAY_LIFT: f32 = 0.5;

/// Reach of the downward planter ray.
pub const PLANTER_RAY_FAR: f32 = 1.0;

/// Cluster boxes start this far above the lowest plant...
pub const CLUSTER_MIN_Y_LIFT: f32 = 0.5;
/// ...and end this far above the highest one.
pub const CLUSTER_MAX_Y_LIFT: f32 = 1.5;

/// Boxes wider than this on both horizontal axes are recentred on the
/// planter and halved.
pub const CLUSTER_OVERSIZE_EXTENT: f32 = 5.0;

/// Floor for the horizontal extents of a cluster box.
pub const CLUSTER_MIN_HORIZONTAL_EXTENT: f32 = 1.5;

/// Inner (steering) box size relative to the outer box.
pub const CLUSTER_INNER_RATIO: f32 = 0.8;

// ---------------------------------------------------------------------------
// Flock steering
// ---------------------------------------------------------------------------

/// Per-tick pitch correction applied when a member climbs or dives too steeply.
pub const VERTICAL_NUDGE_RADIAN: f32 = PI / 180.0;
