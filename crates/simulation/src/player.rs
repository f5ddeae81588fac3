use bevy::prelude::*;

/// Head pose of the player, supplied by the XR input layer. Absent while no
/// headset is presenting; gaze-gated and proximity-gated behavior then pauses.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    /// View direction, not necessarily normalized.
    pub forward: Vec3,
}

impl PlayerPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// Angle in radians between the view direction and the direction from
    /// the player to `target`. `None` when either direction is degenerate.
    pub fn angle_to(&self, target: Vec3) -> Option<f32> {
        let to_target = (target - self.position).try_normalize()?;
        let forward = self.forward.try_normalize()?;
        Some(to_target.angle_between(forward))
    }

    /// Position projected onto the ground plane.
    pub fn ground_position(&self) -> Vec3 {
        Vec3::new(self.position.x, 0.0, self.position.z)
    }
}
