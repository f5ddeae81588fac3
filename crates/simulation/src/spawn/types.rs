use bevy::prelude::*;

use crate::config::BUTTERFLY_SPAWN_AFTER_COUNT;

/// Fauna bookkeeping of one planter. Lives on the planter entity next to its
/// `StaticCollider` on the planter layer.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct PlanterState {
    /// Positions of grown plants detected inside this planter.
    pub detected_plants: Vec<Vec3>,
    pub cluster: Option<Entity>,
    pub pending_first_spawn: bool,
    pub pending_member_add: bool,
    /// Set when the planter's geometry is unusable; the planter then ignores
    /// plants and never spawns fauna.
    pub disabled: bool,
}

impl PlanterState {
    /// Record a grown plant and raise the spawn flag its count calls for:
    /// the first cluster at the threshold, one more member at every later
    /// multiple once a cluster exists.
    pub fn record_plant(&mut self, position: Vec3) {
        self.detected_plants.push(position);
        let count = self.detected_plants.len();
        if count == BUTTERFLY_SPAWN_AFTER_COUNT {
            self.pending_first_spawn = true;
        } else if count % BUTTERFLY_SPAWN_AFTER_COUNT == 0 && self.cluster.is_some() {
            self.pending_member_add = true;
        }
    }

    pub fn has_pending_spawn(&self) -> bool {
        self.pending_first_spawn || self.pending_member_add
    }
}
