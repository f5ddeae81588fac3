//! Builder and input methods for `TestGarden`.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::collision::{CollisionLayer, StaticCollider};
use crate::fauna::{FlockCluster, ObservationPoint};
use crate::plants::{PickPlant, SeedLanded, WateringCan};
use crate::player::PlayerPose;
use crate::spawn::PlanterState;
use crate::SaveableRegistry;

use super::TestGarden;

/// Half height of the planter boxes built by `add_planter`.
const PLANTER_HALF_HEIGHT: f32 = 0.1;

impl TestGarden {
    // -----------------------------------------------------------------------
    // Player
    // -----------------------------------------------------------------------

    /// Place the player at `position`, facing `forward`.
    pub fn with_player(mut self, position: Vec3, forward: Vec3) -> Self {
        self.set_player(position, forward);
        self
    }

    pub fn set_player(&mut self, position: Vec3, forward: Vec3) {
        self.world_mut()
            .insert_resource(PlayerPose::new(position, forward));
    }

    /// Turn the player so they face `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let position = self.world().resource::<PlayerPose>().position;
        self.set_player(position, target - position);
    }

    pub fn remove_player(&mut self) {
        self.world_mut().remove_resource::<PlayerPose>();
    }

    // -----------------------------------------------------------------------
    // Planters
    // -----------------------------------------------------------------------

    /// A planter whose top surface sits at `top.y`, spanning
    /// `half_width` around `top` on both horizontal axes.
    pub fn add_planter(&mut self, top: Vec3, half_width: f32) -> Entity {
        let half_extents = Vec3::new(half_width, PLANTER_HALF_HEIGHT, half_width);
        self.world_mut()
            .spawn((
                PlanterState::default(),
                StaticCollider::new(half_extents, CollisionLayer::Planter),
                Transform::from_translation(top - Vec3::Y * PLANTER_HALF_HEIGHT),
            ))
            .id()
    }

    /// A planter with no collider at all.
    pub fn add_bare_planter(&mut self, center: Vec3) -> Entity {
        self.world_mut()
            .spawn((PlanterState::default(), Transform::from_translation(center)))
            .id()
    }

    // -----------------------------------------------------------------------
    // Plants
    // -----------------------------------------------------------------------

    /// Queue a seed landing; it becomes a plant on the next tick.
    pub fn land_seed(&mut self, species: &str, position: Vec3) {
        self.world_mut().send_event(SeedLanded {
            species: species.to_string(),
            position,
        });
    }

    /// Queue a pick of `target` (a plant or one of its colliders).
    pub fn pick(&mut self, target: Entity) {
        self.world_mut().send_event(PickPlant { target });
    }

    pub fn start_watering(&mut self, center: Vec3, radius: f32) {
        *self.world_mut().resource_mut::<WateringCan>() = WateringCan {
            active: true,
            center,
            radius,
        };
    }

    pub fn stop_watering(&mut self) {
        self.world_mut().resource_mut::<WateringCan>().active = false;
    }

    /// Land one seed per position and run until every plant is grown.
    pub fn grow_plants(&mut self, species: &str, positions: &[Vec3]) {
        for &position in positions {
            self.land_seed(species, position);
        }
        self.tick(super::FRAME_DT);
        let mut budget = 72 * 30;
        while self.growing_count() > 0 && budget > 0 {
            self.tick(super::FRAME_DT);
            budget -= 1;
        }
        assert_eq!(self.growing_count(), 0, "plants never finished growing");
    }

    // -----------------------------------------------------------------------
    // Fauna
    // -----------------------------------------------------------------------

    /// Gate `cluster` behind one observation point.
    pub fn add_observation_point(&mut self, cluster: Entity, position: Vec3, trigger_radius: f32) {
        let mut cluster = self
            .world_mut()
            .get_mut::<FlockCluster>(cluster)
            .unwrap_or_else(|| panic!("{cluster:?} is not a flock cluster"));
        cluster.observation_points.push(ObservationPoint {
            position,
            trigger_radius,
        });
    }

    // -----------------------------------------------------------------------
    // Saving
    // -----------------------------------------------------------------------

    /// Feed a save file's entries back in, as the host does on load.
    pub fn load_extensions(&mut self, extensions: &BTreeMap<String, Vec<u8>>) {
        self.world_mut()
            .resource_scope(|world, registry: Mut<SaveableRegistry>| {
                registry.load_all(world, extensions);
            });
    }
}
