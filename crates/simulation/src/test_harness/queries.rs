//! Query methods for `TestGarden`.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::fauna::FlockCluster;
use crate::persistence::GardenRecords;
use crate::plants::{
    GardenSaveState, Lifecycle, PlantInstance, PlantLifecycleEvent, ProximityCollider,
    RenderSync, SceneLighting,
};
use crate::spawn::PlanterState;

use crate::SaveableRegistry;

use super::{RecordedEvents, TestGarden};

impl TestGarden {
    // -----------------------------------------------------------------------
    // Plants
    // -----------------------------------------------------------------------

    /// All plant entities, oldest first.
    pub fn plants(&mut self) -> Vec<Entity> {
        let mut plants: Vec<Entity> = self
            .world_mut()
            .query_filtered::<Entity, With<PlantInstance>>()
            .iter(self.app.world())
            .collect();
        plants.sort();
        plants
    }

    pub fn plant_count(&mut self) -> usize {
        self.plants().len()
    }

    pub fn plant(&self, entity: Entity) -> &PlantInstance {
        self.world()
            .get::<PlantInstance>(entity)
            .unwrap_or_else(|| panic!("{entity:?} is not a plant"))
    }

    pub fn plant_mut(&mut self, entity: Entity) -> Mut<'_, PlantInstance> {
        self.world_mut()
            .get_mut::<PlantInstance>(entity)
            .unwrap_or_else(|| panic!("{entity:?} is not a plant"))
    }

    pub fn has_entity(&self, entity: Entity) -> bool {
        self.world().entities().contains(entity)
    }

    pub fn transform(&self, entity: Entity) -> Transform {
        *self
            .world()
            .get::<Transform>(entity)
            .unwrap_or_else(|| panic!("{entity:?} has no transform"))
    }

    pub fn render_sync(&self, entity: Entity) -> RenderSync {
        *self
            .world()
            .get::<RenderSync>(entity)
            .unwrap_or_else(|| panic!("{entity:?} has no render sync"))
    }

    pub fn count_in(&mut self, lifecycle: Lifecycle) -> usize {
        self.world_mut()
            .query::<&PlantInstance>()
            .iter(self.app.world())
            .filter(|plant| plant.lifecycle == lifecycle)
            .count()
    }

    pub fn growing_count(&mut self) -> usize {
        self.count_in(Lifecycle::Growing)
    }

    pub fn proximity_collider_count(&mut self) -> usize {
        self.world_mut()
            .query::<&ProximityCollider>()
            .iter(self.app.world())
            .count()
    }

    // -----------------------------------------------------------------------
    // Planters and fauna
    // -----------------------------------------------------------------------

    pub fn planter(&self, entity: Entity) -> &PlanterState {
        self.world()
            .get::<PlanterState>(entity)
            .unwrap_or_else(|| panic!("{entity:?} is not a planter"))
    }

    pub fn clusters(&mut self) -> Vec<Entity> {
        self.world_mut()
            .query_filtered::<Entity, With<FlockCluster>>()
            .iter(self.app.world())
            .collect()
    }

    pub fn cluster(&self, entity: Entity) -> &FlockCluster {
        self.world()
            .get::<FlockCluster>(entity)
            .unwrap_or_else(|| panic!("{entity:?} is not a flock cluster"))
    }

    // -----------------------------------------------------------------------
    // Resources and events
    // -----------------------------------------------------------------------

    pub fn events(&self) -> &RecordedEvents {
        self.world().resource::<RecordedEvents>()
    }

    pub fn grown_events(&self) -> Vec<Entity> {
        self.events()
            .lifecycle
            .iter()
            .filter(|e| matches!(e, PlantLifecycleEvent::Grown { .. }))
            .map(PlantLifecycleEvent::plant)
            .collect()
    }

    pub fn removed_events(&self) -> Vec<Entity> {
        self.events()
            .lifecycle
            .iter()
            .filter(|e| matches!(e, PlantLifecycleEvent::Removed { .. }))
            .map(PlantLifecycleEvent::plant)
            .collect()
    }

    pub fn records(&self) -> &GardenRecords {
        self.world().resource::<GardenRecords>()
    }

    pub fn save_pending(&self) -> bool {
        self.world().resource::<GardenSaveState>().update_pending
    }

    pub fn lighting(&self) -> SceneLighting {
        *self.world().resource::<SceneLighting>()
    }

    /// What the host application would write to its save file right now.
    pub fn save_extensions(&self) -> BTreeMap<String, Vec<u8>> {
        let world = self.world();
        world.resource::<SaveableRegistry>().save_all(world)
    }
}
