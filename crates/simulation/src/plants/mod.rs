mod helpers;
mod systems;
pub mod types;

pub use helpers::{advance_growth, advance_shrink, begin_shrink, roll_plant, water};
pub use systems::{
    advance_growing_plants, advance_shrinking_plants, pick_plants, plant_landed_seeds,
    publish_plant_scales, spawn_plant, water_plants, PlantsPlugin,
};
pub use types::{
    GardenSaveState, Lifecycle, Persistable, PickPlant, PlantInstance, PlantLifecycleEvent,
    ProximityCollider, RenderSync, SceneLighting, SeedLanded, WateringCan,
};
