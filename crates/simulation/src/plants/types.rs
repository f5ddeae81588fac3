use bevy::prelude::*;

use crate::config::DEFAULT_GROW_SPEED;
use crate::spring::ChannelBank;

// =============================================================================
// Plant state
// =============================================================================

/// Where a planted instance is in its life. Removal despawns the entity, so
/// there is no `Removed` state to observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Growing,
    Grown,
    Shrinking,
}

/// A planted instance of a species.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlantInstance {
    pub species: String,
    /// Randomized full-grown scale, fixed at planting.
    pub planted_scale: Vec3,
    /// Blend weights of the four animated segments (x, y, z, w).
    pub segment_scales: [f32; 4],
    /// Extra growth from watering, applied while grown.
    pub scale_multiplier: f32,
    pub lifecycle: Lifecycle,
    /// Seconds since the current animation (growth or shrink) started.
    pub timer: f32,
    pub channels: ChannelBank,
    /// Rendered scale captured when the plant was picked.
    pub scale_before_shrinking: Vec3,
    /// Watering growth rate, per second.
    pub grow_speed: f32,
    /// Helper collider entity, `None` once removed.
    pub proximity_collider: Option<Entity>,
}

impl PlantInstance {
    pub fn new(species: impl Into<String>, planted_scale: Vec3, channels: ChannelBank) -> Self {
        let (_, segment_scales) = channels.values();
        Self {
            species: species.into(),
            planted_scale,
            segment_scales,
            scale_multiplier: 1.0,
            lifecycle: Lifecycle::Growing,
            timer: 0.0,
            channels,
            scale_before_shrinking: planted_scale,
            grow_speed: DEFAULT_GROW_SPEED,
            proximity_collider: None,
        }
    }

    /// Only fully grown plants can be picked.
    pub fn pickable(&self) -> bool {
        self.lifecycle == Lifecycle::Grown
    }

    pub fn root_value(&self) -> f32 {
        self.channels.root.value
    }

    /// Scale the renderer should show for this plant.
    pub fn rendered_scale(&self) -> Vec3 {
        match self.lifecycle {
            Lifecycle::Growing => self.planted_scale * self.root_value(),
            Lifecycle::Grown => self.planted_scale * self.scale_multiplier,
            Lifecycle::Shrinking => self.scale_before_shrinking * self.root_value(),
        }
    }

    /// Copy the segment channel values into `segment_scales`.
    pub fn publish_segments(&mut self) {
        let (_, segments) = self.channels.values();
        self.segment_scales = segments;
    }
}

/// Small fixed-size collider that keeps a freshly planted, still tiny plant
/// easy to hit. Points back at its plant.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProximityCollider {
    pub plant: Entity,
}

/// Set when the instance's transform or segment weights changed and the
/// renderer has to re-upload it. Cleared by the renderer.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSync {
    pub dirty: bool,
}

impl RenderSync {
    pub fn mark(&mut self) {
        self.dirty = true;
    }
}

/// Marker: included in the saved garden.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Persistable;

// =============================================================================
// World flags
// =============================================================================

/// Hint to the renderer that shadows should refresh quickly this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneLighting {
    pub needs_fast_update: bool,
}

/// Raised whenever the set of persistable plants changed.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GardenSaveState {
    pub update_pending: bool,
}

/// Watering can state supplied by the input layer.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct WateringCan {
    pub active: bool,
    pub center: Vec3,
    pub radius: f32,
}

// =============================================================================
// Events
// =============================================================================

/// A seed hit the ground and should become a plant.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SeedLanded {
    pub species: String,
    pub position: Vec3,
}

/// The player asked to pick a plant (or one of its colliders).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickPlant {
    pub target: Entity,
}

/// Lifecycle transitions published for other systems (planter detection,
/// audio, UI).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlantLifecycleEvent {
    Planted { plant: Entity, position: Vec3 },
    Grown { plant: Entity, position: Vec3 },
    Removed { plant: Entity, position: Vec3 },
}

impl PlantLifecycleEvent {
    pub fn plant(&self) -> Entity {
        match self {
            PlantLifecycleEvent::Planted { plant, .. }
            | PlantLifecycleEvent::Grown { plant, .. }
            | PlantLifecycleEvent::Removed { plant, .. } => *plant,
        }
    }
}
