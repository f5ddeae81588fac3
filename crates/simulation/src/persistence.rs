//! Garden persistence: a snapshot of every grown plant, kept in a
//! `Saveable` resource so the save backend can store it with the rest of the
//! extension map.
//!
//! The snapshot is refreshed whenever `GardenSaveState::update_pending` is
//! raised. Loading a snapshot queues a restore that respawns the plants
//! directly in the grown state.

use bevy::prelude::*;
use bitcode::{Decode, Encode};

use crate::plants::{
    spawn_plant, GardenSaveState, Lifecycle, Persistable, PlantInstance, PlantLifecycleEvent,
};
use crate::species::{ChannelTable, SpeciesProfile, SpeciesProfileTable};
use crate::spring::{AnimationTiming, SpringChannelState};
use crate::GardenSet;

/// Saved state of one grown plant.
#[derive(Encode, Decode, Debug, Clone, PartialEq, Default)]
pub struct PlantRecord {
    pub species: String,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub planted_scale: [f32; 3],
    pub scale_multiplier: f32,
    pub segment_scales: [f32; 4],
}

impl PlantRecord {
    pub fn capture(plant: &PlantInstance, transform: &Transform) -> Self {
        Self {
            species: plant.species.clone(),
            position: transform.translation.to_array(),
            rotation: transform.rotation.to_array(),
            planted_scale: plant.planted_scale.to_array(),
            scale_multiplier: plant.scale_multiplier,
            segment_scales: plant.segment_scales,
        }
    }

    /// A grown instance equivalent to the recorded one. Channels rest at
    /// their recorded values.
    pub fn restore(&self, profile: &SpeciesProfile) -> PlantInstance {
        let timing = AnimationTiming::growth(profile);
        let channels = ChannelTable::from_fn(|channel| {
            let value = match channel.segment_index() {
                Some(i) => self.segment_scales[i],
                None => self.scale_multiplier,
            };
            SpringChannelState::new(profile.growth_channels.get(channel), &timing, value, value)
        });
        let mut plant =
            PlantInstance::new(self.species.clone(), Vec3::from_array(self.planted_scale), channels);
        plant.scale_multiplier = self.scale_multiplier;
        plant.lifecycle = Lifecycle::Grown;
        plant.timer = plant.channels.root.total_duration;
        plant
    }

    pub fn rotation(&self) -> Quat {
        let rotation = Quat::from_array(self.rotation);
        let length = rotation.length();
        if length.is_finite() && length > f32::EPSILON {
            rotation / length
        } else {
            Quat::IDENTITY
        }
    }
}

#[derive(Encode, Decode, Default)]
struct RecordsSnapshot {
    plants: Vec<PlantRecord>,
}

/// Snapshot of the persistable garden.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct GardenRecords {
    pub plants: Vec<PlantRecord>,
    /// Incremented every time the snapshot is refreshed.
    pub revision: u64,
    /// Set by loading; the plants are respawned on the next frame.
    pub restore_pending: bool,
}

impl crate::Saveable for GardenRecords {
    const SAVE_KEY: &'static str = "garden_records";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if self.plants.is_empty() {
            return None;
        }
        Some(bitcode::encode(&RecordsSnapshot {
            plants: self.plants.clone(),
        }))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        let snapshot: RecordsSnapshot = crate::decode_or_warn(Self::SAVE_KEY, bytes);
        let restore_pending = !snapshot.plants.is_empty();
        Self {
            plants: snapshot.plants,
            revision: 0,
            restore_pending,
        }
    }
}

/// System: respawn the plants of a freshly loaded snapshot. They are
/// announced as grown so planters count them again.
pub fn restore_garden_records(
    mut commands: Commands,
    mut records: ResMut<GardenRecords>,
    table: Res<SpeciesProfileTable>,
    mut lifecycle_events: EventWriter<PlantLifecycleEvent>,
) {
    if !records.restore_pending {
        return;
    }
    records.restore_pending = false;

    for record in &records.plants {
        let profile = table.lookup(&record.species);
        let position = Vec3::from_array(record.position);
        let plant = spawn_plant(&mut commands, record.restore(profile), position, record.rotation());
        commands.entity(plant).insert(Persistable);
        lifecycle_events.send(PlantLifecycleEvent::Grown { plant, position });
    }
    info!("Restored {} plants from the saved garden", records.plants.len());
}

/// System: rebuild the snapshot after the garden changed.
pub fn refresh_garden_records(
    mut save_state: ResMut<GardenSaveState>,
    mut records: ResMut<GardenRecords>,
    plants: Query<(&PlantInstance, &Transform), With<Persistable>>,
) {
    if !save_state.update_pending {
        return;
    }
    save_state.update_pending = false;

    records.plants = plants
        .iter()
        .filter(|(plant, _)| plant.lifecycle == Lifecycle::Grown)
        .map(|(plant, transform)| PlantRecord::capture(plant, transform))
        .collect();
    records.revision = records.revision.wrapping_add(1);
}

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GardenRecords>()
            .add_systems(
                Update,
                restore_garden_records
                    .before(crate::plants::plant_landed_seeds)
                    .in_set(GardenSet::Input),
            )
            .add_systems(
                Update,
                refresh_garden_records.in_set(GardenSet::Persistence),
            );

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<GardenRecords>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Saveable;

    fn record(species: &str) -> PlantRecord {
        PlantRecord {
            species: species.to_string(),
            position: [1.0, 0.0, -2.0],
            rotation: Quat::from_rotation_y(0.5).to_array(),
            planted_scale: [3.0, 3.3, 3.0],
            scale_multiplier: 1.4,
            segment_scales: [0.9, 1.0, 1.1, 1.05],
        }
    }

    #[test]
    fn test_empty_records_skip_saving() {
        assert!(GardenRecords::default().save_to_bytes().is_none());
    }

    #[test]
    fn test_loaded_records_queue_restore() {
        let records = GardenRecords {
            plants: vec![record("default"), record("rose_a")],
            revision: 3,
            restore_pending: false,
        };
        let bytes = records.save_to_bytes().expect("non-empty garden saves");
        let loaded = GardenRecords::load_from_bytes(&bytes);
        assert_eq!(loaded.plants, records.plants);
        assert!(loaded.restore_pending);
    }

    #[test]
    fn test_truncated_bytes_load_empty_garden() {
        let records = GardenRecords {
            plants: vec![record("default"), record("oak")],
            ..Default::default()
        };
        let bytes = records.save_to_bytes().unwrap();
        let loaded = GardenRecords::load_from_bytes(&bytes[..bytes.len() / 2]);
        assert!(loaded.plants.is_empty());
        assert!(!loaded.restore_pending);
    }

    #[test]
    fn test_restored_plant_is_grown_with_recorded_scale() {
        let table = SpeciesProfileTable::builtin().unwrap();
        let record = record("default");
        let plant = record.restore(table.default_profile());
        assert_eq!(plant.lifecycle, Lifecycle::Grown);
        assert!(plant.pickable());
        assert_eq!(plant.segment_scales, record.segment_scales);
        let expected = Vec3::from_array(record.planted_scale) * record.scale_multiplier;
        assert!((plant.rendered_scale() - expected).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_rotation_falls_back_to_identity() {
        let mut record = record("default");
        record.rotation = [0.0; 4];
        assert_eq!(record.rotation(), Quat::IDENTITY);
    }
}
