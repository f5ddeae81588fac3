//! Headless core of a VR garden: seeds become spring-animated plants, picked
//! plants shrink away, and planters that collect enough grown plants attract
//! small flocks of butterflies once the player looks away.
//!
//! Everything runs in Bevy's `Update` schedule, ordered by [`GardenSet`].

use std::collections::BTreeMap;

use bevy::prelude::*;

pub mod collision;
pub mod config;
pub mod fauna;
pub mod garden_clock;
pub mod persistence;
pub mod player;
pub mod plants;
pub mod sim_rng;
pub mod simulation_sets;
pub mod spawn;
pub mod species;
pub mod spring;

#[cfg(test)]
mod integration_tests;
pub mod test_harness;

pub use simulation_sets::GardenSet;

// ---------------------------------------------------------------------------
// Saveable resources
// ---------------------------------------------------------------------------

/// A resource the host application persists as one entry of a key/bytes map.
///
/// The garden never touches storage itself: the host calls
/// [`SaveableRegistry::save_all`] when it writes its save file and
/// [`SaveableRegistry::load_all`] when it reads one back.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Key of the entry. Must stay stable between releases.
    const SAVE_KEY: &'static str;

    /// `None` skips the entry, e.g. for a resource still in its default state.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode a bitcode entry, falling back to `T::default()` with a warning when
/// the bytes are corrupt or from an incompatible layout.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Saveable {}: could not decode {} bytes, using defaults: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased operations for one registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Every saveable resource, filled in by the plugins that own them.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register `T`. A second registration of the same key is ignored with a
    /// warning, and trips a debug assertion.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!("SaveableRegistry: duplicate key '{}' ignored", key);
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                world.insert_resource(T::load_from_bytes(bytes));
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        self.entries
            .iter()
            .filter_map(|entry| (entry.save_fn)(world).map(|bytes| (entry.key.clone(), bytes)))
            .collect()
    }

    /// Load every registered resource present in `extensions`. Missing keys
    /// leave the resource untouched, unknown keys are ignored.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Put every registered resource back to its default (a fresh garden).
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GardenSet::Clock,
                GardenSet::Input,
                GardenSet::Lifecycle,
                GardenSet::Detection,
                GardenSet::Fauna,
                GardenSet::Persistence,
            )
                .chain(),
        )
        .init_resource::<SaveableRegistry>();

        app.add_plugins((
            garden_clock::GardenClockPlugin,
            sim_rng::SimRngPlugin,
            species::SpeciesPlugin,
            plants::PlantsPlugin,
            spawn::SpawnPlugin,
            fauna::FaunaPlugin,
            persistence::PersistencePlugin,
        ));
    }
}

#[cfg(test)]
mod saveable_tests {
    use super::*;

    #[derive(Resource, Default, Debug, PartialEq)]
    struct HarvestCount {
        value: u32,
    }

    impl Saveable for HarvestCount {
        const SAVE_KEY: &'static str = "harvest_count";

        fn save_to_bytes(&self) -> Option<Vec<u8>> {
            (self.value != 0).then(|| self.value.to_le_bytes().to_vec())
        }

        fn load_from_bytes(bytes: &[u8]) -> Self {
            let value = u32::from_le_bytes(bytes.try_into().unwrap_or([0; 4]));
            HarvestCount { value }
        }
    }

    fn registry() -> SaveableRegistry {
        let mut registry = SaveableRegistry::default();
        registry.register::<HarvestCount>();
        registry
    }

    #[test]
    fn test_save_all_writes_registered_key() {
        let mut world = World::new();
        world.insert_resource(HarvestCount { value: 42 });

        let extensions = registry().save_all(&world);
        assert_eq!(extensions.len(), 1);
        assert_eq!(extensions["harvest_count"], 42u32.to_le_bytes().to_vec());
    }

    #[test]
    fn test_save_all_skips_default_state() {
        let mut world = World::new();
        world.insert_resource(HarvestCount::default());
        assert!(registry().save_all(&world).is_empty());
    }

    #[test]
    fn test_load_all_restores_resource() {
        let mut world = World::new();
        world.insert_resource(HarvestCount::default());

        let mut extensions = BTreeMap::new();
        extensions.insert("harvest_count".to_string(), 99u32.to_le_bytes().to_vec());
        registry().load_all(&mut world, &extensions);

        assert_eq!(world.resource::<HarvestCount>().value, 99);
    }

    #[test]
    fn test_load_all_ignores_unknown_keys() {
        let mut world = World::new();
        world.insert_resource(HarvestCount { value: 5 });

        let mut extensions = BTreeMap::new();
        extensions.insert("weather".to_string(), vec![0xFF, 0xFF]);
        registry().load_all(&mut world, &extensions);

        assert_eq!(world.resource::<HarvestCount>().value, 5);
    }

    #[test]
    fn test_reset_all_restores_defaults() {
        let mut world = World::new();
        world.insert_resource(HarvestCount { value: 999 });
        registry().reset_all(&mut world);
        assert_eq!(world.resource::<HarvestCount>().value, 0);
    }

    #[test]
    #[should_panic(expected = "duplicate key")]
    fn test_duplicate_registration_panics_in_debug() {
        let mut registry = registry();
        registry.register::<HarvestCount>();
    }

    #[test]
    fn test_simulation_plugin_registers_garden_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);
        let registry = app.world().resource::<SaveableRegistry>();
        let keys: Vec<&str> = registry.keys().collect();
        assert!(keys.contains(&"sim_rng"));
        assert!(keys.contains(&"garden_records"));
    }
}
