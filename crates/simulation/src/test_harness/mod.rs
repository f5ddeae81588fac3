//! # TestGarden: headless harness for garden integration tests and benches
//!
//! Wraps a `bevy::app::App` running `SimulationPlugin` with a hand-driven
//! clock, so every test decides exactly how long each frame lasts.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::fauna::FaunaSpawnEvent;
use crate::garden_clock::{GardenClock, ManualClock};
use crate::plants::PlantLifecycleEvent;
use crate::sim_rng::SimRng;
use crate::species::SpeciesProfileTable;
use crate::SimulationPlugin;

/// Frame length of the headset the garden was tuned for.
pub const FRAME_DT: f32 = 1.0 / 72.0;

const DEFAULT_TEST_SEED: u64 = 0x6A5D_E7;

/// Every lifecycle and fauna event seen since the garden was created, in
/// emission order.
#[derive(Resource, Default, Debug)]
pub struct RecordedEvents {
    pub lifecycle: Vec<PlantLifecycleEvent>,
    pub fauna: Vec<FaunaSpawnEvent>,
}

fn record_events(
    mut lifecycle: EventReader<PlantLifecycleEvent>,
    mut fauna: EventReader<FaunaSpawnEvent>,
    mut recorded: ResMut<RecordedEvents>,
) {
    recorded.lifecycle.extend(lifecycle.read().cloned());
    recorded.fauna.extend(fauna.read().copied());
}

/// A headless garden. Build it up with the setup methods, call `tick()` to
/// advance it, then query or assert on the resulting ECS state.
pub struct TestGarden {
    app: App,
}

impl Default for TestGarden {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGarden {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty garden with the built-in species and a fixed random seed.
    pub fn new() -> Self {
        Self::build(DEFAULT_TEST_SEED, None)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(seed, None)
    }

    /// An empty garden using `table` instead of the built-in species.
    pub fn with_species(table: SpeciesProfileTable) -> Self {
        Self::build(DEFAULT_TEST_SEED, Some(table))
    }

    fn build(seed: u64, table: Option<SpeciesProfileTable>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);

        // Both go in before the plugin so it keeps them.
        app.insert_resource(ManualClock);
        app.insert_resource(SimRng::from_seed_u64(seed));
        if let Some(table) = table {
            app.insert_resource(table);
        }
        app.add_plugins(SimulationPlugin);

        app.init_resource::<RecordedEvents>()
            .add_systems(Last, record_events);

        // Zero-length first frame: runs Startup without advancing anything.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run one frame lasting `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.app.world_mut().resource_mut::<GardenClock>().advance(dt);
        self.app.update();
    }

    /// Run `n` frames at the reference frame rate.
    pub fn tick_frames(&mut self, n: u32) {
        for _ in 0..n {
            self.tick(FRAME_DT);
        }
    }

    /// Run reference-rate frames until at least `seconds` have passed.
    pub fn run_for(&mut self, seconds: f32) {
        let frames = (seconds / FRAME_DT).ceil() as u32;
        self.tick_frames(frames);
    }

    // -----------------------------------------------------------------------
    // Raw access
    // -----------------------------------------------------------------------

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
