use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::species::SpeciesProfileTable;

mod demo;

/// Frame rate of the headset the garden content targets.
const FRAME_RATE: f64 = 72.0;
const DEFAULT_DEMO_SECONDS: f32 = 12.0;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / FRAME_RATE,
        ))),
    )
    .add_plugins(LogPlugin::default());

    // The species table must be in place before SimulationPlugin builds, or
    // the built-in one is used.
    if let Some(table) = species_override() {
        app.insert_resource(table);
    }

    let seconds = std::env::var("GARDEN_DEMO_SECONDS")
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_DEMO_SECONDS);

    app.add_plugins(simulation::SimulationPlugin)
        .add_plugins(demo::DemoPlugin { seconds });

    app.run();
}

/// Species table from the file named by `GARDEN_SPECIES_PATH`, if set and
/// valid. Called after `LogPlugin` is added so problems reach the log.
fn species_override() -> Option<SpeciesProfileTable> {
    let path = std::env::var("GARDEN_SPECIES_PATH").ok()?;
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            warn!("Cannot read species file {path}: {e}; using built-in species");
            return None;
        }
    };
    match SpeciesProfileTable::from_json(&json) {
        Ok(table) => {
            info!("Loaded {} species from {path}", table.len());
            Some(table)
        }
        Err(e) => {
            warn!("Invalid species file {path}: {e}; using built-in species");
            None
        }
    }
}
