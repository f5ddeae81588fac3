//! Deterministic per-frame ordering via `SystemSet` phases.
//!
//! All garden systems run in the `Update` schedule, once per rendered frame,
//! and every one of them lives in exactly one of these sets:
//!
//! ```text
//! Clock  →  Input  →  Lifecycle  →  Detection  →  Fauna  →  Persistence
//! ```
//!
//! * **Clock**: copies frame delta / elapsed time into `GardenClock`.
//! * **Input**: requests from outside collaborators: landed seeds, picks,
//!   watering, restoring saved plants.
//! * **Lifecycle**: advances growing and shrinking plants and emits
//!   `PlantLifecycleEvent`s.
//! * **Detection**: planter raycasts for plants that finished growing and
//!   the gaze-gated fauna spawns. Because it runs after `Lifecycle`, a plant
//!   that becomes grown this frame is counted this frame.
//! * **Fauna**: flock steering.
//! * **Persistence**: refreshes the garden records when a save is pending.

use bevy::prelude::*;

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain by `SimulationPlugin`. Plugins use
/// `.in_set(GardenSet::X)` and may add `.after()` / `.before()` constraints
/// within a phase.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GardenSet {
    Clock,
    Input,
    Lifecycle,
    Detection,
    Fauna,
    Persistence,
}
