mod helpers;
mod systems;
pub mod types;

pub use helpers::{cluster_volume, looking_away, random_butterfly};
pub use systems::{spawn_pending_fauna, track_grown_plants, validate_planters, SpawnPlugin};
pub use types::PlanterState;
