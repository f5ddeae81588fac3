mod table;
mod tests;
pub mod types;

use bevy::prelude::*;

pub use table::{SpeciesProfileTable, SpeciesTableError, DEFAULT_SPECIES};
pub use types::{Channel, ChannelParams, ChannelTable, SpeciesProfile};

/// Inserts the built-in `SpeciesProfileTable` unless one was provided
/// beforehand (tests, override files).
pub struct SpeciesPlugin;

impl Plugin for SpeciesPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<SpeciesProfileTable>() {
            return;
        }
        match SpeciesProfileTable::builtin() {
            Ok(table) => {
                app.insert_resource(table);
            }
            // Shipped data is broken: refuse to start rather than fail on lookup.
            Err(e) => panic!("built-in species profiles are invalid: {e}"),
        }
    }
}
