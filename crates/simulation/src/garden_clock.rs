use bevy::prelude::*;

/// Frame timing handed to every garden system: `delta` is the length of the
/// current frame and `elapsed` the absolute time since the session started,
/// both in seconds.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct GardenClock {
    pub delta: f32,
    pub elapsed: f32,
}

impl GardenClock {
    /// Advance by `dt` seconds. Negative steps are treated as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.delta = dt;
        self.elapsed += dt;
    }
}

/// Marker: when present, `GardenClock` is driven by hand (tests, replays)
/// instead of Bevy's `Time`.
#[derive(Resource, Default)]
pub struct ManualClock;

pub fn sync_garden_clock(time: Res<Time>, mut clock: ResMut<GardenClock>) {
    clock.delta = time.delta_secs();
    clock.elapsed = time.elapsed_secs();
}

pub struct GardenClockPlugin;

impl Plugin for GardenClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GardenClock>().add_systems(
            Update,
            sync_garden_clock
                .run_if(not(resource_exists::<ManualClock>))
                .in_set(crate::GardenSet::Clock),
        );
    }
}
