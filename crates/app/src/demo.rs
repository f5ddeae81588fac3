//! Scripted demo session: plants a planter full of seeds, lets them grow,
//! looks away so butterflies can arrive, waters and picks a plant, then logs
//! what would be saved and exits.

use bevy::prelude::*;

use simulation::collision::{CollisionLayer, StaticCollider};
use simulation::fauna::{FaunaSpawnEvent, FlockCluster};
use simulation::garden_clock::{sync_garden_clock, GardenClock};
use simulation::persistence::GardenRecords;
use simulation::plants::{
    Lifecycle, PickPlant, PlantInstance, PlantLifecycleEvent, SeedLanded, WateringCan,
};
use simulation::player::PlayerPose;
use simulation::spawn::PlanterState;
use simulation::{GardenSet, SaveableRegistry};

const SEEDS: [(&str, Vec3); 8] = [
    ("tulip_a", Vec3::new(-0.6, 0.0, -0.6)),
    ("tulip_b", Vec3::new(0.0, 0.0, -0.6)),
    ("pansy_a", Vec3::new(0.6, 0.0, -0.6)),
    ("rose_a", Vec3::new(-0.6, 0.0, 0.0)),
    ("lavender_a", Vec3::new(0.6, 0.0, 0.0)),
    ("sunflower_a", Vec3::new(-0.6, 0.0, 0.6)),
    ("allium_b", Vec3::new(0.0, 0.0, 0.6)),
    ("foxglove", Vec3::new(0.6, 0.0, 0.6)),
];

/// Session time at which the player turns away from the planter.
const LOOK_AWAY_AT: f32 = 2.0;
const WATER_FROM: f32 = 3.0;
const WATER_UNTIL: f32 = 5.0;
const PICK_AT: f32 = 6.0;

pub struct DemoPlugin {
    pub seconds: f32,
}

#[derive(Resource)]
struct DemoScript {
    seconds: f32,
    looked_away: bool,
    picked: bool,
}

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(DemoScript {
            seconds: self.seconds,
            looked_away: false,
            picked: false,
        })
        .add_systems(Startup, plant_demo_garden)
        .add_systems(
            Update,
            drive_demo
                .after(sync_garden_clock)
                .in_set(GardenSet::Clock),
        )
        .add_systems(
            Update,
            (log_garden_events, finish_demo)
                .chain()
                .after(GardenSet::Persistence),
        );
    }
}

fn plant_demo_garden(mut commands: Commands, mut seeds: EventWriter<SeedLanded>) {
    commands.spawn((
        PlanterState::default(),
        StaticCollider::new(Vec3::new(1.0, 0.1, 1.0), CollisionLayer::Planter),
        Transform::from_xyz(0.0, -0.1, 0.0),
    ));
    commands.insert_resource(PlayerPose::new(Vec3::new(0.0, 1.6, -3.0), Vec3::Z));
    for (species, position) in SEEDS {
        seeds.send(SeedLanded {
            species: species.to_string(),
            position,
        });
    }
    info!("Demo garden planted with {} seeds", SEEDS.len());
}

fn drive_demo(
    clock: Res<GardenClock>,
    mut script: ResMut<DemoScript>,
    mut player: ResMut<PlayerPose>,
    mut can: ResMut<WateringCan>,
    plants: Query<(Entity, &PlantInstance)>,
    mut picks: EventWriter<PickPlant>,
) {
    let now = clock.elapsed;

    if !script.looked_away && now >= LOOK_AWAY_AT {
        player.forward = Vec3::NEG_Z;
        script.looked_away = true;
        info!("Player looks away from the planter");
    }

    let watering = (WATER_FROM..WATER_UNTIL).contains(&now);
    if watering != can.active {
        *can = WateringCan {
            active: watering,
            center: Vec3::new(0.0, 0.3, 0.0),
            radius: 1.2,
        };
    }

    if !script.picked && now >= PICK_AT {
        if let Some((plant, _)) = plants.iter().find(|(_, p)| p.lifecycle == Lifecycle::Grown) {
            picks.send(PickPlant { target: plant });
        }
        script.picked = true;
    }
}

fn log_garden_events(
    mut lifecycle: EventReader<PlantLifecycleEvent>,
    mut fauna: EventReader<FaunaSpawnEvent>,
    plants: Query<&PlantInstance>,
) {
    for event in lifecycle.read() {
        match event {
            PlantLifecycleEvent::Planted { plant, position } => {
                debug!("Planted {:?} at {}", plant, position);
            }
            PlantLifecycleEvent::Grown { plant, .. } => {
                if let Ok(instance) = plants.get(*plant) {
                    info!("{} grown to {}", instance.species, instance.rendered_scale());
                }
            }
            PlantLifecycleEvent::Removed { plant, .. } => {
                info!("Plant {:?} removed", plant);
            }
        }
    }
    for event in fauna.read() {
        info!("{} appeared at {}", event.species.name(), event.position);
    }
}

fn finish_demo(world: &mut World) {
    let (elapsed, seconds) = {
        let clock = world.resource::<GardenClock>();
        (clock.elapsed, world.resource::<DemoScript>().seconds)
    };
    if elapsed < seconds {
        return;
    }

    let members: usize = world
        .query::<&FlockCluster>()
        .iter(world)
        .map(|cluster| cluster.members.len())
        .sum();
    let saved = world.resource::<SaveableRegistry>().save_all(world);
    let bytes: usize = saved.values().map(Vec::len).sum();
    info!(
        "Demo finished after {:.1}s: {} plants recorded, {} butterflies, {} save entries ({} bytes)",
        elapsed,
        world.resource::<GardenRecords>().plants.len(),
        members,
        saved.len(),
        bytes
    );
    world.send_event(AppExit::Success);
}
