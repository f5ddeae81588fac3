use bevy::prelude::*;

use crate::persistence::GardenRecords;
use crate::plants::{Lifecycle, Persistable};
use crate::test_harness::{TestGarden, FRAME_DT};
use crate::Saveable;

use super::{PLANTER_SPOTS, PLAYER_POSITION};

/// `(species, translation, scale)` of every plant, ordered by position.
fn layout(garden: &mut TestGarden) -> Vec<(String, Vec3, Vec3)> {
    let mut layout: Vec<_> = garden
        .plants()
        .into_iter()
        .map(|plant| {
            let transform = garden.transform(plant);
            (
                garden.plant(plant).species.clone(),
                transform.translation,
                transform.scale,
            )
        })
        .collect();
    layout.sort_by(|a, b| a.1.x.total_cmp(&b.1.x).then(a.1.z.total_cmp(&b.1.z)));
    layout
}

#[test]
fn test_snapshot_tracks_grown_plants() {
    let mut garden = TestGarden::new();
    assert_eq!(garden.records().revision, 0);

    garden.grow_plants("daffodil_a", &PLANTER_SPOTS[..2]);
    let records = garden.records();
    assert_eq!(records.plants.len(), 2);
    assert!(records.plants.iter().all(|r| r.species == "daffodil_a"));
    assert_eq!(records.revision, 1, "both plants finished in the same frame");
}

#[test]
fn test_empty_garden_saves_no_records() {
    let garden = TestGarden::new();
    let extensions = garden.save_extensions();
    assert!(!extensions.contains_key(GardenRecords::SAVE_KEY));
}

#[test]
fn test_saved_garden_restores_grown_plants() {
    let mut saved = TestGarden::new();
    saved.grow_plants("default", &PLANTER_SPOTS[..2]);
    saved.grow_plants("lavender_b", &PLANTER_SPOTS[2..]);
    let extensions = saved.save_extensions();
    assert!(extensions.contains_key(GardenRecords::SAVE_KEY));

    let mut restored = TestGarden::with_seed(99);
    restored.load_extensions(&extensions);
    assert!(restored.records().restore_pending);
    restored.tick(FRAME_DT);

    assert!(!restored.records().restore_pending);
    assert_eq!(restored.count_in(Lifecycle::Grown), 4);
    assert_eq!(layout(&mut restored), layout(&mut saved));
    for plant in restored.plants() {
        assert!(restored.world().get::<Persistable>(plant).is_some());
        assert!(restored.plant(plant).pickable());
    }
}

#[test]
fn test_restore_happens_once() {
    let mut saved = TestGarden::new();
    saved.grow_plants("default", &PLANTER_SPOTS[..1]);
    let extensions = saved.save_extensions();

    let mut restored = TestGarden::new();
    restored.load_extensions(&extensions);
    restored.run_for(0.5);
    assert_eq!(restored.plant_count(), 1);
}

#[test]
fn test_restored_plants_are_counted_by_planters() {
    let mut saved = TestGarden::new();
    saved.grow_plants("default", &PLANTER_SPOTS);
    let extensions = saved.save_extensions();

    let mut restored = TestGarden::new().with_player(PLAYER_POSITION, Vec3::NEG_Z);
    let planter = restored.add_planter(Vec3::ZERO, 1.0);
    restored.load_extensions(&extensions);
    restored.tick(FRAME_DT);

    assert_eq!(restored.planter(planter).detected_plants.len(), 4);
    assert_eq!(restored.clusters().len(), 1);
}

#[test]
fn test_restored_plant_can_be_picked_and_removed() {
    let mut saved = TestGarden::new();
    saved.grow_plants("default", &PLANTER_SPOTS[..1]);
    let extensions = saved.save_extensions();

    let mut restored = TestGarden::new();
    restored.load_extensions(&extensions);
    restored.tick(FRAME_DT);
    let plant = restored.plants()[0];

    restored.pick(plant);
    restored.run_for(1.5);

    restored.assert_removed(plant);
    assert!(restored.records().plants.is_empty());
    assert!(!restored
        .save_extensions()
        .contains_key(GardenRecords::SAVE_KEY));
}

#[test]
fn test_rng_state_survives_save() {
    let mut saved = TestGarden::with_seed(5);
    saved.grow_plants("default", &PLANTER_SPOTS[..1]);
    let extensions = saved.save_extensions();

    let mut restored = TestGarden::with_seed(6);
    restored.load_extensions(&extensions);
    restored.tick(FRAME_DT);

    saved.land_seed("oak", Vec3::new(4.0, 0.0, 0.0));
    saved.tick(FRAME_DT);
    restored.land_seed("oak", Vec3::new(4.0, 0.0, 0.0));
    restored.tick(FRAME_DT);

    let newest = |garden: &mut TestGarden| {
        let plant = *garden.plants().last().unwrap();
        garden.plant(plant).planted_scale
    };
    assert_eq!(newest(&mut saved), newest(&mut restored));
}
