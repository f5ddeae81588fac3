//! Integration tests for the garden using the `TestGarden` harness.
//!
//! Each test spins up a headless Bevy App with `SimulationPlugin` and drives
//! it frame by frame through the manual clock.

use bevy::prelude::*;

mod persistence_tests;

/// Player standing south of the origin, facing away from it.
const PLAYER_POSITION: Vec3 = Vec3::new(0.0, 1.6, -5.0);

/// Four spots inside a planter of half width 1 centred on the origin.
const PLANTER_SPOTS: [Vec3; 4] = [
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(0.5, 0.0, 0.5),
];
