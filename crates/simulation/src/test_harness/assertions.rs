//! Assertion helpers for `TestGarden` integration tests.

use bevy::prelude::*;

use crate::plants::Lifecycle;

use super::TestGarden;

impl TestGarden {
    pub fn assert_lifecycle(&self, plant: Entity, expected: Lifecycle) {
        let actual = self.plant(plant).lifecycle;
        assert_eq!(actual, expected, "plant {plant:?} is {actual:?}, expected {expected:?}");
    }

    pub fn assert_removed(&self, plant: Entity) {
        assert!(!self.has_entity(plant), "plant {plant:?} still exists");
    }

    /// Assert the transform scale of `entity` is within `tolerance` of
    /// `expected` on every axis.
    pub fn assert_scale_near(&self, entity: Entity, expected: Vec3, tolerance: f32) {
        let scale = self.transform(entity).scale;
        assert!(
            (scale - expected).abs().max_element() <= tolerance,
            "scale of {entity:?} is {scale}, expected {expected} (+/- {tolerance})"
        );
    }

    pub fn assert_cluster_members(&self, cluster: Entity, expected: usize) {
        let members = self.cluster(cluster).members.len();
        assert_eq!(
            members, expected,
            "cluster {cluster:?} has {members} members, expected {expected}"
        );
    }
}
