//! Axis-aligned static colliders and the two world queries the garden needs:
//! a downward ray (planter detection) and a sphere overlap (watering).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Which query a collider answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    Planter,
    Plant,
}

/// Axis-aligned box attached to an entity's `Transform`.
///
/// `half_extents` and `offset` are in local units and get scaled by the
/// transform's scale; rotation is ignored.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
    pub layer: CollisionLayer,
}

impl StaticCollider {
    pub fn new(half_extents: Vec3, layer: CollisionLayer) -> Self {
        Self {
            half_extents,
            offset: Vec3::ZERO,
            layer,
        }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn world_box(&self, transform: &Transform) -> WorldBox {
        let center = transform.translation + self.offset * transform.scale;
        WorldBox::from_center(center, self.half_extents * transform.scale.abs())
    }
}

/// World-space axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBox {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// A box with no footprint on the ground plane cannot catch anything.
    pub fn has_ground_area(&self) -> bool {
        let size = self.size();
        size.x > 0.0 && size.z > 0.0 && size.is_finite()
    }

    /// Distance along a straight-down ray from `origin` to the box, if it is
    /// hit within `far`. An origin inside the box hits at distance 0.
    pub fn ray_down_distance(&self, origin: Vec3, far: f32) -> Option<f32> {
        let inside_footprint = origin.x >= self.min.x
            && origin.x <= self.max.x
            && origin.z >= self.min.z
            && origin.z <= self.max.z;
        if !inside_footprint || origin.y < self.min.y {
            return None;
        }
        let distance = (origin.y - self.max.y).max(0.0);
        (distance <= far).then_some(distance)
    }

    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        let closest = center.clamp(self.min, self.max);
        closest.distance_squared(center) <= radius * radius
    }
}

/// Result of `CollisionWorld::raycast_down`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest hit of a downward ray among `boxes`.
pub fn nearest_hit_down(
    boxes: impl IntoIterator<Item = (Entity, WorldBox)>,
    origin: Vec3,
    far: f32,
) -> Option<RayHit> {
    boxes
        .into_iter()
        .filter_map(|(entity, world_box)| {
            world_box
                .ray_down_distance(origin, far)
                .map(|distance| RayHit {
                    entity,
                    distance,
                    point: origin - Vec3::Y * distance,
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Read-only access to every `StaticCollider` in the world.
#[derive(SystemParam)]
pub struct CollisionWorld<'w, 's> {
    colliders: Query<'w, 's, (Entity, &'static StaticCollider, &'static Transform)>,
}

impl CollisionWorld<'_, '_> {
    fn boxes_on(&self, layer: CollisionLayer) -> impl Iterator<Item = (Entity, WorldBox)> + '_ {
        self.colliders
            .iter()
            .filter(move |(_, collider, _)| collider.layer == layer)
            .map(|(entity, collider, transform)| (entity, collider.world_box(transform)))
    }

    /// Cast a ray straight down from `origin` and return the closest hit on
    /// `layer` within `far`.
    pub fn raycast_down(&self, origin: Vec3, far: f32, layer: CollisionLayer) -> Option<RayHit> {
        nearest_hit_down(self.boxes_on(layer), origin, far)
    }

    /// Entities on `layer` whose box overlaps the sphere.
    pub fn sphere_query(&self, center: Vec3, radius: f32, layer: CollisionLayer) -> Vec<Entity> {
        self.boxes_on(layer)
            .filter(|(_, world_box)| world_box.intersects_sphere(center, radius))
            .map(|(entity, _)| entity)
            .collect()
    }
}
