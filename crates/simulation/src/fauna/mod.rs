mod steering;
mod systems;
pub mod types;

pub use steering::{
    clamp_vertical, cluster_visible, contain, member_rotation, pitch, random_member,
    steer_member, tick_cluster, variation, vertical_angle, Containment,
};
pub use systems::{move_flocks, FaunaPlugin};
pub use types::{
    ClusterVolume, FaunaSpawnEvent, FaunaSpecies, FlockCluster, FlockMember, FlockTuning,
    ObservationPoint,
};
