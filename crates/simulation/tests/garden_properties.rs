//! Property tests for the numeric cores: springs, channel timelines, flock
//! steering and planter bookkeeping.

use bevy::prelude::*;
use proptest::prelude::*;

use simulation::fauna::{
    cluster_visible, contain, steer_member, ClusterVolume, FaunaSpecies, FlockMember, FlockTuning,
};
use simulation::spawn::PlanterState;
use simulation::species::ChannelParams;
use simulation::spring::{spring_step, AnimationTiming, ChannelPhase, SpringChannelState};

fn phase_rank(phase: ChannelPhase) -> u8 {
    match phase {
        ChannelPhase::Dormant => 0,
        ChannelPhase::Animating => 1,
        ChannelPhase::Converging => 2,
        ChannelPhase::Settled => 3,
    }
}

fn unit_direction() -> impl Strategy<Value = Vec3> {
    (0.0f32..std::f32::consts::TAU, -0.6f32..0.6f32)
        .prop_map(|(heading, pitch)| Vec3::new(heading.cos(), pitch.sin(), heading.sin()).normalize())
}

proptest! {
    // -----------------------------------------------------------------------
    // Springs
    // -----------------------------------------------------------------------

    #[test]
    fn spring_step_stays_finite(
        value in -10.0f32..10.0,
        velocity in -50.0f32..50.0,
        target in -10.0f32..10.0,
        frequency in 0.001f32..20.0,
        damping in 0.0f32..5.0,
        dt in 0.0f32..0.5,
    ) {
        let (v, x) = spring_step(value, velocity, target, frequency, damping, dt);
        prop_assert!(v.is_finite() && x.is_finite());
    }

    #[test]
    fn damped_spring_settles_on_target(
        target in 0.5f32..1.5,
        frequency in 0.5f32..3.0,
        damping in 0.8f32..2.0,
    ) {
        let (mut velocity, mut value) = (0.0, 0.0);
        for _ in 0..72 * 10 {
            (velocity, value) = spring_step(value, velocity, target, frequency, damping, 1.0 / 72.0);
        }
        prop_assert!((value - target).abs() < 0.01, "value {value} target {target}");
    }

    // -----------------------------------------------------------------------
    // Channel timelines
    // -----------------------------------------------------------------------

    #[test]
    fn channel_phase_never_goes_back(
        fraction in -0.5f32..1.5,
        animation in -1.0f32..3.0,
        convergence in -1.0f32..1.0,
        t1 in -1.0f32..6.0,
        step in 0.0f32..3.0,
    ) {
        let params = ChannelParams {
            delayed_start_fraction: fraction,
            pd_damping: 0.8,
            pd_frequency: 0.9,
            margin: 0.0,
        };
        let timing = AnimationTiming {
            animation_duration: animation,
            convergence_duration: convergence,
            converging_frequency: 5.0,
            converging_damping: 2.0,
        };
        let channel = SpringChannelState::new(&params, &timing, 0.0, 1.0);
        prop_assert!(channel.start_time >= 0.0);
        prop_assert!(channel.start_time <= channel.animation_duration);
        prop_assert!(channel.animation_duration <= channel.total_duration);
        prop_assert!(phase_rank(channel.phase(t1)) <= phase_rank(channel.phase(t1 + step)));
    }

    #[test]
    fn new_channel_rests_at_its_start_value(
        value in -2.0f32..2.0,
        target in -2.0f32..2.0,
        now in 0.0f32..2.0,
    ) {
        let params = ChannelParams {
            delayed_start_fraction: 0.0,
            pd_damping: 0.8,
            pd_frequency: 0.9,
            margin: 0.0,
        };
        let timing = AnimationTiming {
            animation_duration: 1.0,
            convergence_duration: 0.25,
            converging_frequency: 5.0,
            converging_damping: 2.0,
        };
        let mut channel = SpringChannelState::new(&params, &timing, value, target);
        prop_assert_eq!(channel.value, value);
        prop_assert_eq!(channel.velocity, 0.0);

        // A zero-length step moves nothing, whatever the phase.
        let before = channel;
        channel.step(now, 0.0);
        prop_assert_eq!(channel, before);
    }

    #[test]
    fn channel_holds_before_start_and_after_end(
        fraction in 0.1f32..0.9,
        dt in 0.001f32..0.1,
    ) {
        let params = ChannelParams {
            delayed_start_fraction: fraction,
            pd_damping: 0.8,
            pd_frequency: 0.9,
            margin: 0.0,
        };
        let timing = AnimationTiming {
            animation_duration: 1.0,
            convergence_duration: 0.25,
            converging_frequency: 5.0,
            converging_damping: 2.0,
        };
        let mut channel = SpringChannelState::new(&params, &timing, 0.0, 1.0);
        let before = channel;
        channel.step(channel.start_time * 0.5, dt);
        prop_assert_eq!(channel, before);
        channel.step(channel.total_duration + 1.0, dt);
        prop_assert_eq!(channel, before);
    }

    // -----------------------------------------------------------------------
    // Flock steering
    // -----------------------------------------------------------------------

    #[test]
    fn containment_only_rotates(
        position in prop::array::uniform3(-3.0f32..3.0),
        direction in unit_direction(),
    ) {
        let volume = ClusterVolume::new(Vec3::Y, Vec3::new(2.0, 1.0, 2.0));
        let out = contain(Vec3::from_array(position), direction, &volume, 0.1);
        prop_assert!((out.direction.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn member_moves_at_most_speed_times_dt(
        position in prop::array::uniform3(-3.0f32..3.0),
        direction in unit_direction(),
        speed in 0.1f32..1.0,
        now in 0.0f32..100.0,
        dt in 0.0f32..0.1,
    ) {
        let volume = ClusterVolume::new(Vec3::Y, Vec3::new(2.0, 1.0, 2.0));
        let start = Vec3::from_array(position);
        let mut member = FlockMember {
            species: FaunaSpecies::BlueButterfly,
            position: start,
            rotation: Quat::IDENTITY,
            direction,
            speed,
            vertical_offset: 0.3,
            horizontal_offset: 0.7,
        };
        steer_member(&mut member, &volume, &FlockTuning::butterflies(), now, dt);
        prop_assert!(member.position.distance(start) <= speed * dt + 1e-4);
        prop_assert!((member.direction.length() - 1.0).abs() < 1e-3);
        prop_assert!(member.position.is_finite());
    }

    #[test]
    fn clusters_without_points_are_always_visible(
        player in prop::option::of(prop::array::uniform3(-50.0f32..50.0)),
    ) {
        prop_assert!(cluster_visible(&[], player.map(Vec3::from_array)));
    }

    // -----------------------------------------------------------------------
    // Planter bookkeeping
    // -----------------------------------------------------------------------

    #[test]
    fn first_spawn_flags_at_fourth_plant(count in 0usize..20) {
        let mut state = PlanterState::default();
        for i in 0..count {
            state.record_plant(Vec3::new(i as f32 * 0.1, 0.0, 0.0));
        }
        prop_assert_eq!(state.pending_first_spawn, count >= 4);
        prop_assert!(!state.pending_member_add, "no cluster, no member add");
    }
}
