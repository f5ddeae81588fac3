use crate::config::{MAX_SPRING_SUBSTEP, MIN_CONVERGENCE_DURATION, MIN_SPRING_FREQUENCY};
use crate::sim_rng::SimRng;
use crate::species::{ChannelParams, ChannelTable, SpeciesProfile};

use super::integrator::spring_step;

/// Where a channel is on its timeline at a given instance time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelPhase {
    /// Before `start_time`: nothing moves.
    Dormant,
    /// Driven by the channel's own pd frequency and damping.
    Animating,
    /// Parameters blend toward the converging frequency and damping.
    Converging,
    /// Past `total_duration`: the value stays where it is.
    Settled,
}

/// Spring state of one animated channel of one plant.
///
/// Times are measured on the owning instance's timer, starting at 0 when the
/// animation (growth or shrink) begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringChannelState {
    pub value: f32,
    pub velocity: f32,
    pub target_value: f32,
    pub start_time: f32,
    pub animation_duration: f32,
    pub total_duration: f32,
    pub pd_frequency: f32,
    pub pd_damping: f32,
    pub converging_frequency: f32,
    pub converging_damping: f32,
}

/// Timing and converging parameters shared by every channel of one animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub animation_duration: f32,
    pub convergence_duration: f32,
    pub converging_frequency: f32,
    pub converging_damping: f32,
}

impl AnimationTiming {
    pub fn growth(profile: &SpeciesProfile) -> Self {
        Self {
            animation_duration: profile.growth_duration,
            convergence_duration: profile.convergence_duration,
            converging_frequency: profile.convergence_frequency,
            converging_damping: profile.convergence_damping,
        }
    }

    pub fn shrink(profile: &SpeciesProfile) -> Self {
        Self {
            animation_duration: profile.shrink_duration,
            ..Self::growth(profile)
        }
    }
}

impl SpringChannelState {
    /// Build a channel at rest at `value`, heading for `target_value`.
    ///
    /// Negative durations become zero and frequencies are raised to
    /// `MIN_SPRING_FREQUENCY`; `total_duration` is always
    /// `animation_duration + convergence_duration`.
    pub fn new(params: &ChannelParams, timing: &AnimationTiming, value: f32, target_value: f32) -> Self {
        let animation_duration = timing.animation_duration.max(0.0);
        let convergence_duration = timing.convergence_duration.max(0.0);
        let fraction = params.delayed_start_fraction.clamp(0.0, 1.0);
        Self {
            value,
            velocity: 0.0,
            target_value,
            start_time: animation_duration * fraction,
            animation_duration,
            total_duration: animation_duration + convergence_duration,
            pd_frequency: params.pd_frequency.max(MIN_SPRING_FREQUENCY),
            pd_damping: params.pd_damping.max(0.0),
            converging_frequency: timing.converging_frequency.max(MIN_SPRING_FREQUENCY),
            converging_damping: timing.converging_damping.max(0.0),
        }
    }

    pub fn convergence_duration(&self) -> f32 {
        self.total_duration - self.animation_duration
    }

    pub fn phase(&self, now: f32) -> ChannelPhase {
        if now < self.start_time {
            ChannelPhase::Dormant
        } else if now < self.animation_duration {
            ChannelPhase::Animating
        } else if now <= self.total_duration {
            ChannelPhase::Converging
        } else {
            ChannelPhase::Settled
        }
    }

    /// Spring `(frequency, damping)` in effect at `now`.
    pub fn spring_params(&self, now: f32) -> (f32, f32) {
        match self.phase(now) {
            ChannelPhase::Converging => {
                let convergence = self.convergence_duration();
                let p = if convergence < MIN_CONVERGENCE_DURATION {
                    1.0
                } else {
                    ((now - self.animation_duration) / convergence).clamp(0.0, 1.0)
                };
                (
                    lerp(self.pd_frequency, self.converging_frequency, p),
                    lerp(self.pd_damping, self.converging_damping, p),
                )
            }
            _ => (self.pd_frequency, self.pd_damping),
        }
    }

    /// Advance by `dt` seconds ending at instance time `now`.
    ///
    /// Only the part of the frame inside `[start_time, total_duration]`
    /// integrates, in steps of at most `MAX_SPRING_SUBSTEP`. A frame that
    /// runs past the end still finishes the animation.
    pub fn step(&mut self, now: f32, dt: f32) {
        let from = (now - dt).max(self.start_time);
        let to = now.min(self.total_duration);
        if to <= from {
            return;
        }

        let span = to - from;
        let steps = (span / MAX_SPRING_SUBSTEP).ceil().max(1.0) as u32;
        let h = span / steps as f32;
        for i in 1..=steps {
            let t = if i == steps { to } else { from + h * i as f32 };
            let (frequency, damping) = self.spring_params(t);
            let (velocity, value) =
                spring_step(self.value, self.velocity, self.target_value, frequency, damping, h);
            self.velocity = velocity;
            self.value = value;
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// =============================================================================
// Channel banks
// =============================================================================

/// The five spring channels of one plant animation.
pub type ChannelBank = ChannelTable<SpringChannelState>;

/// Growth channels: every value starts at 0 and heads for a target scattered
/// around 1 by the channel's margin. Margins are drawn root first.
pub fn growth_bank(profile: &SpeciesProfile, rng: &mut SimRng) -> ChannelBank {
    let timing = AnimationTiming::growth(profile);
    ChannelTable::from_fn(|channel| {
        let params = profile.growth_channels.get(channel);
        let target = rng.around_one(params.margin);
        SpringChannelState::new(params, &timing, 0.0, target)
    })
}

/// Shrink channels: every value starts at 1 and heads for 0.
pub fn shrink_bank(profile: &SpeciesProfile) -> ChannelBank {
    let timing = AnimationTiming::shrink(profile);
    ChannelTable::from_fn(|channel| {
        SpringChannelState::new(profile.shrink_channels.get(channel), &timing, 1.0, 0.0)
    })
}

impl ChannelTable<SpringChannelState> {
    pub fn step_all(&mut self, now: f32, dt: f32) {
        for (_, state) in self.iter_mut() {
            state.step(now, dt);
        }
    }

    /// Current channel values as `(root, [x, y, z, w])`.
    pub fn values(&self) -> (f32, [f32; 4]) {
        (
            self.root.value,
            [self.x.value, self.y.value, self.z.value, self.w.value],
        )
    }
}
