//! Scalar spring-damper integration and the per-channel timeline that drives
//! plant growth and shrink animations.

mod channel;
mod integrator;

pub use channel::{
    growth_bank, shrink_bank, AnimationTiming, ChannelBank, ChannelPhase, SpringChannelState,
};
pub use integrator::{
    converging_frequency, converging_time, pd_acceleration, spring_step, spring_step_vec3,
    ConvergenceCriteria, CALIBRATION_STEP,
};
