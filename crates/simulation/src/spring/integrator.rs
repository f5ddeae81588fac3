use bevy::math::Vec3;

/// Acceleration of a stable (implicit) PD controller pulling `value` toward
/// `target` and `velocity` toward `target_velocity`.
///
/// `frequency` sets how quickly the target is reached; `damping` below 1.0
/// overshoots, around 1.0 settles with little overshoot.
pub fn pd_acceleration(
    value: f32,
    velocity: f32,
    target: f32,
    target_velocity: f32,
    frequency: f32,
    damping: f32,
    dt: f32,
) -> f32 {
    let ks = frequency * frequency * 36.0;
    let kd = frequency * damping * 9.0;
    let scale = 1.0 / (1.0 + kd * dt + ks * dt * dt);

    let ks_implicit = ks * scale;
    let kd_implicit = (kd + ks * dt) * scale;

    ks_implicit * (target - value) + kd_implicit * (target_velocity - velocity)
}

/// One semi-implicit Euler step of the spring toward a resting `target`.
/// Returns `(velocity, value)`.
pub fn spring_step(
    value: f32,
    velocity: f32,
    target: f32,
    frequency: f32,
    damping: f32,
    dt: f32,
) -> (f32, f32) {
    let accel = pd_acceleration(value, velocity, target, 0.0, frequency, damping, dt);
    let velocity = velocity + accel * dt;
    (velocity, value + velocity * dt)
}

/// Component-wise `spring_step` for vectors. Updates `value` and `velocity`
/// in place.
pub fn spring_step_vec3(
    value: &mut Vec3,
    velocity: &mut Vec3,
    target: Vec3,
    frequency: f32,
    damping: f32,
    dt: f32,
) {
    let accel = Vec3::new(
        pd_acceleration(value.x, velocity.x, target.x, 0.0, frequency, damping, dt),
        pd_acceleration(value.y, velocity.y, target.y, 0.0, frequency, damping, dt),
        pd_acceleration(value.z, velocity.z, target.z, 0.0, frequency, damping, dt),
    );
    *velocity += accel * dt;
    *value += *velocity * dt;
}

// =============================================================================
// Calibration
// =============================================================================

/// Simulation step used by the calibration helpers, in seconds.
pub const CALIBRATION_STEP: f32 = 0.01;

/// When a simulated transition counts as converged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceCriteria {
    /// Overshoots tolerated before the transition is considered settled.
    pub max_bounces: u32,
    pub value_threshold: f32,
    pub speed_threshold: f32,
    /// Give up after this many simulated seconds.
    pub max_time: f32,
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        Self {
            max_bounces: 2,
            value_threshold: 0.01,
            speed_threshold: 0.01,
            max_time: 10.0,
        }
    }
}

/// Time a spring needs to settle from `start` on `target`, or `None` if it
/// does not within `criteria.max_time`.
///
/// Runs a full simulation; meant for tooling and content checks, not per
/// frame use.
pub fn converging_time(
    start: f32,
    start_velocity: f32,
    target: f32,
    frequency: f32,
    damping: f32,
    criteria: &ConvergenceCriteria,
) -> Option<f32> {
    let steps = (criteria.max_time / CALIBRATION_STEP).ceil() as u32;
    let mut value = start;
    let mut velocity = start_velocity;
    // The first crossing of the target is the approach, not a bounce.
    let mut crossings = 0u32;

    for i in 0..steps {
        let previous = value;
        (velocity, value) = spring_step(value, velocity, target, frequency, damping, CALIBRATION_STEP);
        if (previous - target) * (value - target) < 0.0 {
            crossings += 1;
        }
        let bounced_out = crossings > criteria.max_bounces;
        let settled = (value - target).abs() < criteria.value_threshold
            && velocity.abs() < criteria.speed_threshold;
        if bounced_out || settled {
            return Some(CALIBRATION_STEP * (i + 1) as f32);
        }
    }
    None
}

/// Frequency that makes a spring with `damping` converge in roughly
/// `target_time`, refined over `cycles` rounds starting from 1 Hz.
pub fn converging_frequency(
    start: f32,
    start_velocity: f32,
    target: f32,
    damping: f32,
    target_time: f32,
    criteria: &ConvergenceCriteria,
    cycles: u32,
) -> Option<f32> {
    if target_time <= 0.0 {
        return None;
    }
    let mut frequency = 1.0;
    for _ in 0..cycles {
        let time = converging_time(start, start_velocity, target, frequency, damping, criteria)?;
        frequency *= time / target_time;
    }
    Some(frequency)
}
