//! Slip-ratio lateral grip and engine drive.

use gearphys_core::{lerp, Scalar, StepCtx, Vec3};

use crate::wheel::WheelState;

/// Below this `|lateral + forward|` the slide ratio falls back to zero.
pub const SLIDE_RATIO_EPSILON: Scalar = 1.0e-4;

/// Planar contribution of one grounded wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TractionForce {
    /// Engine force along the wheel forward axis.
    pub drive: Vec3,
    /// Grip force along the wheel right axis, opposing lateral speed.
    pub lateral: Vec3,
    /// Wheel velocity along forward.
    pub forward_speed: Scalar,
    /// Wheel velocity along right.
    pub lateral_speed: Scalar,
    /// Share of lateral motion, in [0, 1].
    pub slide_ratio: Scalar,
    /// Friction blended from the slide ratio.
    pub slide_friction: Scalar,
}

/// `clamp(lateral / (lateral + forward), 0, 1)`.
///
/// The sum may cancel out (e.g. lateral = -forward); then the ratio is 0.
pub fn slide_ratio(lateral_speed: Scalar, forward_speed: Scalar) -> Scalar {
    let denom = lateral_speed + forward_speed;
    if denom.abs() < SLIDE_RATIO_EPSILON {
        return 0.0;
    }
    let r = lateral_speed / denom;
    if r.is_finite() { r.clamp(0.0, 1.0) } else { 0.0 }
}

/// Drive and lateral forces for a grounded wheel.
pub fn solve(wheel: &WheelState, throttle: Scalar, ctx: &StepCtx) -> TractionForce {
    let cfg = &wheel.config;
    let forward = wheel.world.forward();
    let right = wheel.world.right();

    let drive = if cfg.affected_by_engine { forward * cfg.torque * throttle } else { Vec3::ZERO };

    let forward_speed = forward.dot(wheel.velocity);
    let lateral_speed = right.dot(wheel.velocity);
    let ratio = slide_ratio(lateral_speed, forward_speed);
    let slide_friction = lerp(cfg.slide_friction_min, cfg.slide_friction_max, ratio);

    // Impulse-like: cancels lateral velocity within the tick, hence / dt.
    let lateral = right * lateral_speed * cfg.wheel_mass * -slide_friction * ctx.inv_dt();

    TractionForce { drive, lateral, forward_speed, lateral_speed, slide_ratio: ratio, slide_friction }
}
