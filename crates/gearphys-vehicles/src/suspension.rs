//! Raycast spring-damper suspension.

use gearphys_core::{Scalar, Vec3, GRAVITY_COMP};

use crate::host::{RayHit, SpatialQuery};
use crate::wheel::WheelState;

/// Vertical contribution of one grounded wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SuspensionForce {
    /// `offset * strength`.
    pub spring: Scalar,
    /// `dot(up, velocity) * damping`.
    pub damping: Scalar,
    /// `up * wheel_mass * -9.8`.
    pub gravity: Vec3,
    /// `up * (spring - damping) + gravity`.
    pub total: Vec3,
}

/// Cast the wheel's probe. `None` means airborne.
pub fn probe<Q: SpatialQuery + ?Sized>(wheel: &WheelState, query: &Q) -> Option<RayHit> {
    let (start, end) = wheel.probe_segment();
    query.raycast_nearest(start, end, true)
}

/// Update compression from a hit at `hit_distance` and compute the vertical force.
///
/// Over-extension is not clamped: the offset is exactly `rest_length - hit_distance`.
pub fn solve(wheel: &mut WheelState, hit_distance: Scalar) -> SuspensionForce {
    wheel.last_suspension_offset = wheel.suspension_offset;
    wheel.suspension_offset = wheel.rest_length - hit_distance;
    // Raw per-tick delta; damping below uses world velocity instead.
    wheel.suspension_speed = wheel.suspension_offset - wheel.last_suspension_offset;

    let up = wheel.world.up();
    let spring = wheel.suspension_offset * wheel.config.suspension_strength;
    let damping = up.dot(wheel.velocity) * wheel.config.suspension_damping;
    let gravity = up * wheel.config.wheel_mass * -GRAVITY_COMP;

    SuspensionForce { spring, damping, gravity, total: up * (spring - damping) + gravity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WheelConfig;
    use gearphys_core::{vec3, StepCtx, Transform};

    fn wheel() -> WheelState {
        let config = WheelConfig {
            suspension_rest_length: 50.0,
            wheel_radius: 30.0,
            suspension_strength: 20_000.0,
            suspension_damping: 200_000.0,
            ..Default::default()
        };
        let mut w = WheelState::new("FL", config, Transform::IDENTITY);
        w.update_pose(&Transform::IDENTITY, 0.0, &StepCtx::guarded(1.0 / 60.0, 1).unwrap());
        w
    }

    #[test] fn compressed_spring() {
        let mut w = wheel();
        let f = solve(&mut w, 70.0);
        assert_eq!(w.suspension_offset, 10.0);
        assert_eq!(f.spring, 200_000.0);
        assert_eq!(f.damping, 0.0);
        assert!((f.total - f.gravity - vec3(0.0, 0.0, 200_000.0)).length() < 1e-3);
    }

    #[test] fn over_extension_is_not_clamped() {
        let mut w = wheel();
        solve(&mut w, 95.0);
        assert_eq!(w.suspension_offset, 80.0 - 95.0);
    }

    #[test] fn speed_is_raw_delta() {
        let mut w = wheel();
        solve(&mut w, 70.0);
        solve(&mut w, 64.0);
        assert_eq!(w.last_suspension_offset, 10.0);
        assert_eq!(w.suspension_speed, 6.0);
    }

    #[test] fn damping_opposes_upward_velocity() {
        let mut w = wheel();
        w.velocity = vec3(0.0, 0.0, 0.5);
        let f = solve(&mut w, 80.0);
        assert_eq!(f.spring, 0.0);
        assert_eq!(f.damping, 100_000.0);
        assert!(f.total.z < f.gravity.z);
    }

    #[test] fn gravity_term_uses_wheel_mass() {
        let mut w = wheel();
        let f = solve(&mut w, 80.0);
        assert!((f.gravity - vec3(0.0, 0.0, -20_000.0 * 9.8)).length() < 1e-2);
    }
}
