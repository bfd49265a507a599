//! Seams to the host engine: chassis body, spatial queries and diagnostics.
//!
//! The vehicle never owns any of these; the host passes them in per call
//! (chassis and queries) or at construction (diagnostics).

use gearphys_core::{Scalar, Transform, Vec2, Vec3};
use tracing::{debug, trace, warn};

/// Nearest blocking hit of a probe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Distance from the probe origin to `point`.
    pub distance: Scalar,
    /// World-space contact point.
    pub point: Vec3,
}

/// The simulated chassis rigid body.
pub trait ChassisHost {
    /// Current world transform of the chassis root.
    fn world_transform(&self) -> Transform;
    /// Accumulate `force` at world-space `point` for the next integration.
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3);
    /// Socket pose relative to the chassis root, `None` if the socket does not exist.
    fn socket_local_transform(&self, name: &str) -> Option<Transform>;
}

/// Synchronous ray queries against the physics world.
pub trait SpatialQuery {
    /// Nearest blocking hit on the segment `origin -> end`.
    /// With `ignore_self` the chassis' own geometry is not reported.
    fn raycast_nearest(&self, origin: Vec3, end: Vec3, ignore_self: bool) -> Option<RayHit>;
}

/// Non-fatal events reported by the vehicle. All methods default to no-ops.
pub trait Diagnostics {
    /// A mount named a socket the chassis does not have; identity was used.
    fn socket_missing(&mut self, _wheel: &str) {}
    /// A mount had no wheel data and produced no wheel.
    fn mount_skipped(&mut self, _wheel: &str) {}
    /// The tick was dropped because `dt` could not be divided by.
    fn tick_skipped(&mut self, _dt: Scalar) {}
    /// The wheel's probe found no ground this tick.
    fn wheel_airborne(&mut self, _wheel: &str) {}
    /// The wheel produced a non-finite force, which was not applied.
    fn force_rejected(&mut self, _wheel: &str, _force: Vec3) {}
    /// The (steer, throttle) snapshot consumed by this tick.
    fn input_snapshot(&mut self, _input: Vec2) {}
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpDiagnostics;

impl Diagnostics for NoOpDiagnostics {}

/// Forwards events to `tracing` with structured fields.
#[derive(Clone, Debug)]
pub struct TracingDiagnostics {
    vehicle: String,
}

impl TracingDiagnostics {
    /// Tag every event with `vehicle`.
    pub fn new(vehicle: impl Into<String>) -> Self { Self { vehicle: vehicle.into() } }
}

impl Default for TracingDiagnostics {
    fn default() -> Self { Self::new("vehicle") }
}

impl Diagnostics for TracingDiagnostics {
    fn socket_missing(&mut self, wheel: &str) {
        warn!(vehicle = %self.vehicle, wheel, "wheel socket not found, using identity transform");
    }

    fn mount_skipped(&mut self, wheel: &str) {
        debug!(vehicle = %self.vehicle, wheel, "mount has no wheel data, skipped");
    }

    fn tick_skipped(&mut self, dt: Scalar) {
        debug!(vehicle = %self.vehicle, dt, "degenerate dt, tick skipped");
    }

    fn wheel_airborne(&mut self, wheel: &str) {
        trace!(vehicle = %self.vehicle, wheel, "no ground under wheel");
    }

    fn force_rejected(&mut self, wheel: &str, force: Vec3) {
        warn!(vehicle = %self.vehicle, wheel, ?force, "non-finite wheel force dropped");
    }

    fn input_snapshot(&mut self, input: Vec2) {
        trace!(vehicle = %self.vehicle, steer = input.x, throttle = input.y, "move input");
    }
}
