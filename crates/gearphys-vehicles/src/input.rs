//! One-shot input buffers fed by host input events.

use gearphys_core::{Scalar, Vec2};

/// This tick's move vector: `x` = steer, `y` = throttle, nominally in [-1, 1].
///
/// Move events overwrite the pending value (last write wins); the vehicle
/// resets it to zero after every tick, so input must be re-sent each tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VehicleInputState {
    pending: Vec2,
}

impl VehicleInputState {
    /// Overwrite the pending move vector.
    #[inline] pub fn set(&mut self, value: Vec2) { self.pending = value; }
    /// Current pending value.
    #[inline] pub fn snapshot(&self) -> Vec2 { self.pending }
    /// Steer component.
    #[inline] pub fn steer(&self) -> Scalar { self.pending.x }
    /// Throttle component.
    #[inline] pub fn throttle(&self) -> Scalar { self.pending.y }
    /// Drop the pending value.
    #[inline] pub fn reset(&mut self) { self.pending = Vec2::ZERO; }
}

/// Accumulated look input (`x` = yaw, `y` = pitch) for the camera rig.
/// Never read by the physics.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LookInput {
    accum: Vec2,
}

impl LookInput {
    /// Add one look event.
    #[inline] pub fn add(&mut self, delta: Vec2) { self.accum += delta; }
    /// Return and clear the accumulated look.
    #[inline] pub fn take(&mut self) -> Vec2 { core::mem::take(&mut self.accum) }
}
