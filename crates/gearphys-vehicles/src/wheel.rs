//! Per-wheel state and initialization from mounts.

use gearphys_core::{Scalar, StepCtx, Transform, Vec3};

use crate::config::{WheelConfig, WheelMount};
use crate::host::{ChassisHost, Diagnostics};
use crate::suspension::SuspensionForce;
use crate::traction::TractionForce;

/// Forces a wheel produced on its last grounded tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelForces {
    /// Spring, damping and gravity terms along the wheel up axis.
    pub suspension: SuspensionForce,
    /// Drive and lateral grip terms.
    pub traction: TractionForce,
    /// Sum applied to the chassis at the wheel position.
    pub total: Vec3,
}

impl WheelForces {
    /// Combine the two contributions.
    pub fn new(suspension: SuspensionForce, traction: TractionForce) -> Self {
        let total = suspension.total + traction.lateral + traction.drive;
        Self { suspension, traction, total }
    }
}

/// Runtime state of one wheel, owned by its vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelState {
    /// Socket name the wheel was created from.
    pub name: String,
    /// Private copy of the mount's wheel data.
    pub config: WheelConfig,
    /// Socket pose relative to the chassis root, fixed for the vehicle lifetime.
    pub socket: Transform,
    /// `suspension_rest_length + wheel_radius`.
    pub rest_length: Scalar,
    /// World transform this tick, steering included.
    pub world: Transform,
    /// World transform on the previous stepped tick.
    pub last_world: Transform,
    /// Finite-difference world velocity of the wheel origin.
    pub velocity: Vec3,
    /// Compression, positive = compressed. Kept while airborne.
    pub suspension_offset: Scalar,
    /// Compression on the previous grounded tick.
    pub last_suspension_offset: Scalar,
    /// `suspension_offset - last_suspension_offset`, not divided by dt.
    pub suspension_speed: Scalar,
    /// Whether the probe hit ground on the last stepped tick.
    pub grounded: bool,
    /// Forces from the last stepped tick; zero while airborne.
    pub forces: WheelForces,
    primed: bool,
}

impl WheelState {
    /// Fresh wheel at identity with zero motion and zero compression.
    pub fn new(name: impl Into<String>, config: WheelConfig, socket: Transform) -> Self {
        Self {
            name: name.into(),
            rest_length: config.rest_length(),
            config,
            socket,
            world: Transform::IDENTITY,
            last_world: Transform::IDENTITY,
            velocity: Vec3::ZERO,
            suspension_offset: 0.0,
            last_suspension_offset: 0.0,
            suspension_speed: 0.0,
            grounded: false,
            forces: WheelForces::default(),
            primed: false,
        }
    }

    /// Steering yaw in degrees for a steer input; zero for non-steering wheels.
    #[inline]
    pub fn steer_angle(&self, steer: Scalar) -> Scalar {
        if self.config.affected_by_steering { self.config.max_steer_angle * steer } else { 0.0 }
    }

    /// Move the wheel with the chassis, apply steering and derive velocity.
    ///
    /// The steering yaw is applied in the wheel's own frame, so it turns the whole
    /// forward/right basis used by traction. On the first stepped tick the previous
    /// transform is seeded from the current one, so velocity starts at zero.
    pub fn update_pose(&mut self, chassis: &Transform, steer: Scalar, ctx: &StepCtx) {
        let mut world = chassis.mul_transform(&self.socket);
        if self.config.affected_by_steering {
            world = world.mul_transform(&Transform::from_yaw_degrees(self.steer_angle(steer)));
        }

        self.last_world = if self.primed { self.world } else { world };
        self.primed = true;
        self.world = world;
        self.velocity = (self.world.translation - self.last_world.translation) * ctx.inv_dt();
    }

    /// Probe segment: from the wheel origin along its negative up axis for `rest_length`.
    #[inline]
    pub fn probe_segment(&self) -> (Vec3, Vec3) {
        let start = self.world.translation;
        (start, start - self.world.up() * self.rest_length)
    }

    /// `(offset, last_offset, speed)`, for rolling back a rejected tick.
    #[inline]
    pub fn suspension_snapshot(&self) -> (Scalar, Scalar, Scalar) {
        (self.suspension_offset, self.last_suspension_offset, self.suspension_speed)
    }

    /// Put back a [`suspension_snapshot`](Self::suspension_snapshot).
    #[inline]
    pub fn restore_suspension(&mut self, (offset, last, speed): (Scalar, Scalar, Scalar)) {
        self.suspension_offset = offset;
        self.last_suspension_offset = last;
        self.suspension_speed = speed;
    }

    /// No ground this tick. Compression is left as it was on the last grounded tick.
    pub fn mark_airborne(&mut self) {
        self.grounded = false;
        self.forces = WheelForces::default();
    }
}

/// Build wheel states for every mount that has wheel data, in mount order.
///
/// Mounts without data are skipped. A socket the chassis does not know falls back to
/// identity and is reported; the wheel is still created.
pub fn init_wheels<C, D>(chassis: &C, mounts: &[WheelMount], diagnostics: &mut D) -> Vec<WheelState>
where
    C: ChassisHost + ?Sized,
    D: Diagnostics + ?Sized,
{
    let mut wheels = Vec::with_capacity(mounts.len());
    for mount in mounts {
        let Some(config) = mount.config else {
            diagnostics.mount_skipped(&mount.name);
            continue;
        };
        let socket = chassis.socket_local_transform(&mount.name).unwrap_or_else(|| {
            diagnostics.socket_missing(&mount.name);
            Transform::IDENTITY
        });
        wheels.push(WheelState::new(mount.name.clone(), config, socket));
    }
    wheels
}
