//! Per-tick orchestration over all wheels of one chassis.

use gearphys_core::{hash_transform, hash_vec3, Scalar, StepCtx, StepHasher, StepStats, Vec2, Vec3};
use gearphys_viz::{basis_lines, DebugLine, LineBuffer};

use crate::config::{VehicleSettings, WheelMount};
use crate::host::{ChassisHost, Diagnostics, SpatialQuery, TracingDiagnostics};
use crate::input::{LookInput, VehicleInputState};
use crate::suspension;
use crate::traction;
use crate::wheel::{init_wheels, WheelForces, WheelState};

/// One chassis and its wheels.
///
/// The chassis body and the physics world stay with the host and are passed to
/// [`Vehicle::step`]; the vehicle only owns its wheel states, input buffers and
/// the injected diagnostics sink.
pub struct Vehicle<D: Diagnostics = TracingDiagnostics> {
    wheels: Vec<WheelState>,
    input: VehicleInputState,
    look: LookInput,
    settings: VehicleSettings,
    diagnostics: D,
    debug_lines: LineBuffer,
    tick: u64,
    // (force, world point) collected before the serial apply pass
    pending: Vec<(Vec3, Vec3)>,
}

impl Vehicle<TracingDiagnostics> {
    /// Build wheels for `mounts` and report through `tracing`.
    pub fn new<C: ChassisHost + ?Sized>(chassis: &C, mounts: &[WheelMount], settings: VehicleSettings) -> Self {
        Self::with_diagnostics(chassis, mounts, settings, TracingDiagnostics::default())
    }
}

impl<D: Diagnostics> Vehicle<D> {
    /// Build wheels for `mounts` with a caller-supplied diagnostics sink.
    ///
    /// Call once the chassis and its sockets exist; mounts are read only here.
    pub fn with_diagnostics<C: ChassisHost + ?Sized>(
        chassis: &C,
        mounts: &[WheelMount],
        settings: VehicleSettings,
        mut diagnostics: D,
    ) -> Self {
        let wheels = init_wheels(chassis, mounts, &mut diagnostics);
        let pending = Vec::with_capacity(wheels.len());
        Self {
            wheels,
            input: VehicleInputState::default(),
            look: LookInput::default(),
            settings,
            diagnostics,
            debug_lines: LineBuffer::new(),
            tick: 0,
            pending,
        }
    }

    /// Move event: `x` = steer, `y` = throttle. Overwrites the pending value.
    pub fn on_move(&mut self, value: Vec2) { self.input.set(value); }

    /// Look event for the camera rig: `x` = yaw, `y` = pitch. Accumulates.
    pub fn on_look(&mut self, value: Vec2) { self.look.add(value); }

    /// Drain accumulated look input.
    pub fn take_look(&mut self) -> Vec2 { self.look.take() }

    /// Move input pending for the next tick.
    pub fn pending_input(&self) -> Vec2 { self.input.snapshot() }

    /// Read-only view of the wheels.
    pub fn wheels(&self) -> &[WheelState] { &self.wheels }

    /// Wheel by socket name.
    pub fn wheel(&self, name: &str) -> Option<&WheelState> { self.wheels.iter().find(|w| w.name == name) }

    /// Debug lines from the last stepped tick; empty when drawing is off.
    pub fn debug_lines(&self) -> &[DebugLine] { self.debug_lines.lines() }

    /// Vehicle settings.
    pub fn settings(&self) -> &VehicleSettings { &self.settings }

    /// Mutable vehicle settings.
    pub fn settings_mut(&mut self) -> &mut VehicleSettings { &mut self.settings }

    /// Injected diagnostics sink.
    pub fn diagnostics(&self) -> &D { &self.diagnostics }

    /// Advance all wheels by `dt` and push their forces into the chassis.
    ///
    /// Wheels only read the chassis pose and their own previous state, so they are
    /// evaluated first and the forces applied afterwards in one serial pass.
    /// The move input is consumed: the next tick sees zero unless a new event arrives.
    pub fn step<H>(&mut self, dt: Scalar, host: &mut H) -> StepStats
    where
        H: ChassisHost + SpatialQuery + ?Sized,
    {
        self.tick += 1;
        let input = self.input.snapshot();
        self.diagnostics.input_snapshot(input);

        let mut stats = StepStats { tick: self.tick, wheels: self.wheels.len() as u32, ..Default::default() };

        let Some(ctx) = StepCtx::guarded(dt, self.tick) else {
            self.diagnostics.tick_skipped(dt);
            self.input.reset();
            stats.skipped = true;
            return stats;
        };

        let chassis = host.world_transform();
        let (steer, throttle) = (input.x, input.y);
        self.pending.clear();

        for wheel in &mut self.wheels {
            wheel.update_pose(&chassis, steer, &ctx);

            let Some(hit) = suspension::probe(wheel, &*host) else {
                wheel.mark_airborne();
                self.diagnostics.wheel_airborne(&wheel.name);
                stats.airborne += 1;
                continue;
            };

            let saved = wheel.suspension_snapshot();
            let susp = suspension::solve(wheel, hit.distance);
            let trac = traction::solve(wheel, throttle, &ctx);
            let forces = WheelForces::new(susp, trac);
            wheel.grounded = true;
            stats.grounded += 1;

            if !forces.total.is_finite() {
                // keep the last finite compression, as for an airborne tick
                wheel.restore_suspension(saved);
                wheel.forces = WheelForces::default();
                self.diagnostics.force_rejected(&wheel.name, forces.total);
                continue;
            }
            wheel.forces = forces;
            self.pending.push((forces.total, wheel.world.translation));
        }

        for (force, point) in self.pending.drain(..) {
            host.apply_force_at_point(force, point);
        }

        self.input.reset();
        self.refresh_debug_lines();
        stats
    }

    fn refresh_debug_lines(&mut self) {
        self.debug_lines.clear();
        if !self.settings.draw_debug {
            return;
        }
        let len = self.settings.debug_line_length;
        for wheel in &self.wheels {
            self.debug_lines.extend(basis_lines(&wheel.world, len));
        }
    }

    /// blake3 digest of every wheel's pose, velocity and compression, in wheel order.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(b"GEARWHEELSv1\0");
        h.update_bytes(&self.tick.to_le_bytes());
        for w in &self.wheels {
            h.update_str(&w.name);
            hash_transform(&mut h, &w.world);
            hash_vec3(&mut h, &w.velocity);
            h.update_f32(w.suspension_offset);
            h.update_f32(w.last_suspension_offset);
            h.update_bytes(&[w.grounded as u8]);
        }
        h.finalize()
    }
}
