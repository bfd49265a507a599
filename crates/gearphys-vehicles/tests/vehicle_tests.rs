use std::collections::HashMap;

use gearphys_core::{vec3, Quat, Transform, Vec2, Vec3};
use gearphys_vehicles::{
    ChassisHost, Diagnostics, RayHit, SpatialQuery, Vehicle, VehicleSettings, WheelConfig, WheelMount,
};

/// Chassis plus a probe that reports a fixed hit distance (or nothing).
struct FixedProbeHost {
    chassis: Transform,
    sockets: HashMap<String, Transform>,
    hit_distance: Option<f32>,
    /// Per-probe-origin distance that replaces `hit_distance`.
    hit_at: Vec<(Vec3, f32)>,
    applied: Vec<(Vec3, Vec3)>,
}

impl FixedProbeHost {
    fn new(hit_distance: Option<f32>) -> Self {
        Self { chassis: Transform::IDENTITY, sockets: HashMap::new(), hit_distance, hit_at: Vec::new(), applied: Vec::new() }
    }

    fn with_socket(mut self, name: &str, t: Transform) -> Self {
        self.sockets.insert(name.to_string(), t);
        self
    }
}

impl ChassisHost for FixedProbeHost {
    fn world_transform(&self) -> Transform { self.chassis }
    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) { self.applied.push((force, point)); }
    fn socket_local_transform(&self, name: &str) -> Option<Transform> { self.sockets.get(name).copied() }
}

impl SpatialQuery for FixedProbeHost {
    fn raycast_nearest(&self, origin: Vec3, end: Vec3, _ignore_self: bool) -> Option<RayHit> {
        let d = match self.hit_at.iter().find(|(o, _)| (*o - origin).length() < 1e-3) {
            Some(&(_, d)) => d,
            None => self.hit_distance?,
        };
        let dir = (end - origin).normalize_or_zero();
        Some(RayHit { distance: d, point: origin + dir * d })
    }
}

#[derive(Default)]
struct Recorder {
    missing_sockets: Vec<String>,
    skipped_mounts: Vec<String>,
    skipped_ticks: u32,
    airborne: u32,
    rejected: Vec<String>,
    inputs: Vec<Vec2>,
}

impl Diagnostics for Recorder {
    fn socket_missing(&mut self, wheel: &str) { self.missing_sockets.push(wheel.to_string()); }
    fn mount_skipped(&mut self, wheel: &str) { self.skipped_mounts.push(wheel.to_string()); }
    fn tick_skipped(&mut self, _dt: f32) { self.skipped_ticks += 1; }
    fn wheel_airborne(&mut self, _wheel: &str) { self.airborne += 1; }
    fn force_rejected(&mut self, wheel: &str, _force: Vec3) { self.rejected.push(wheel.to_string()); }
    fn input_snapshot(&mut self, input: Vec2) { self.inputs.push(input); }
}

const DT: f32 = 1.0 / 60.0;

fn scenario_config() -> WheelConfig {
    WheelConfig {
        suspension_rest_length: 50.0,
        wheel_radius: 30.0,
        suspension_strength: 20_000.0,
        suspension_damping: 200_000.0,
        ..Default::default()
    }
}

fn single_wheel(host: &FixedProbeHost, config: WheelConfig) -> Vehicle<Recorder> {
    Vehicle::with_diagnostics(host, &[WheelMount::new("FL", config)], VehicleSettings::default(), Recorder::default())
}

#[test]
fn compressed_wheel_pushes_chassis_up() {
    let mut host = FixedProbeHost::new(Some(70.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());

    let stats = v.step(DT, &mut host);
    assert_eq!(stats.grounded, 1);

    let w = &v.wheels()[0];
    assert_eq!(w.rest_length, 80.0);
    assert_eq!(w.suspension_offset, 10.0);
    assert_eq!(w.forces.suspension.spring, 200_000.0);
    assert_eq!(w.forces.suspension.damping, 0.0);

    let vertical = w.forces.suspension.total - w.forces.suspension.gravity;
    assert!((vertical - w.world.up() * 200_000.0).length() < 1e-3);

    assert_eq!(host.applied.len(), 1);
    let (force, point) = host.applied[0];
    assert_eq!(point, w.world.translation);
    assert_eq!(force, w.forces.total);
}

#[test]
fn resting_wheel_without_input_has_no_spring_damping_or_drive() {
    let mut host = FixedProbeHost::new(Some(80.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());

    v.step(DT, &mut host);
    let f = v.wheels()[0].forces;
    assert_eq!(f.suspension.spring, 0.0);
    assert_eq!(f.suspension.damping, 0.0);
    assert_eq!(f.traction.drive, Vec3::ZERO);
    assert_eq!(f.traction.lateral, Vec3::ZERO);
}

#[test]
fn offset_matches_hit_distance_exactly() {
    for d in [0.0_f32, 12.5, 79.0, 80.0, 93.25] {
        let mut host = FixedProbeHost::new(Some(d)).with_socket("FL", Transform::IDENTITY);
        let mut v = single_wheel(&host, scenario_config());
        v.step(DT, &mut host);
        assert_eq!(v.wheels()[0].suspension_offset, 80.0 - d);
    }
}

#[test]
fn airborne_wheel_keeps_last_offset_and_applies_nothing() {
    let mut host = FixedProbeHost::new(Some(70.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());
    v.step(DT, &mut host);
    let before = v.wheels()[0].suspension_offset;

    host.hit_distance = None;
    host.applied.clear();
    let stats = v.step(DT, &mut host);

    assert_eq!(stats.airborne, 1);
    assert_eq!(v.wheels()[0].suspension_offset, before);
    assert!(!v.wheels()[0].grounded);
    assert!(host.applied.is_empty());
    assert_eq!(v.diagnostics().airborne, 1);
}

#[test]
fn input_is_consumed_each_tick() {
    let mut host = FixedProbeHost::new(Some(80.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());

    v.on_move(Vec2::new(1.0, 1.0));
    v.step(DT, &mut host);
    let first = v.wheels()[0].forces.traction.drive;
    assert!(first.length() > 0.0);
    assert_eq!(v.pending_input(), Vec2::ZERO);

    v.step(DT, &mut host);
    assert_eq!(v.wheels()[0].forces.traction.drive, Vec3::ZERO);
    assert!((v.wheels()[0].world.forward() - Vec3::X).length() < 1e-5);
    assert_eq!(v.diagnostics().inputs, vec![Vec2::new(1.0, 1.0), Vec2::ZERO]);
}

#[test]
fn last_move_event_wins() {
    let mut host = FixedProbeHost::new(Some(80.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());
    v.on_move(Vec2::new(0.0, 1.0));
    v.on_move(Vec2::new(0.0, -0.5));
    v.step(DT, &mut host);
    let drive = v.wheels()[0].forces.traction.drive;
    assert!((drive - vec3(-50.0, 0.0, 0.0)).length() < 1e-4);
}

#[test]
fn steering_only_rotates_steerable_wheels() {
    let rear = WheelConfig { affected_by_steering: false, ..scenario_config() };
    let mut host = FixedProbeHost::new(Some(80.0))
        .with_socket("FL", Transform::from_translation(vec3(100.0, 50.0, 0.0)))
        .with_socket("RL", Transform::from_translation(vec3(-100.0, 50.0, 0.0)));
    host.chassis = Transform::from_rotation(Quat::from_rotation_z(0.4));
    let mounts = [WheelMount::new("FL", scenario_config()), WheelMount::new("RL", rear)];

    let mut straight = Vehicle::with_diagnostics(&host, &mounts, VehicleSettings::default(), Recorder::default());
    let mut steered = Vehicle::with_diagnostics(&host, &mounts, VehicleSettings::default(), Recorder::default());
    straight.step(DT, &mut host);
    steered.on_move(Vec2::new(1.0, 0.0));
    steered.step(DT, &mut host);

    let (a, b) = (straight.wheel("RL").unwrap(), steered.wheel("RL").unwrap());
    assert_eq!(a.world.rotation, b.world.rotation);

    let (a, b) = (straight.wheel("FL").unwrap(), steered.wheel("FL").unwrap());
    let angle = a.world.forward().angle_between(b.world.forward());
    assert!((angle - 45f32.to_radians()).abs() < 1e-4);
    assert_eq!(a.world.translation, b.world.translation);
}

#[test]
fn mounts_without_data_are_skipped_and_missing_sockets_fall_back_to_identity() {
    let host = FixedProbeHost::new(Some(80.0)).with_socket("FL", Transform::from_translation(vec3(1.0, 2.0, 3.0)));
    let mounts = [
        WheelMount::new("FL", scenario_config()),
        WheelMount::unresolved("FR"),
        WheelMount::new("RR", scenario_config()),
    ];
    let v = Vehicle::with_diagnostics(&host, &mounts, VehicleSettings::default(), Recorder::default());

    let names: Vec<&str> = v.wheels().iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["FL", "RR"]);
    assert_eq!(v.wheel("RR").unwrap().socket, Transform::IDENTITY);
    assert_eq!(v.diagnostics().skipped_mounts, ["FR"]);
    assert_eq!(v.diagnostics().missing_sockets, ["RR"]);
}

#[test]
fn wheel_config_is_copied_per_wheel() {
    let mut host = FixedProbeHost::new(Some(70.0));
    let mut mounts = vec![WheelMount::new("A", scenario_config()), WheelMount::new("B", scenario_config())];
    let mut v = Vehicle::with_diagnostics(&host, &mounts, VehicleSettings::default(), Recorder::default());

    if let Some(c) = mounts[0].config.as_mut() {
        c.torque = 9_999.0;
        c.suspension_strength = 1.0;
    }
    mounts[1].config = None;

    assert_eq!(v.wheels().len(), 2);
    assert!(v.wheels().iter().all(|w| w.config == scenario_config()));

    v.step(DT, &mut host);
    assert!(v.wheels().iter().all(|w| w.forces.suspension.spring == 200_000.0));
}

#[test]
fn non_finite_wheel_is_dropped_without_affecting_others() {
    let left = Transform::from_translation(vec3(0.0, 50.0, 0.0));
    let right = Transform::from_translation(vec3(0.0, -50.0, 0.0));
    let mut host = FixedProbeHost::new(Some(70.0)).with_socket("L", left).with_socket("R", right);
    let mounts = [WheelMount::new("L", scenario_config()), WheelMount::new("R", scenario_config())];
    let mut v = Vehicle::with_diagnostics(&host, &mounts, VehicleSettings::default(), Recorder::default());

    v.step(DT, &mut host);
    host.applied.clear();

    host.hit_at = vec![(left.translation, f32::NAN)];
    let stats = v.step(DT, &mut host);

    assert_eq!(stats.grounded, 2);
    assert_eq!(v.diagnostics().rejected, ["L"]);
    assert_eq!(host.applied.len(), 1);
    let (force, point) = host.applied[0];
    assert!(force.is_finite());
    assert_eq!(point, right.translation);

    let l = v.wheel("L").unwrap();
    assert_eq!(l.suspension_offset, 10.0);
    assert_eq!(l.forces.total, Vec3::ZERO);
    assert_eq!(v.wheel("R").unwrap().suspension_offset, 10.0);

    host.hit_at.clear();
    host.applied.clear();
    v.step(DT, &mut host);
    assert_eq!(host.applied.len(), 2);
    assert!(host.applied.iter().all(|(f, _)| f.is_finite()));
    let l = v.wheel("L").unwrap();
    assert_eq!(l.suspension_offset, 10.0);
    assert_eq!(l.suspension_speed, 0.0);
    assert_eq!(v.diagnostics().rejected.len(), 1);
}

#[test]
fn degenerate_dt_is_a_no_op() {
    let mut host = FixedProbeHost::new(Some(70.0)).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());
    v.step(DT, &mut host);
    let before = v.wheels()[0].clone();
    host.applied.clear();

    v.on_move(Vec2::new(1.0, 1.0));
    for dt in [0.0, -DT, f32::NAN] {
        let stats = v.step(dt, &mut host);
        assert!(stats.skipped);
    }
    assert_eq!(v.wheels()[0], before);
    assert!(host.applied.is_empty());
    assert_eq!(v.pending_input(), Vec2::ZERO);
    assert_eq!(v.diagnostics().skipped_ticks, 3);
}

#[test]
fn debug_lines_follow_setting() {
    let mut host = FixedProbeHost::new(None).with_socket("FL", Transform::IDENTITY);
    let mut v = single_wheel(&host, scenario_config());
    v.step(DT, &mut host);
    assert_eq!(v.debug_lines().len(), 3);

    v.settings_mut().draw_debug = false;
    v.step(DT, &mut host);
    assert!(v.debug_lines().is_empty());
}

#[test]
fn look_input_does_not_touch_physics() {
    let mut host = FixedProbeHost::new(Some(75.0)).with_socket("FL", Transform::IDENTITY);
    let mut a = single_wheel(&host, scenario_config());
    let mut b = single_wheel(&host, scenario_config());
    b.on_look(Vec2::new(3.0, -1.0));
    a.step(DT, &mut host);
    b.step(DT, &mut host);
    assert_eq!(a.state_hash(), b.state_hash());
    assert_eq!(b.take_look(), Vec2::new(3.0, -1.0));
}
