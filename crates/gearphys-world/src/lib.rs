//! Minimal host for driving a [`Vehicle`](gearphys_vehicles::Vehicle) without an engine:
//! one rigid chassis, named sockets and infinite ground planes.

use std::collections::BTreeMap;

use gearphys_core::{vec3, Quat, Scalar, Transform, Vec3};
use gearphys_io::ChassisDesc;
use gearphys_vehicles::{ChassisHost, RayHit, SpatialQuery};
use glam::Mat3;

/// Chassis rigid body with force/torque accumulators.
#[derive(Copy, Clone, Debug)]
pub struct Chassis {
    pub pos: Vec3,
    pub rot: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub inv_mass: Scalar,
    /// Local-space inverse inertia tensor.
    pub inv_inertia_local: Mat3,
    force: Vec3,
    torque: Vec3,
}

impl Chassis {
    /// Solid box of `mass` with half extents `he`.
    pub fn from_box(mass: Scalar, he: Vec3, pose: Transform) -> Self {
        let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
        let (x2, y2, z2) = (he.x * he.x, he.y * he.y, he.z * he.z);
        let i = vec3(y2 + z2, x2 + z2, x2 + y2) * (mass / 3.0);
        let inv_i = Vec3::select(i.cmpgt(Vec3::ZERO), Vec3::ONE / i, Vec3::ZERO);
        Self {
            pos: pose.translation,
            rot: pose.rotation.normalize(),
            linvel: Vec3::ZERO,
            angvel: Vec3::ZERO,
            inv_mass,
            inv_inertia_local: Mat3::from_diagonal(inv_i),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }
    }

    #[inline] pub fn pose(&self) -> Transform { Transform::from_rotation_translation(self.rot, self.pos) }

    /// World-space inverse inertia: R * I^-1_local * R^T.
    pub fn inv_inertia_world(&self) -> Mat3 {
        let r = Mat3::from_quat(self.rot);
        r * self.inv_inertia_local * r.transpose()
    }

    pub fn add_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.force += force;
        self.torque += (point - self.pos).cross(force);
    }

    #[inline] pub fn pending_force(&self) -> Vec3 { self.force }

    /// Semi-implicit Euler; clears the accumulators.
    pub fn integrate(&mut self, gravity: Vec3, dt: Scalar) {
        if self.inv_mass == 0.0 {
            self.force = Vec3::ZERO;
            self.torque = Vec3::ZERO;
            return;
        }
        self.linvel += (self.force * self.inv_mass + gravity) * dt;
        self.angvel += self.inv_inertia_world() * self.torque * dt;
        self.pos += self.linvel * dt;

        let dtheta = self.angvel * dt;
        if dtheta.length_squared() > 0.0 {
            // Small-angle quaternion: (v*0.5, 1) normalized.
            let dq = Quat::from_xyzw(dtheta.x * 0.5, dtheta.y * 0.5, dtheta.z * 0.5, 1.0).normalize();
            self.rot = (dq * self.rot).normalize();
        }
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }
}

/// Infinite plane through `point` facing `normal`.
#[derive(Copy, Clone, Debug)]
pub struct GroundPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl GroundPlane {
    pub fn flat(height: Scalar) -> Self { Self { point: vec3(0.0, 0.0, height), normal: Vec3::Z } }

    /// Hit on segment `a -> b` when it crosses from the front side, as distance from `a`.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<Scalar> {
        let n = self.normal.normalize_or_zero();
        let d = b - a;
        let denom = n.dot(d);
        if denom >= -1e-9 { return None; } // parallel or moving away from the front face
        let t = n.dot(self.point - a) / denom;
        if (0.0..=1.0).contains(&t) { Some(t * d.length()) } else { None }
    }
}

/// One chassis over a set of ground planes.
pub struct SandboxWorld {
    pub gravity: Vec3,
    chassis: Chassis,
    sockets: BTreeMap<String, Transform>,
    ground: Vec<GroundPlane>,
    tick: u64,
}

impl SandboxWorld {
    /// Gravity in cm/s^2 to match the default wheel data units.
    pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -980.0);

    pub fn new(chassis: Chassis) -> Self {
        Self {
            gravity: Self::DEFAULT_GRAVITY,
            chassis,
            sockets: BTreeMap::new(),
            ground: vec![GroundPlane::flat(0.0)],
            tick: 0,
        }
    }

    pub fn from_desc(desc: &ChassisDesc) -> Self {
        let mut w = Self::new(Chassis::from_box(desc.mass, desc.half_extents, desc.spawn));
        w.sockets = desc.sockets.clone();
        w
    }

    pub fn with_socket(mut self, name: impl Into<String>, local: Transform) -> Self {
        self.sockets.insert(name.into(), local);
        self
    }

    pub fn with_ground(mut self, ground: Vec<GroundPlane>) -> Self {
        self.ground = ground;
        self
    }

    #[inline] pub fn chassis(&self) -> &Chassis { &self.chassis }
    #[inline] pub fn chassis_mut(&mut self) -> &mut Chassis { &mut self.chassis }
    #[inline] pub fn tick_index(&self) -> u64 { self.tick }

    /// Integrate forces accumulated since the last step.
    pub fn step(&mut self, dt: Scalar) {
        if !(dt.is_finite() && dt > 0.0) { return; }
        self.chassis.integrate(self.gravity, dt);
        self.tick += 1;
    }
}

impl ChassisHost for SandboxWorld {
    fn world_transform(&self) -> Transform { self.chassis.pose() }

    fn apply_force_at_point(&mut self, force: Vec3, point: Vec3) {
        self.chassis.add_force_at_point(force, point);
    }

    fn socket_local_transform(&self, name: &str) -> Option<Transform> { self.sockets.get(name).copied() }
}

impl SpatialQuery for SandboxWorld {
    // The chassis has no collider here, so `ignore_self` holds trivially.
    fn raycast_nearest(&self, origin: Vec3, end: Vec3, _ignore_self: bool) -> Option<RayHit> {
        let dir = (end - origin).normalize_or_zero();
        self.ground
            .iter()
            .filter_map(|g| g.intersect_segment(origin, end))
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| RayHit { distance, point: origin + dir * distance })
    }
}
