#![deny(missing_docs)]
//! Arcade raycast-wheel vehicle model.
//!
//! Each wheel hangs from a chassis socket and probes the ground along its own
//! down axis. A hit turns into a spring-damper force plus a gravity term; lateral
//! grip blends between two friction values by how much the wheel is sliding; driven
//! wheels push along their forward axis. The sum is applied to the chassis at the
//! wheel position.
//!
//! Usage:
//! - build a [`Vehicle`] from [`WheelMount`]s once the chassis exists.
//! - feed [`Vehicle::on_move`] from your input events.
//! - call [`Vehicle::step`] once per physics tick with a host implementing
//!   [`ChassisHost`] and [`SpatialQuery`].

pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod suspension;
pub mod traction;
pub mod vehicle;
pub mod wheel;

pub use config::{VehicleSettings, WheelConfig, WheelMount};
pub use error::ConfigError;
pub use host::{ChassisHost, Diagnostics, NoOpDiagnostics, RayHit, SpatialQuery, TracingDiagnostics};
pub use input::{LookInput, VehicleInputState};
pub use suspension::SuspensionForce;
pub use traction::{slide_ratio, TractionForce};
pub use vehicle::Vehicle;
pub use wheel::{init_wheels, WheelForces, WheelState};
