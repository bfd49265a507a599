//! Authored wheel data and vehicle-level settings.

use gearphys_core::Scalar;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-wheel suspension, drive and grip parameters.
///
/// Lengths are in world units, `max_steer_angle` in degrees.
/// Missing fields deserialize to the defaults below.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Spring length at rest, measured from the socket.
    pub suspension_rest_length: Scalar,
    /// Wheel radius; added to the rest length for the probe distance.
    pub wheel_radius: Scalar,
    /// Spring rate (force per unit of compression).
    pub suspension_strength: Scalar,
    /// Damping rate against wheel velocity along its up axis.
    pub suspension_damping: Scalar,
    /// Whether throttle drives this wheel.
    pub affected_by_engine: bool,
    /// Drive force at full throttle.
    pub torque: Scalar,
    /// Whether steer input yaws this wheel.
    pub affected_by_steering: bool,
    /// Yaw at full steer, degrees.
    pub max_steer_angle: Scalar,
    /// Mass used by the lateral grip and gravity terms.
    pub wheel_mass: Scalar,
    /// Grip coefficient while rolling straight.
    pub slide_friction_min: Scalar,
    /// Grip coefficient while sliding fully sideways.
    pub slide_friction_max: Scalar,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            suspension_rest_length: 50.0,
            wheel_radius: 30.0,
            suspension_strength: 20_000.0,
            suspension_damping: 200_000.0,
            affected_by_engine: true,
            torque: 100.0,
            affected_by_steering: true,
            max_steer_angle: 45.0,
            wheel_mass: 20_000.0,
            slide_friction_min: 0.2,
            slide_friction_max: 0.8,
        }
    }
}

impl WheelConfig {
    /// Probe length: suspension rest length plus wheel radius.
    #[inline]
    pub fn rest_length(&self) -> Scalar { self.suspension_rest_length + self.wheel_radius }

    /// Checks the authoring invariants: finite values, non-negative radius and
    /// rest length, and `slide_friction_min <= slide_friction_max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("suspension_rest_length", self.suspension_rest_length),
            ("wheel_radius", self.wheel_radius),
            ("suspension_strength", self.suspension_strength),
            ("suspension_damping", self.suspension_damping),
            ("torque", self.torque),
            ("max_steer_angle", self.max_steer_angle),
            ("wheel_mass", self.wheel_mass),
            ("slide_friction_min", self.slide_friction_min),
            ("slide_friction_max", self.slide_friction_max),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.wheel_radius < 0.0 {
            return Err(ConfigError::NegativeRadius(self.wheel_radius));
        }
        if self.suspension_rest_length < 0.0 {
            return Err(ConfigError::NegativeRestLength(self.suspension_rest_length));
        }
        if self.slide_friction_min > self.slide_friction_max {
            return Err(ConfigError::FrictionRange {
                min: self.slide_friction_min,
                max: self.slide_friction_max,
            });
        }
        Ok(())
    }
}

/// A named chassis socket and the wheel data resolved for it.
///
/// `config == None` models a mount whose data reference was never set;
/// such mounts produce no wheel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelMount {
    /// Socket name on the chassis, also used as the wheel name.
    pub name: String,
    /// Resolved wheel data, copied into the wheel state at init.
    pub config: Option<WheelConfig>,
}

impl WheelMount {
    /// Mount with resolved data.
    pub fn new(name: impl Into<String>, config: WheelConfig) -> Self {
        Self { name: name.into(), config: Some(config) }
    }

    /// Mount without a data reference.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self { name: name.into(), config: None }
    }
}

/// Vehicle-wide toggles.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSettings {
    /// Refill the debug line buffer after every stepped tick.
    pub draw_debug: bool,
    /// Length of each basis line.
    pub debug_line_length: Scalar,
}

impl Default for VehicleSettings {
    fn default() -> Self { Self { draw_debug: true, debug_line_length: 50.0 } }
}

impl VehicleSettings {
    /// Set the debug drawing flag.
    pub fn with_draw_debug(mut self, draw_debug: bool) -> Self {
        self.draw_debug = draw_debug;
        self
    }

    /// Set the basis line length.
    pub fn with_debug_line_length(mut self, length: Scalar) -> Self {
        self.debug_line_length = length;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn default_rest_length_adds_radius() {
        assert_eq!(WheelConfig::default().rest_length(), 80.0);
    }

    #[test] fn defaults_are_valid() {
        assert!(WheelConfig::default().validate().is_ok());
    }

    #[test] fn rejects_inverted_friction() {
        let c = WheelConfig { slide_friction_min: 0.9, slide_friction_max: 0.1, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::FrictionRange { min: 0.9, max: 0.1 }));
    }

    #[test] fn rejects_negative_lengths() {
        let c = WheelConfig { wheel_radius: -1.0, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::NegativeRadius(-1.0)));
        let c = WheelConfig { suspension_rest_length: -0.5, ..Default::default() };
        assert_eq!(c.validate(), Err(ConfigError::NegativeRestLength(-0.5)));
    }

    #[test] fn rejects_nan() {
        let c = WheelConfig { torque: f32::NAN, ..Default::default() };
        assert!(matches!(c.validate(), Err(ConfigError::NonFinite { field: "torque", .. })));
    }
}
