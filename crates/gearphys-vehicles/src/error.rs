//! Configuration errors.

use thiserror::Error;

/// Why a [`WheelConfig`](crate::WheelConfig) was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite (got {value})")]
    NonFinite {
        /// Offending field name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Wheel radius below zero.
    #[error("wheel radius must be >= 0 (got {0})")]
    NegativeRadius(f32),
    /// Suspension rest length below zero.
    #[error("suspension rest length must be >= 0 (got {0})")]
    NegativeRestLength(f32),
    /// `slide_friction_min > slide_friction_max`.
    #[error("slide friction min {min} exceeds max {max}")]
    FrictionRange {
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },
}
