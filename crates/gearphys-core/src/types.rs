use serde::{Deserialize, Serialize};
use crate::Scalar;

pub use glam::{Quat, Vec2, Vec3};

/// Local forward axis (+X).
pub const AXIS_FORWARD: Vec3 = Vec3::X;
/// Local right axis. Z-up right-handed frame, so right is -Y.
pub const AXIS_RIGHT: Vec3 = Vec3::NEG_Y;
/// Local up axis (+Z).
pub const AXIS_UP: Vec3 = Vec3::Z;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }

/// Rigid pose with non-uniform scale.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

impl Transform {
    pub const IDENTITY: Self = Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE };

    #[inline] pub fn from_translation(translation: Vec3) -> Self { Self { translation, ..Self::IDENTITY } }
    #[inline] pub fn from_rotation(rotation: Quat) -> Self { Self { rotation, ..Self::IDENTITY } }
    #[inline] pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self { translation, rotation, scale: Vec3::ONE }
    }

    /// Pure yaw about the local up axis. Positive degrees turn forward toward right.
    pub fn from_yaw_degrees(deg: Scalar) -> Self {
        Self::from_rotation(Quat::from_axis_angle(AXIS_UP, -deg.to_radians()))
    }

    /// Composes `child` expressed in this frame into the parent space of `self`.
    /// `child` is applied first.
    pub fn mul_transform(&self, child: &Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.translation + self.rotation * (self.scale * p) }
    #[inline] pub fn transform_vector(&self, v: Vec3) -> Vec3 { self.rotation * (self.scale * v) }

    // Basis ignores scale.
    #[inline] pub fn forward(&self) -> Vec3 { self.rotation * AXIS_FORWARD }
    #[inline] pub fn right(&self) -> Vec3 { self.rotation * AXIS_RIGHT }
    #[inline] pub fn up(&self) -> Vec3 { self.rotation * AXIS_UP }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}
