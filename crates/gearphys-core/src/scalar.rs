pub type Scalar = f32;

/// Gravity magnitude used by the per-wheel compensation term (matches authored data units).
pub const GRAVITY_COMP: Scalar = 9.8;

#[inline]
pub fn lerp(a: Scalar, b: Scalar, t: Scalar) -> Scalar { a + (b - a) * t }
