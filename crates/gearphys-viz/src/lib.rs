//! Debug visualization helpers. Nothing here feeds back into the simulation.

use gearphys_core::{Scalar, Transform, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugColor { Red, Green, Blue }

impl DebugColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            DebugColor::Red => [255, 0, 0],
            DebugColor::Green => [0, 255, 0],
            DebugColor::Blue => [0, 0, 255],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: DebugColor,
}

/// Forward (red), right (green) and up (blue) lines from the transform origin.
pub fn basis_lines(t: &Transform, length: Scalar) -> [DebugLine; 3] {
    let o = t.translation;
    [
        DebugLine { start: o, end: o + t.forward() * length, color: DebugColor::Red },
        DebugLine { start: o, end: o + t.right() * length, color: DebugColor::Green },
        DebugLine { start: o, end: o + t.up() * length, color: DebugColor::Blue },
    ]
}

/// Lines produced during the last tick; cleared by the producer each time it refills.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer { lines: Vec<DebugLine> }

impl LineBuffer {
    pub fn new() -> Self { Self { lines: Vec::new() } }
    pub fn extend<I: IntoIterator<Item = DebugLine>>(&mut self, it: I) { self.lines.extend(it); }
    pub fn clear(&mut self) { self.lines.clear(); }
    pub fn lines(&self) -> &[DebugLine] { &self.lines }
    pub fn len(&self) -> usize { self.lines.len() }
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gearphys_core::vec3;

    #[test] fn basis_lines_follow_transform() {
        let t = Transform::from_translation(vec3(1.0, 2.0, 3.0));
        let [f, r, u] = basis_lines(&t, 50.0);
        assert_eq!(f.color, DebugColor::Red);
        assert_eq!(r.color, DebugColor::Green);
        assert_eq!(u.color, DebugColor::Blue);
        assert_eq!(f.color.rgb(), [255, 0, 0]);
        assert_eq!(f.start, t.translation);
        assert!((f.end - vec3(51.0, 2.0, 3.0)).length() < 1e-5);
        assert!((r.end - vec3(1.0, -48.0, 3.0)).length() < 1e-5);
        assert!((u.end - vec3(1.0, 2.0, 53.0)).length() < 1e-5);
    }

    #[test] fn buffer_clears() {
        let mut b = LineBuffer::new();
        b.extend(basis_lines(&Transform::IDENTITY, 1.0));
        assert_eq!(b.len(), 3);
        b.clear();
        assert!(b.is_empty());
    }
}
