//! World-space clipping plane emitted by the horizon test.

use glam::{DVec3, DVec4};

/// A plane `normal · p + distance = 0` with a unit normal.
///
/// Points with positive signed distance are on the side the normal
/// points to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal.
    pub normal: DVec3,
    /// Signed offset term.
    pub distance: f64,
}

impl Plane {
    /// Create a plane from a unit normal and offset.
    pub fn new(normal: DVec3, distance: f64) -> Self {
        Self { normal, distance }
    }

    /// Signed distance from `point` to the plane.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.distance
    }

    /// Whether `point` lies on the normal's side of the plane (or on it).
    pub fn is_in_front(&self, point: DVec3) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// Packed `(nx, ny, nz, d)` form for clip-plane uniforms.
    pub fn as_dvec4(&self) -> DVec4 {
        self.normal.extend(self.distance)
    }
}
