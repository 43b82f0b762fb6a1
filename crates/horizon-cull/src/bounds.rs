//! Bounding spheres for occludee tests.

use glam::{DMat4, DVec3};

/// A bounding sphere in f64 space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius of the sphere.
    pub radius: f64,
}

impl BoundingSphere {
    /// Create a bounding sphere.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Transform the sphere by `matrix`.
    ///
    /// The center is transformed as a point; the radius is scaled by the
    /// largest axis scale of the matrix so the result still encloses the
    /// transformed volume under non-uniform scaling.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let scale = matrix
            .x_axis
            .truncate()
            .length()
            .max(matrix.y_axis.truncate().length())
            .max(matrix.z_axis.truncate().length());
        Self {
            center: matrix.transform_point3(self.center),
            radius: self.radius * scale,
        }
    }

    /// Whether `point` lies inside or on the sphere.
    pub fn contains_point(&self, point: DVec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_translation_keeps_radius() {
        let bs = BoundingSphere::new(DVec3::new(1.0, 0.0, 0.0), 2.0);
        let moved = bs.transformed(&DMat4::from_translation(DVec3::new(0.0, 10.0, 0.0)));
        assert_eq!(moved.center, DVec3::new(1.0, 10.0, 0.0));
        assert_eq!(moved.radius, 2.0);
    }

    #[test]
    fn test_transform_non_uniform_scale_uses_largest_axis() {
        let bs = BoundingSphere::new(DVec3::ZERO, 1.0);
        let scaled = bs.transformed(&DMat4::from_scale(DVec3::new(1.0, 3.0, 2.0)));
        assert!((scaled.radius - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_contains_point() {
        let bs = BoundingSphere::new(DVec3::ZERO, 1.0);
        assert!(bs.contains_point(DVec3::new(0.0, 1.0, 0.0)));
        assert!(!bs.contains_point(DVec3::new(0.0, 1.01, 0.0)));
    }
}
