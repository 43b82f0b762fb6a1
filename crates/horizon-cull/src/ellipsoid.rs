//! Axis-aligned ellipsoid of revolution describing the occluding body.

use glam::DVec3;

use crate::HorizonError;

/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// An ellipsoid centered at the origin, symmetric about the Z (polar) axis.
///
/// Radii are validated on construction, so every `Ellipsoid` value has
/// finite, strictly positive radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    radius_equator: f64,
    radius_polar: f64,
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid.
    pub const WGS84: Ellipsoid = Ellipsoid {
        radius_equator: WGS84_A,
        radius_polar: WGS84_A * (1.0 - WGS84_F),
    };

    /// Create an ellipsoid from its equatorial and polar radii.
    pub fn new(radius_equator: f64, radius_polar: f64) -> Result<Self, HorizonError> {
        let valid = |r: f64| r.is_finite() && r > 0.0;
        if !valid(radius_equator) || !valid(radius_polar) {
            return Err(HorizonError::InvalidEllipsoid {
                equatorial: radius_equator,
                polar: radius_polar,
            });
        }
        Ok(Self {
            radius_equator,
            radius_polar,
        })
    }

    /// A perfect sphere of the given radius.
    pub fn sphere(radius: f64) -> Result<Self, HorizonError> {
        Self::new(radius, radius)
    }

    /// Equatorial radius (X and Y semi-axes).
    pub fn radius_equator(&self) -> f64 {
        self.radius_equator
    }

    /// Polar radius (Z semi-axis).
    pub fn radius_polar(&self) -> f64 {
        self.radius_polar
    }

    /// Largest semi-axis.
    pub fn max_radius(&self) -> f64 {
        self.radius_equator.max(self.radius_polar)
    }

    /// Per-axis factors mapping ellipsoid space onto the unit sphere.
    pub fn scale(&self) -> DVec3 {
        DVec3::new(
            1.0 / self.radius_equator,
            1.0 / self.radius_equator,
            1.0 / self.radius_polar,
        )
    }

    /// Per-axis factors mapping the unit sphere back onto the ellipsoid.
    pub fn scale_inv(&self) -> DVec3 {
        DVec3::new(self.radius_equator, self.radius_equator, self.radius_polar)
    }

    /// Whether `point` lies inside or on the ellipsoid surface.
    pub fn contains(&self, point: DVec3) -> bool {
        (point * self.scale()).length_squared() <= 1.0
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
