//! Horizon culling against an ellipsoidal body.
//!
//! The ellipsoid is rescaled into a unit sphere so the horizon reduces to
//! spherical geometry. A query first tests the occludee against the
//! horizon plane (cheap, only ever confirms visibility) and then against
//! the cone from the eye tangent to the body, whose interior beyond the
//! horizon is fully hidden.
//!
//! References:
//! - <https://cesium.com/blog/2013/04/25/horizon-culling/>
//! - <http://www.cbloom.com/3d/techdocs/culling.txt>

use glam::DVec3;

use crate::{BoundingSphere, Ellipsoid, HorizonError, Plane};

/// Horizon occlusion test for one ellipsoid and one eye position.
///
/// Configure once from an ellipsoid, then derive cheap per-view copies
/// with [`HorizonTest::with_eye`]. A value is never shared mutably: each
/// thread re-parameterises its own copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonTest {
    ellipsoid: Ellipsoid,
    /// Ellipsoid space → unit-sphere space.
    scale: DVec3,
    /// Unit-sphere space → ellipsoid space.
    scale_inv: DVec3,
    eye: DVec3,
    eye_unit: DVec3,
    /// Eye → center, scaled.
    vc: DVec3,
    vc_mag: f64,
    vc_mag2: f64,
    /// Squared eye → horizon circle distance, scaled.
    vh_mag2: f64,
    cone_cos: f64,
    cone_tan: f64,
}

impl HorizonTest {
    /// Configure a horizon test for `ellipsoid`.
    ///
    /// The eye starts at a placeholder outside the body; call
    /// [`set_eye`](Self::set_eye) before querying.
    pub fn new(ellipsoid: &Ellipsoid) -> Self {
        let mut horizon = Self {
            ellipsoid: *ellipsoid,
            scale: DVec3::ONE,
            scale_inv: DVec3::ONE,
            eye: DVec3::ZERO,
            eye_unit: DVec3::ZERO,
            vc: DVec3::ZERO,
            vc_mag: 0.0,
            vc_mag2: 0.0,
            vh_mag2: 0.0,
            cone_cos: 0.0,
            cone_tan: 0.0,
        };
        horizon.set_ellipsoid(ellipsoid);
        horizon
    }

    /// Reconfigure for a different ellipsoid and reset the eye to the
    /// placeholder position.
    pub fn set_ellipsoid(&mut self, ellipsoid: &Ellipsoid) {
        self.ellipsoid = *ellipsoid;
        self.scale = ellipsoid.scale();
        self.scale_inv = ellipsoid.scale_inv();
        self.eye = DVec3::new(2.0 * ellipsoid.radius_equator(), 0.0, 0.0);
        self.update_eye_state();
    }

    /// The ellipsoid this test was configured with.
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Move the eye. Free when `eye` equals the current eye.
    pub fn set_eye(&mut self, eye: DVec3) {
        if eye != self.eye {
            self.eye = eye;
            self.update_eye_state();
        }
    }

    /// A copy of this test re-parameterised for `eye`. `self` is untouched.
    pub fn with_eye(&self, eye: DVec3) -> Self {
        let mut horizon = *self;
        horizon.set_eye(eye);
        horizon
    }

    fn update_eye_state(&mut self) {
        self.eye_unit = self.eye.normalize_or_zero();

        self.vc = -self.eye * self.scale;
        self.vc_mag = self.vc.length();
        self.vc_mag2 = self.vc_mag * self.vc_mag;
        self.vh_mag2 = self.vc_mag2 - 1.0;

        if self.vh_mag2 > 0.0 {
            // Eye → horizon plane distance, scaled.
            let vp_mag = self.vc_mag - 1.0 / self.vc_mag;
            let vh_mag = self.vh_mag2.sqrt();
            self.cone_cos = vp_mag / vh_mag;
            self.cone_tan = self.cone_cos.clamp(-1.0, 1.0).acos().tan();
        } else {
            // No horizon from inside the body; queries report degenerate.
            self.cone_cos = 0.0;
            self.cone_tan = 0.0;
        }
    }

    /// Current eye position.
    pub fn eye(&self) -> DVec3 {
        self.eye
    }

    /// Unit direction from the body center toward the eye (zero if the
    /// eye is at the center).
    pub fn eye_unit(&self) -> DVec3 {
        self.eye_unit
    }

    /// Eye → center vector in scaled space.
    pub fn scaled_eye_to_center(&self) -> DVec3 {
        self.vc
    }

    /// Length of [`scaled_eye_to_center`](Self::scaled_eye_to_center).
    pub fn scaled_eye_to_center_mag(&self) -> f64 {
        self.vc_mag
    }

    /// Squared length of [`scaled_eye_to_center`](Self::scaled_eye_to_center).
    pub fn scaled_eye_to_center_mag2(&self) -> f64 {
        self.vc_mag2
    }

    /// Squared eye → horizon circle distance in scaled space.
    pub fn scaled_horizon_mag2(&self) -> f64 {
        self.vh_mag2
    }

    /// Cosine of the horizon cone half-angle.
    pub fn cone_cosine(&self) -> f64 {
        self.cone_cos
    }

    /// Tangent of the horizon cone half-angle.
    pub fn cone_tangent(&self) -> f64 {
        self.cone_tan
    }

    /// True when the eye is at the center of, on, or inside the body.
    pub fn is_degenerate(&self) -> bool {
        self.vh_mag2.is_nan() || self.vh_mag2 <= 0.0
    }

    /// Test whether a sphere at `target` with `radius` is visible over the
    /// horizon.
    ///
    /// Fails open: a degenerate eye or malformed radius reports `true` so
    /// real geometry is never discarded.
    pub fn is_visible(&self, target: DVec3, radius: f64) -> bool {
        self.try_is_visible(target, radius).unwrap_or(true)
    }

    /// [`is_visible`](Self::is_visible) for a bounding sphere.
    pub fn is_sphere_visible(&self, sphere: &BoundingSphere) -> bool {
        self.is_visible(sphere.center, sphere.radius)
    }

    /// Like [`is_visible`](Self::is_visible), but reports degenerate
    /// configurations instead of failing open.
    pub fn try_is_visible(&self, target: DVec3, radius: f64) -> Result<bool, HorizonError> {
        if radius.is_nan() || radius < 0.0 {
            return Err(HorizonError::InvalidRadius(radius));
        }
        if self.is_degenerate() {
            return Err(HorizonError::DegenerateHorizon {
                scaled_eye_mag2: self.vc_mag2,
            });
        }

        // Body-scale occludees are never hidden.
        if radius >= self.scale_inv.max_element() {
            return Ok(true);
        }

        if (target * self.scale).length_squared() < 1e-10 {
            // Target at the body center (degenerate); keep it.
            return Ok(true);
        }

        let eye_to_target = target - self.eye;
        let target_dist = eye_to_target.length();
        if radius >= target_dist {
            // Eye is inside the bounding sphere.
            return Ok(true);
        }

        // Pull the target toward the eye by `radius`, then test against
        // the horizon plane in scaled space.
        let shifted = eye_to_target * ((target_dist - radius) / target_dist);
        let vt_dot_vc = (shifted * self.scale).dot(self.vc);
        if vt_dot_vc <= self.vh_mag2 {
            return Ok(true);
        }

        // Behind the horizon plane: the sphere is hidden only if it lies
        // entirely inside the horizon cone.
        let a = eye_to_target.dot(-self.eye_unit);
        let b = a * self.cone_tan;
        let c = (eye_to_target.length_squared() - a * a).max(0.0).sqrt();
        let d = c - b;
        let e = d * self.cone_cos;

        Ok(e > -radius)
    }

    /// World-space plane through the horizon, facing the eye.
    ///
    /// Returns `None` when the eye is at the body center.
    pub fn plane(&self) -> Option<Plane> {
        if self.vc_mag2 == 0.0 {
            return None;
        }

        // Center → horizon plane distance, scaled.
        let pc_mag = 1.0 / self.vc_mag;
        let pc_world = (self.eye_unit * pc_mag) * self.scale_inv;

        Some(Plane::new(self.eye_unit, -pc_world.length()))
    }

    /// Straight-line distance from the eye to the horizon.
    ///
    /// Exact for spheres; for flattened bodies the scaled distance is
    /// mapped back with the body radius along the eye direction. Zero when
    /// degenerate.
    pub fn horizon_distance(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let radius_along_eye = 1.0 / (self.eye_unit * self.scale).length();
        self.vh_mag2.sqrt() * radius_along_eye
    }
}

impl Default for HorizonTest {
    fn default() -> Self {
        Self::new(&Ellipsoid::WGS84)
    }
}
