//! Error types for horizon culling.

/// Errors reported by the horizon occlusion test.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HorizonError {
    /// Ellipsoid radii must be finite and strictly positive.
    #[error("invalid ellipsoid radii: equatorial {equatorial}, polar {polar}")]
    InvalidEllipsoid {
        /// Requested equatorial radius.
        equatorial: f64,
        /// Requested polar radius.
        polar: f64,
    },

    /// Bounding radius must be a non-negative number.
    #[error("invalid bounding radius: {0}")]
    InvalidRadius(f64),

    /// The eye is at the center of, on, or inside the ellipsoid, so no
    /// horizon exists and the test result would be meaningless.
    #[error("degenerate horizon state: scaled eye distance squared is {scaled_eye_mag2}")]
    DegenerateHorizon {
        /// Squared eye-to-center distance in scaled (unit-sphere) space.
        scaled_eye_mag2: f64,
    },
}
