//! Angular field-of-view solver
//!
//! Converts between focal length and angular field of view under the
//! pinhole approximation, in both directions:
//! - forward: `hfov = 2·atan(w / 2f)`, diagonal likewise from the diagonal
//! - inverse: `f = (diag / 2) / tan(dfov / 2)`

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::geometry::SensorGeometry;

/// Angular field of view paired with the focal length that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldOfView {
    /// Horizontal field of view in degrees
    pub hfov_deg: f64,
    /// Diagonal field of view in degrees
    pub dfov_deg: f64,
    /// Operative focal length in millimeters (supplied or solved for)
    pub focal_length_mm: f64,
}

impl FieldOfView {
    /// Forward direction: angular FOV from a known focal length.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFocalLength` when the focal length is not positive.
    pub fn from_focal_length(sensor: &SensorGeometry, focal_length_mm: f64) -> Result<Self> {
        if focal_length_mm <= 0.0 {
            return Err(PlannerError::InvalidFocalLength { focal_length_mm });
        }

        let hfov_deg = 2.0 * (sensor.width_mm / (2.0 * focal_length_mm)).atan().to_degrees();
        let dfov_deg = 2.0
            * (sensor.diagonal_mm() / (2.0 * focal_length_mm))
                .atan()
                .to_degrees();

        Ok(Self {
            hfov_deg,
            dfov_deg,
            focal_length_mm,
        })
    }

    /// Inverse direction: focal length from a target diagonal FOV.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAngle` unless the angle is strictly inside
    /// (0°, 180°); at or beyond 180° no focal length produces the view.
    pub fn from_diagonal_fov(sensor: &SensorGeometry, dfov_deg: f64) -> Result<Self> {
        if dfov_deg <= 0.0 || dfov_deg >= 180.0 {
            return Err(PlannerError::InvalidAngle { dfov_deg });
        }

        let focal_length_mm =
            (sensor.diagonal_mm() / 2.0) / (dfov_deg.to_radians() / 2.0).tan();

        Self::from_focal_length(sensor, focal_length_mm)
    }
}
