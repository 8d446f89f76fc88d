//! Compliance checking against recognition requirements
//!
//! A configuration complies when its depth of field covers the desired
//! near/far range and the reference face still spans enough pixels at
//! the fixed test distance.

use serde::{Deserialize, Serialize};

use crate::config::Requirements;
use crate::constants::face;
use crate::coverage::FaceCoverage;
use crate::error::Result;
use crate::focus::dof::{DepthOfField, Reach};
use crate::geometry::SensorGeometry;

/// Verdict plus the numeric evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// Depth of field covers the whole desired range
    pub covers_required_range: bool,
    /// Face pixel count at the test distance meets the threshold
    pub meets_pixel_density: bool,
    /// Near limit of sharpness in centimeters
    pub near_cm: f64,
    /// Far limit of sharpness (centimeters when finite)
    pub far: Reach,
    /// Face pixel count measured at the test distance
    pub px_at_test_distance: f64,
    /// Echo of the desired near limit
    pub near_limit_cm: f64,
    /// Echo of the desired far limit
    pub far_limit_cm: f64,
    /// Echo of the required pixel threshold
    pub required_pixels: f64,
}

impl ComplianceVerdict {
    /// Check a depth-of-field result against requirements.
    ///
    /// Pixel density is probed at the fixed test distance with the
    /// configuration's own focal length, not an adjusted candidate.
    pub fn check(
        sensor: &SensorGeometry,
        focal_length_mm: f64,
        dof: &DepthOfField,
        requirements: &Requirements,
    ) -> Result<Self> {
        let near_cm = dof.near_mm / 10.0;
        let covers_required_range = near_cm <= requirements.near_limit_cm
            && dof.far.reaches_mm(requirements.far_limit_cm * 10.0);

        // Reported in centimeters to match the requirement units.
        let far = match dof.far {
            Reach::Finite(mm) => Reach::Finite(mm / 10.0),
            Reach::Unbounded => Reach::Unbounded,
        };

        let px_at_test_distance =
            FaceCoverage::pixels_at(sensor, focal_length_mm, face::TEST_DISTANCE_CM)?;
        let meets_pixel_density = px_at_test_distance >= requirements.required_pixels;

        Ok(Self {
            covers_required_range,
            meets_pixel_density,
            near_cm,
            far,
            px_at_test_distance,
            near_limit_cm: requirements.near_limit_cm,
            far_limit_cm: requirements.far_limit_cm,
            required_pixels: requirements.required_pixels,
        })
    }

    /// Both checks pass
    pub fn is_compliant(&self) -> bool {
        self.covers_required_range && self.meets_pixel_density
    }
}
