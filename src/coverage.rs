//! Face pixel-coverage evaluation
//!
//! Converts the per-pixel scene coverage at a working distance into the
//! pixel count across a reference face, and derives the reference
//! scenario: the working distance at which the canonical recognition
//! target (80 px across 18 cm) would be met with the current lens.

use serde::{Deserialize, Serialize};

use crate::constants::face;
use crate::error::Result;
use crate::geometry::{SensorGeometry, WorkingDistance};

/// Pixel coverage of the reference face at one working distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceCoverage {
    /// Scene centimeters covered by one pixel
    pub cm_per_pixel: f64,
    /// Pixels across the 18 cm reference face
    pub pixels_for_face: f64,
    /// Pixels counted toward the 80 px recognition target, capped at the target
    pub occupancy_px: f64,
    /// Occupancy as a percentage of the recognition target
    pub occupancy_percent: f64,
    /// The distance at which the recognition target would be met exactly,
    /// with the current focal length and sensor
    pub reference: WorkingDistance,
}

impl FaceCoverage {
    /// Evaluate coverage for an already-solved working distance.
    pub fn evaluate(
        sensor: &SensorGeometry,
        focal_length_mm: f64,
        working: &WorkingDistance,
    ) -> Result<Self> {
        let cm_per_pixel = working.cm_per_pixel();
        let pixels_for_face = face::WIDTH_CM / cm_per_pixel;
        let occupancy_px = pixels_for_face.min(face::TARGET_PIXELS);
        let occupancy_percent = occupancy_px / face::TARGET_PIXELS * 100.0;

        // The target pixel density fixes the linear FOV; solving that FOV
        // back through the magnification relation gives the distance that
        // would satisfy recognition with this same lens.
        let required_cm_per_pixel = face::WIDTH_CM / face::TARGET_PIXELS;
        let required_hfov_cm = required_cm_per_pixel * sensor.h_res as f64;
        let reference = WorkingDistance::from_hfov_cm(sensor, focal_length_mm, required_hfov_cm)?;

        Ok(Self {
            cm_per_pixel,
            pixels_for_face,
            occupancy_px,
            occupancy_percent,
            reference,
        })
    }

    /// Pixels across the reference face at an arbitrary distance.
    ///
    /// Shared by the compliance check and the adjustment search, which
    /// both probe coverage at the fixed test distance.
    pub fn pixels_at(
        sensor: &SensorGeometry,
        focal_length_mm: f64,
        distance_cm: f64,
    ) -> Result<f64> {
        let working = WorkingDistance::from_distance_cm(sensor, focal_length_mm, distance_cm)?;
        Ok(face::WIDTH_CM / working.cm_per_pixel())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sensor_1080p() -> SensorGeometry {
        SensorGeometry::resolve(1920, 1080, Some(5.37), None).unwrap()
    }

    #[test]
    fn test_face_pixels_at_three_meters() {
        let sensor = sensor_1080p();
        let wd = WorkingDistance::from_distance_cm(&sensor, 6.0, 300.0).unwrap();
        let coverage = FaceCoverage::evaluate(&sensor, 6.0, &wd).unwrap();
        // hfov 267.96 cm over 1920 px, 18 cm face → about 129 px
        assert_relative_eq!(coverage.pixels_for_face, 128.97, epsilon = 0.01);
    }

    #[test]
    fn test_occupancy_caps_at_target() {
        let sensor = sensor_1080p();
        // Close subject: face covers far more than 80 px
        let wd = WorkingDistance::from_distance_cm(&sensor, 6.0, 100.0).unwrap();
        let coverage = FaceCoverage::evaluate(&sensor, 6.0, &wd).unwrap();
        assert!(coverage.pixels_for_face > 80.0);
        assert_relative_eq!(coverage.occupancy_px, 80.0, epsilon = 1e-12);
        assert_relative_eq!(coverage.occupancy_percent, 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_occupancy_below_target() {
        let sensor = sensor_1080p();
        let wd = WorkingDistance::from_distance_cm(&sensor, 6.0, 600.0).unwrap();
        let coverage = FaceCoverage::evaluate(&sensor, 6.0, &wd).unwrap();
        assert!(coverage.occupancy_px < 80.0);
        assert!(coverage.occupancy_percent < 100.0);
        assert_relative_eq!(
            coverage.occupancy_percent,
            coverage.pixels_for_face / 80.0 * 100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_reference_scenario_distance() {
        let sensor = sensor_1080p();
        let wd = WorkingDistance::from_distance_cm(&sensor, 6.0, 300.0).unwrap();
        let coverage = FaceCoverage::evaluate(&sensor, 6.0, &wd).unwrap();
        // 0.225 cm/px · 1920 px = 432 cm FOV → 483.28 cm distance
        assert_relative_eq!(coverage.reference.hfov_cm, 432.0, epsilon = 1e-9);
        assert_relative_eq!(coverage.reference.distance_cm, 483.282, epsilon = 1e-2);
    }

    #[test]
    fn test_face_exactly_at_reference_distance_hits_target() {
        let sensor = sensor_1080p();
        let wd = WorkingDistance::from_distance_cm(&sensor, 6.0, 300.0).unwrap();
        let coverage = FaceCoverage::evaluate(&sensor, 6.0, &wd).unwrap();
        let px =
            FaceCoverage::pixels_at(&sensor, 6.0, coverage.reference.distance_cm).unwrap();
        assert_relative_eq!(px, 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pixels_at_guards_distance() {
        let sensor = sensor_1080p();
        assert!(FaceCoverage::pixels_at(&sensor, 6.0, 0.1).is_err());
    }
}
