//! Working-distance solver
//!
//! Converts between working distance and linear horizontal field of view
//! through the thin-lens magnification relation `m = f / (d − f)`. The
//! relation is singular at `d = f`, so distances at or inside the focal
//! length are rejected rather than silently producing a negative FOV.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::geometry::SensorGeometry;

/// A working distance paired with the linear field of view it implies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingDistance {
    /// Distance from lens to subject in centimeters
    pub distance_cm: f64,
    /// Horizontal field of view at that distance, in centimeters
    pub hfov_cm: f64,
    /// Scene millimeters covered by one sensor pixel
    pub mm_per_pixel: f64,
}

impl WorkingDistance {
    /// Distance → FOV direction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDistance` when the subject distance does not exceed
    /// the focal length.
    pub fn from_distance_cm(
        sensor: &SensorGeometry,
        focal_length_mm: f64,
        distance_cm: f64,
    ) -> Result<Self> {
        let distance_mm = distance_cm * 10.0;
        if distance_mm <= focal_length_mm {
            return Err(PlannerError::InvalidDistance {
                distance_cm,
                focal_length_mm,
            });
        }

        let magnification = focal_length_mm / (distance_mm - focal_length_mm);
        let hfov_mm = sensor.width_mm / magnification;

        Ok(Self {
            distance_cm,
            hfov_cm: hfov_mm / 10.0,
            mm_per_pixel: hfov_mm / sensor.h_res as f64,
        })
    }

    /// FOV → distance direction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the target HFOV is not positive.
    pub fn from_hfov_cm(
        sensor: &SensorGeometry,
        focal_length_mm: f64,
        hfov_cm: f64,
    ) -> Result<Self> {
        if hfov_cm <= 0.0 {
            return Err(PlannerError::invalid("hfov_cm", hfov_cm));
        }

        let hfov_mm = hfov_cm * 10.0;
        let magnification = sensor.width_mm / hfov_mm;
        let distance_mm = focal_length_mm / magnification + focal_length_mm;

        Ok(Self {
            distance_cm: distance_mm / 10.0,
            hfov_cm,
            mm_per_pixel: hfov_mm / sensor.h_res as f64,
        })
    }

    /// Scene centimeters covered by one sensor pixel
    pub fn cm_per_pixel(&self) -> f64 {
        self.mm_per_pixel / 10.0
    }
}
