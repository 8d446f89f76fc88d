//! Sensor geometry resolution
//!
//! Resolves the full sensor dimensions from resolution plus either the
//! sensor width or the pixel pitch. The only unit conversion performed
//! is mm to µm and back.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Fully resolved sensor geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorGeometry {
    /// Horizontal resolution in pixels
    pub h_res: u32,
    /// Vertical resolution in pixels
    pub v_res: u32,
    /// Sensor width in millimeters
    pub width_mm: f64,
    /// Sensor height in millimeters
    pub height_mm: f64,
    /// Pixel pitch in micrometers
    pub pixel_size_um: f64,
}

impl SensorGeometry {
    /// Resolve sensor geometry from partial input.
    ///
    /// Exactly one of `sensor_width_mm` and `pixel_size_um` is needed; the
    /// other is derived. When both are supplied the sensor width takes
    /// precedence and the pixel size is rederived from it.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` when neither optional value is supplied, and
    /// `InvalidParameter` for zero resolutions or non-positive dimensions.
    pub fn resolve(
        h_res: u32,
        v_res: u32,
        sensor_width_mm: Option<f64>,
        pixel_size_um: Option<f64>,
    ) -> Result<Self> {
        if h_res == 0 {
            return Err(PlannerError::invalid("h_res", h_res));
        }
        if v_res == 0 {
            return Err(PlannerError::invalid("v_res", v_res));
        }

        // Sensor width wins when both are present.
        let (width_mm, pixel_size_um) = match (sensor_width_mm, pixel_size_um) {
            (Some(width), _) => {
                if width <= 0.0 {
                    return Err(PlannerError::invalid("sensor_width_mm", width));
                }
                (width, width / h_res as f64 * 1000.0)
            }
            (None, Some(pitch)) => {
                if pitch <= 0.0 {
                    return Err(PlannerError::invalid("pixel_size_um", pitch));
                }
                (h_res as f64 * pitch / 1000.0, pitch)
            }
            (None, None) => {
                return Err(PlannerError::missing("sensor width (mm) or pixel size (µm)"));
            }
        };

        let height_mm = pixel_size_um / 1000.0 * v_res as f64;

        Ok(Self {
            h_res,
            v_res,
            width_mm,
            height_mm,
            pixel_size_um,
        })
    }

    /// Sensor diagonal in millimeters
    pub fn diagonal_mm(&self) -> f64 {
        f64::hypot(self.width_mm, self.height_mm)
    }
}
