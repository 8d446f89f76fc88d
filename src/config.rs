//! Input configuration for an optical evaluation pass.
//!
//! This module defines the full input snapshot consumed by
//! [`evaluate`](crate::evaluate), organized into logical groups for
//! sensor geometry, lens selection, scene range, and compliance
//! requirements.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use lens_planner::OpticalConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = OpticalConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use a representative indoor deployment
//! let config = OpticalConfig::default_indoor();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

/// Complete input snapshot for one evaluation pass.
///
/// Immutable per evaluation; the presentation layer rebuilds it wholesale
/// on any input change and calls [`evaluate`](crate::evaluate) again.
/// Can be serialized to/from JSON for reproducible configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalConfig {
    /// Horizontal sensor resolution in pixels
    pub h_res: u32,

    /// Vertical sensor resolution in pixels
    pub v_res: u32,

    /// Sensor width in millimeters, if known
    ///
    /// Exactly one of `sensor_width_mm` and `pixel_size_um` is needed;
    /// when both are supplied the sensor width takes precedence.
    #[serde(default)]
    pub sensor_width_mm: Option<f64>,

    /// Pixel pitch in micrometers, if known
    #[serde(default)]
    pub pixel_size_um: Option<f64>,

    /// Lens selection: a focal length, or a target diagonal FOV to solve for
    pub lens: LensInput,

    /// Scene range selection: a working distance, or a target linear HFOV
    #[serde(default)]
    pub range: Option<RangeInput>,

    /// Aperture as an f-number, required for depth-of-field work
    #[serde(default)]
    pub f_number: Option<f64>,

    /// Focus distance in centimeters, required for depth-of-field work
    #[serde(default)]
    pub focus_distance_cm: Option<f64>,

    /// Compliance thresholds; omit to skip compliance and adjustment stages
    #[serde(default)]
    pub requirements: Option<Requirements>,

    /// Adjustment search tolerance windows; omit to skip the search
    #[serde(default)]
    pub search: Option<SearchWindow>,

    /// Circle-of-confusion scaling choice for depth-of-field computations
    #[serde(default)]
    pub blur_criterion: BlurCriterion,
}

/// Lens specification: the two directions are mutually exclusive per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LensInput {
    /// Focal length is known; solve for the angular field of view
    FocalLengthMm(f64),
    /// Target diagonal FOV is known; solve for the focal length
    DiagonalFovDeg(f64),
}

/// Scene range specification: the two directions are mutually exclusive per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeInput {
    /// Working distance is known; solve for the linear HFOV
    DistanceCm(f64),
    /// Target linear HFOV is known; solve for the working distance
    HfovCm(f64),
}

/// Circle-of-confusion scaling applied to the permissible blur.
///
/// The operative circle of confusion is the permissible blur (the larger
/// of the Airy disk and the pixel pitch) times a small integer factor.
/// Both scalings are always reported; this choice selects which one
/// drives the hyperfocal distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurCriterion {
    /// Two-pixel blur circle (the conservative default)
    #[default]
    Conservative,
    /// Three-pixel blur circle, correcting for Bayer-pattern interpolation
    BayerAdjusted,
}

/// Recognition thresholds a configuration is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    /// Nearest distance that must be acceptably sharp, in centimeters
    pub near_limit_cm: f64,

    /// Farthest distance that must be acceptably sharp, in centimeters
    pub far_limit_cm: f64,

    /// Minimum pixel count across the reference face at the fixed test distance
    #[serde(default = "default_required_pixels")]
    pub required_pixels: f64,
}

fn default_required_pixels() -> f64 {
    crate::constants::face::TARGET_PIXELS
}

/// Tolerance windows for the adjustment search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    /// Number of discrete f-stops to try on each side of the current aperture
    pub aperture_steps: u32,

    /// Millimeters to try on each side of the current focal length, in 1 mm steps
    pub focal_window_mm: u32,
}

impl OpticalConfig {
    /// Representative indoor face-recognition deployment
    ///
    /// A 1080p sensor with a 5.37 mm wide imager behind a 6 mm f/2 lens,
    /// watching a corridor three meters away.
    pub fn default_indoor() -> Self {
        Self {
            h_res: 1920,
            v_res: 1080,
            sensor_width_mm: Some(5.37),
            pixel_size_um: None,
            lens: LensInput::FocalLengthMm(6.0),
            range: Some(RangeInput::DistanceCm(300.0)),
            f_number: Some(2.0),
            focus_distance_cm: Some(100.0),
            requirements: Some(Requirements {
                near_limit_cm: 90.0,
                far_limit_cm: 125.0,
                required_pixels: 80.0,
            }),
            search: Some(SearchWindow {
                aperture_steps: 1,
                focal_window_mm: 2,
            }),
            blur_criterion: BlurCriterion::Conservative,
        }
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_roundtrip() {
        let config = OpticalConfig::default_indoor();
        let json = serde_json::to_string(&config).unwrap();
        let back: OpticalConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_required_pixels_defaults_to_recognition_target() {
        let json = r#"{"near_limit_cm": 80.0, "far_limit_cm": 140.0}"#;
        let req: Requirements = serde_json::from_str(json).unwrap();
        assert_eq!(req.required_pixels, 80.0);
    }

    #[test]
    fn test_blur_criterion_defaults_conservative() {
        assert_eq!(BlurCriterion::default(), BlurCriterion::Conservative);
    }

    #[test]
    fn test_minimal_config_deserializes() {
        let json = r#"{
            "h_res": 1920,
            "v_res": 1080,
            "pixel_size_um": 2.8,
            "lens": {"focal_length_mm": 6.0}
        }"#;
        let config: OpticalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.pixel_size_um, Some(2.8));
        assert_eq!(config.lens, LensInput::FocalLengthMm(6.0));
        assert!(config.range.is_none());
        assert!(config.requirements.is_none());
    }
}
