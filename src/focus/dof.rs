//! Depth-of-field computation
//!
//! Derives the circle of confusion from diffraction and pixel pitch,
//! then the hyperfocal, near, and far limits of acceptable sharpness.
//! Far limits behind the hyperfocal point are unbounded and carried as
//! an explicit [`Reach`] variant, never as a floating-point infinity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BlurCriterion;
use crate::constants::{blur, diffraction};
use crate::error::{PlannerError, Result};

/// A distance that may be unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "mm", rename_all = "snake_case")]
pub enum Reach {
    /// A finite distance in millimeters
    Finite(f64),
    /// Extends to infinity (at or beyond the hyperfocal point)
    Unbounded,
}

impl Reach {
    /// True for the unbounded variant
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Reach::Unbounded)
    }

    /// The finite value in millimeters, if any
    pub fn finite_mm(&self) -> Option<f64> {
        match self {
            Reach::Finite(mm) => Some(*mm),
            Reach::Unbounded => None,
        }
    }

    /// Whether this reach extends at least to the given distance
    pub fn reaches_mm(&self, distance_mm: f64) -> bool {
        match self {
            Reach::Finite(mm) => *mm >= distance_mm,
            Reach::Unbounded => true,
        }
    }
}

impl fmt::Display for Reach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reach::Finite(mm) => write!(f, "{:.1} mm", mm),
            Reach::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Depth-of-field result for one aperture/focal-length/focus setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthOfField {
    /// Diffraction-limited blur spot diameter in micrometers
    pub airy_disk_um: f64,
    /// Permissible blur: the larger of the Airy disk and the pixel pitch
    pub permissible_blur_um: f64,
    /// Two-pixel circle of confusion in millimeters
    pub coc_conservative_mm: f64,
    /// Three-pixel (Bayer-corrected) circle of confusion in millimeters
    pub coc_bayer_mm: f64,
    /// Operative circle of confusion selected by the blur criterion
    pub coc_mm: f64,
    /// Hyperfocal distance in millimeters
    pub hyperfocal_mm: f64,
    /// Near limit of acceptable sharpness in millimeters
    pub near_mm: f64,
    /// Far limit of acceptable sharpness
    pub far: Reach,
    /// Total depth of field (far − near)
    pub depth: Reach,
}

impl DepthOfField {
    /// Compute depth of field.
    ///
    /// # Arguments
    ///
    /// * `pixel_size_um` - sensor pixel pitch in micrometers
    /// * `focal_length_mm` - lens focal length
    /// * `f_number` - aperture
    /// * `focus_distance_mm` - subject focus distance
    /// * `criterion` - which circle-of-confusion scaling drives the result
    ///
    /// # Errors
    ///
    /// Returns `InvalidAperture` or `InvalidFocusDistance` when the
    /// respective input is not positive, and `InvalidFocalLength` for a
    /// non-positive focal length.
    pub fn compute(
        pixel_size_um: f64,
        focal_length_mm: f64,
        f_number: f64,
        focus_distance_mm: f64,
        criterion: BlurCriterion,
    ) -> Result<Self> {
        if f_number <= 0.0 {
            return Err(PlannerError::InvalidAperture { f_number });
        }
        if focus_distance_mm <= 0.0 {
            return Err(PlannerError::InvalidFocusDistance {
                distance_cm: focus_distance_mm / 10.0,
            });
        }
        if focal_length_mm <= 0.0 {
            return Err(PlannerError::InvalidFocalLength { focal_length_mm });
        }

        let airy_disk_um = diffraction::AIRY_FACTOR * diffraction::WAVELENGTH_UM * f_number;
        let permissible_blur_um = airy_disk_um.max(pixel_size_um);
        let coc_conservative_mm = blur::CONSERVATIVE_FACTOR * permissible_blur_um / 1000.0;
        let coc_bayer_mm = blur::BAYER_FACTOR * permissible_blur_um / 1000.0;
        let coc_mm = match criterion {
            BlurCriterion::Conservative => coc_conservative_mm,
            BlurCriterion::BayerAdjusted => coc_bayer_mm,
        };

        let f = focal_length_mm;
        let u = focus_distance_mm;
        let hyperfocal_mm = f + f * f / (f_number * coc_mm);

        let near_mm = hyperfocal_mm * u / (hyperfocal_mm + (u - f));
        let far = if u < hyperfocal_mm {
            Reach::Finite(hyperfocal_mm * u / (hyperfocal_mm - (u - f)))
        } else {
            Reach::Unbounded
        };
        let depth = match far {
            Reach::Finite(far_mm) => Reach::Finite(far_mm - near_mm),
            Reach::Unbounded => Reach::Unbounded,
        };

        Ok(Self {
            airy_disk_um,
            permissible_blur_um,
            coc_conservative_mm,
            coc_bayer_mm,
            coc_mm,
            hyperfocal_mm,
            near_mm,
            far,
            depth,
        })
    }
}
