//! Optical-format classification
//!
//! Names the standard optical format (1/4" up to 35mm film) whose
//! nominal inches value sits closest to the sensor's diagonal.

use serde::{Deserialize, Serialize};

use crate::constants::formats;
use crate::geometry::SensorGeometry;

/// Nearest-match result from the optical-format table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatMatch {
    /// Standard format label, e.g. "1/2.3\""
    pub label: String,
    /// The table value the sensor matched against, in inches
    pub table_equiv_in: f64,
    /// The sensor's own format value, in inches
    pub computed_equiv_in: f64,
    /// Sensor diagonal in millimeters
    pub diagonal_mm: f64,
}

impl FormatMatch {
    /// Classify a resolved sensor by its diagonal.
    pub fn classify(sensor: &SensorGeometry) -> Self {
        Self::from_dimensions(sensor.width_mm, sensor.height_mm)
    }

    /// Classify from raw sensor dimensions in millimeters.
    ///
    /// Ties break to the first table entry in order, so the result is
    /// stable and deterministic.
    pub fn from_dimensions(width_mm: f64, height_mm: f64) -> Self {
        let diagonal_mm = f64::hypot(width_mm, height_mm);
        let computed_equiv_in = diagonal_mm * formats::DIAGONAL_TO_FORMAT_IN;

        let mut best = &formats::TABLE[0];
        let mut best_delta = (computed_equiv_in - best.1).abs();
        for entry in &formats::TABLE[1..] {
            let delta = (computed_equiv_in - entry.1).abs();
            if delta < best_delta {
                best = entry;
                best_delta = delta;
            }
        }

        Self {
            label: best.0.to_string(),
            table_equiv_in: best.1,
            computed_equiv_in,
            diagonal_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 4:3 dimensions whose diagonal converts to exactly the given inches value
    fn dims_for_equiv_in(equiv_in: f64) -> (f64, f64) {
        let diagonal_mm = equiv_in / formats::DIAGONAL_TO_FORMAT_IN;
        (diagonal_mm * 0.8, diagonal_mm * 0.6)
    }

    #[test]
    fn test_exact_table_values_return_their_label() {
        for (label, value) in formats::TABLE {
            let (w, h) = dims_for_equiv_in(value);
            let matched = FormatMatch::from_dimensions(w, h);
            assert_eq!(matched.label, label);
            assert_relative_eq!(matched.computed_equiv_in, value, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_full_frame_sensor() {
        let matched = FormatMatch::from_dimensions(36.0, 24.0);
        assert_eq!(matched.label, "35mm film");
        assert_relative_eq!(matched.diagonal_mm, f64::hypot(36.0, 24.0), epsilon = 1e-12);
    }

    #[test]
    fn test_typical_1080p_security_sensor() {
        // 5.37 × 3.02 mm diagonal is about 6.16 mm, 0.364 format inches
        let matched = FormatMatch::from_dimensions(5.37, 3.020_625);
        assert_eq!(matched.label, "1/2.7\"");
    }

    #[test]
    fn test_boundary_between_adjacent_entries() {
        let (a, b) = (formats::TABLE[0].1, formats::TABLE[1].1);
        let mid = (a + b) / 2.0;

        let (w, h) = dims_for_equiv_in(mid - 1e-9);
        assert_eq!(FormatMatch::from_dimensions(w, h).label, formats::TABLE[0].0);

        let (w, h) = dims_for_equiv_in(mid + 1e-9);
        assert_eq!(FormatMatch::from_dimensions(w, h).label, formats::TABLE[1].0);
    }

    #[test]
    fn test_classify_matches_from_dimensions() {
        let sensor = SensorGeometry::resolve(1920, 1080, Some(5.37), None).unwrap();
        let via_sensor = FormatMatch::classify(&sensor);
        let via_dims = FormatMatch::from_dimensions(sensor.width_mm, sensor.height_mm);
        assert_eq!(via_sensor, via_dims);
    }
}
