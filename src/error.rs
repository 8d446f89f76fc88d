//! Error types for the lens_planner library

use thiserror::Error;

/// Result type alias for lens_planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Comprehensive error types for optical evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A required input field was not supplied
    #[error("Missing input: {field}")]
    MissingInput { field: String },

    /// An input value is outside its valid range
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Diagonal field of view outside the open interval (0°, 180°)
    #[error("Invalid diagonal FOV: {dfov_deg}° (must be strictly between 0° and 180°)")]
    InvalidAngle { dfov_deg: f64 },

    /// Working distance at or inside the focal length, where the
    /// magnification relation is singular
    #[error(
        "Invalid working distance: {distance_cm} cm with focal length {focal_length_mm} mm \
         (distance must exceed the focal length)"
    )]
    InvalidDistance {
        distance_cm: f64,
        focal_length_mm: f64,
    },

    /// Focal length must be strictly positive
    #[error("Invalid focal length: {focal_length_mm} mm")]
    InvalidFocalLength { focal_length_mm: f64 },

    /// F-number must be strictly positive
    #[error("Invalid aperture: f/{f_number}")]
    InvalidAperture { f_number: f64 },

    /// Focus distance must be strictly positive
    #[error("Invalid focus distance: {distance_cm} cm")]
    InvalidFocusDistance { distance_cm: f64 },

    /// The adjustment search space contained no compliant configuration
    #[error("No feasible adjustment found ({combinations_tried} combinations tried)")]
    NoFeasibleCandidate { combinations_tried: usize },
}

impl PlannerError {
    /// Create a missing-input error for a named field
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Create an invalid-parameter error with the offending value
    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// A recoverable error leaves the rest of the evaluation meaningful:
    /// an empty adjustment search still reports field-of-view results.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PlannerError::NoFeasibleCandidate { .. })
    }

    /// Get user-friendly error description for application display
    ///
    /// Every variant names the input the user should correct.
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::MissingInput { field } => {
                format!("Please provide {field} to continue the calculation.")
            }
            PlannerError::InvalidParameter { parameter, value } => {
                format!("The value {value} for {parameter} is out of range. Please correct it.")
            }
            PlannerError::InvalidAngle { dfov_deg } => {
                format!(
                    "A diagonal FOV of {dfov_deg}° is not geometrically possible. \
                     Enter an angle between 0° and 180°."
                )
            }
            PlannerError::InvalidDistance {
                distance_cm,
                focal_length_mm,
            } => {
                format!(
                    "A distance of {distance_cm} cm is at or inside the {focal_length_mm} mm \
                     focal length. Move the subject further away or shorten the lens."
                )
            }
            PlannerError::InvalidFocalLength { focal_length_mm } => {
                format!("Focal length must be positive (got {focal_length_mm} mm).")
            }
            PlannerError::InvalidAperture { f_number } => {
                format!("Aperture must be positive (got f/{f_number}).")
            }
            PlannerError::InvalidFocusDistance { distance_cm } => {
                format!("Focus distance must be positive (got {distance_cm} cm).")
            }
            PlannerError::NoFeasibleCandidate { combinations_tried } => {
                format!(
                    "None of the {combinations_tried} aperture/focal-length combinations meet \
                     the requirements. Widen the tolerance windows or relax the thresholds."
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_name_the_input() {
        let err = PlannerError::missing("sensor width or pixel size");
        assert!(err.user_message().contains("sensor width"));

        let err = PlannerError::InvalidAngle { dfov_deg: 200.0 };
        assert!(err.user_message().contains("200"));
        assert!(err.user_message().contains("180"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(PlannerError::NoFeasibleCandidate {
            combinations_tried: 12
        }
        .is_recoverable());
        assert!(!PlannerError::InvalidAperture { f_number: -1.0 }.is_recoverable());
    }

    #[test]
    fn test_display_formatting() {
        let err = PlannerError::InvalidDistance {
            distance_cm: 0.5,
            focal_length_mm: 6.0,
        };
        let text = err.to_string();
        assert!(text.contains("0.5"));
        assert!(text.contains("6"));
    }
}
