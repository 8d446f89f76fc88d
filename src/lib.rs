//! # Lens Planner
//!
//! A Rust crate for planning camera/lens configurations for
//! face-recognition deployments.
//!
//! This library derives the full set of dependent optical quantities from
//! one input snapshot:
//! - Sensor geometry from resolution plus width or pixel pitch
//! - Angular field of view from focal length, or the inverse
//! - Working distance and linear field of view through the magnification relation
//! - Pixel coverage of a face-sized reference object
//! - Circle-of-confusion depth of field and hyperfocal distance
//! - Compliance against recognition thresholds, with a discrete search
//!   over nearby aperture/focal-length adjustments
//!
//! ## Example
//!
//! ```rust
//! use lens_planner::{evaluate, OpticalConfig};
//!
//! let config = OpticalConfig::default_indoor();
//! let results = evaluate(&config)?;
//! if let Some(fov) = &results.fov {
//!     println!("HFOV: {:.1}°", fov.hfov_deg);
//! }
//! # Ok::<(), lens_planner::PlannerError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod constants;
pub mod coverage;
pub mod error;
pub mod focus;
pub mod geometry;

pub use config::{
    BlurCriterion, LensInput, OpticalConfig, RangeInput, Requirements, SearchWindow,
};
pub use coverage::FaceCoverage;
pub use error::{PlannerError, Result};
pub use focus::{AdjustmentCandidate, AdjustmentOutcome, ComplianceVerdict, DepthOfField, Reach};
pub use geometry::{FieldOfView, FormatMatch, SensorGeometry, WorkingDistance};

/// The evaluation stage a problem was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FieldOfView,
    WorkingDistance,
    Coverage,
    DepthOfField,
    Compliance,
    Adjustment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FieldOfView => "field of view",
            Stage::WorkingDistance => "working distance",
            Stage::Coverage => "face coverage",
            Stage::DepthOfField => "depth of field",
            Stage::Compliance => "compliance",
            Stage::Adjustment => "adjustment search",
        };
        f.write_str(name)
    }
}

/// A recovered per-stage failure with its actionable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Which stage failed
    pub stage: Stage,
    /// User-facing message naming the input to correct
    pub message: String,
}

/// Complete results of one evaluation pass.
///
/// Each downstream section is present only when its inputs were supplied
/// and valid; failures are recovered into [`problems`](Self::problems) so
/// one bad stage never suppresses the others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Resolved sensor geometry (always present)
    pub sensor: SensorGeometry,
    /// Optical-format classification of the sensor (always present)
    pub format: FormatMatch,
    /// Angular field of view and operative focal length
    pub fov: Option<FieldOfView>,
    /// Working distance and linear field of view
    pub working_distance: Option<WorkingDistance>,
    /// Face pixel coverage and the recognition reference scenario
    pub coverage: Option<FaceCoverage>,
    /// Depth of field at the configured focus distance
    pub depth_of_field: Option<DepthOfField>,
    /// Compliance verdict against the configured requirements
    pub compliance: Option<ComplianceVerdict>,
    /// Feasible adjustments near the current setting
    pub adjustments: Option<AdjustmentOutcome>,
    /// Per-stage failures recovered during the pass
    pub problems: Vec<Problem>,
}

/// Evaluate one configuration snapshot.
///
/// Pure and synchronous; the caller re-invokes it wholesale whenever any
/// input changes. Only an unresolvable sensor is a hard error, since
/// nothing downstream can be computed without it. Every other stage
/// failure is recovered into the returned [`Evaluation`].
///
/// # Errors
///
/// Returns `MissingInput` when neither sensor width nor pixel size is
/// supplied, or `InvalidParameter` for degenerate resolutions.
pub fn evaluate(config: &OpticalConfig) -> Result<Evaluation> {
    let sensor = SensorGeometry::resolve(
        config.h_res,
        config.v_res,
        config.sensor_width_mm,
        config.pixel_size_um,
    )?;
    let format = FormatMatch::classify(&sensor);

    let mut problems = Vec::new();
    let mut recover = |stage: Stage, err: PlannerError| {
        problems.push(Problem {
            stage,
            message: err.user_message(),
        });
    };

    let fov = match config.lens {
        LensInput::FocalLengthMm(f) => FieldOfView::from_focal_length(&sensor, f),
        LensInput::DiagonalFovDeg(dfov) => FieldOfView::from_diagonal_fov(&sensor, dfov),
    }
    .map_err(|e| recover(Stage::FieldOfView, e))
    .ok();
    let focal_length_mm = fov.map(|f| f.focal_length_mm);

    let working_distance = match (focal_length_mm, config.range) {
        (Some(f), Some(RangeInput::DistanceCm(d))) => {
            WorkingDistance::from_distance_cm(&sensor, f, d)
                .map_err(|e| recover(Stage::WorkingDistance, e))
                .ok()
        }
        (Some(f), Some(RangeInput::HfovCm(h))) => WorkingDistance::from_hfov_cm(&sensor, f, h)
            .map_err(|e| recover(Stage::WorkingDistance, e))
            .ok(),
        _ => None,
    };

    let coverage = match (focal_length_mm, &working_distance) {
        (Some(f), Some(wd)) => FaceCoverage::evaluate(&sensor, f, wd)
            .map_err(|e| recover(Stage::Coverage, e))
            .ok(),
        _ => None,
    };

    let depth_of_field = match (focal_length_mm, config.f_number, config.focus_distance_cm) {
        (Some(f), Some(n), Some(u_cm)) => DepthOfField::compute(
            sensor.pixel_size_um,
            f,
            n,
            u_cm * 10.0,
            config.blur_criterion,
        )
        .map_err(|e| recover(Stage::DepthOfField, e))
        .ok(),
        (Some(_), Some(_), None) => {
            recover(
                Stage::DepthOfField,
                PlannerError::missing("focus distance (cm)"),
            );
            None
        }
        (Some(_), None, Some(_)) => {
            recover(Stage::DepthOfField, PlannerError::missing("aperture (f-number)"));
            None
        }
        // Neither aperture nor focus distance supplied: depth of field
        // was not requested.
        _ => None,
    };

    let compliance = match (focal_length_mm, &depth_of_field, &config.requirements) {
        (Some(f), Some(dof), Some(req)) => ComplianceVerdict::check(&sensor, f, dof, req)
            .map_err(|e| recover(Stage::Compliance, e))
            .ok(),
        _ => None,
    };

    let adjustments = match (
        focal_length_mm,
        config.f_number,
        config.focus_distance_cm,
        &config.requirements,
        &config.search,
    ) {
        (Some(f), Some(n), Some(u_cm), Some(req), Some(win)) => focus::adjust::search(
            &sensor,
            n,
            f,
            u_cm * 10.0,
            config.blur_criterion,
            req,
            win,
        )
        .map_err(|e| recover(Stage::Adjustment, e))
        .ok(),
        _ => None,
    };

    Ok(Evaluation {
        sensor,
        format,
        fov,
        working_distance,
        coverage,
        depth_of_field,
        compliance,
        adjustments,
        problems,
    })
}
