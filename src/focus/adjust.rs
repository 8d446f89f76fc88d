//! Discrete aperture/focal-length adjustment search
//!
//! Enumerates the cross product of standard f-stops around the current
//! aperture and integer-millimeter focal lengths around the current
//! lens, keeps the combinations that satisfy the depth-of-field and
//! pixel-density requirements, and ranks them by normalized distance
//! from the original setting along each axis.

use serde::{Deserialize, Serialize};

use crate::config::{BlurCriterion, Requirements, SearchWindow};
use crate::constants::{apertures, face};
use crate::coverage::FaceCoverage;
use crate::error::{PlannerError, Result};
use crate::focus::dof::DepthOfField;
use crate::geometry::SensorGeometry;

/// One feasible (aperture, focal length) combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentCandidate {
    /// Candidate f-number
    pub f_number: f64,
    /// Candidate focal length in millimeters
    pub focal_length_mm: f64,
    /// |ΔN| normalized by the aperture window span (0 when the span is zero)
    pub aperture_deviation: f64,
    /// |Δf| normalized by the focal window span (0 when the span is zero)
    pub focal_deviation: f64,
}

/// Search result: every feasible candidate plus the two extremal picks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentOutcome {
    /// The original f-number the deviations are measured from
    pub f_number: f64,
    /// The original focal length the deviations are measured from
    pub focal_length_mm: f64,
    /// All feasible combinations, in enumeration order
    pub candidates: Vec<AdjustmentCandidate>,
    /// Feasible candidate with the smallest normalized aperture deviation
    pub closest_aperture: AdjustmentCandidate,
    /// Feasible candidate with the smallest normalized focal-length deviation
    pub closest_focal: AdjustmentCandidate,
    /// Size of the enumerated search space
    pub combinations_tried: usize,
}

impl AdjustmentOutcome {
    /// Distinct candidate apertures, ascending
    pub fn apertures(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.candidates.iter().map(|c| c.f_number).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values
    }

    /// Distinct candidate focal lengths, ascending
    pub fn focal_lengths(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.candidates.iter().map(|c| c.focal_length_mm).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values
    }

    /// Step the aperture axis by a signed offset and return the best
    /// matching candidate at that aperture.
    ///
    /// Offset 0 is the feasible aperture nearest the original f-number;
    /// each step moves one distinct aperture up or down the list. The
    /// best match at an aperture is the candidate with the smallest
    /// focal-length deviation. Returns `None` when the offset walks off
    /// either end.
    pub fn step_aperture(&self, offset: isize) -> Option<&AdjustmentCandidate> {
        let values = self.apertures();
        let value = *step_axis(&values, self.f_number, offset)?;
        self.candidates
            .iter()
            .filter(|c| c.f_number == value)
            .min_by(|a, b| a.focal_deviation.total_cmp(&b.focal_deviation))
    }

    /// Step the focal-length axis by a signed offset and return the best
    /// matching candidate (smallest aperture deviation) at that length.
    pub fn step_focal_length(&self, offset: isize) -> Option<&AdjustmentCandidate> {
        let values = self.focal_lengths();
        let value = *step_axis(&values, self.focal_length_mm, offset)?;
        self.candidates
            .iter()
            .filter(|c| c.focal_length_mm == value)
            .min_by(|a, b| a.aperture_deviation.total_cmp(&b.aperture_deviation))
    }
}

/// Index into a sorted axis: nearest entry to `origin`, moved by `offset`.
fn step_axis(values: &[f64], origin: f64, offset: isize) -> Option<&f64> {
    let base = nearest_index(values, origin)?;
    let index = base as isize + offset;
    if index < 0 {
        return None;
    }
    values.get(index as usize)
}

/// Index of the value closest to `target`; first wins on a tie.
fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.iter().enumerate() {
        let delta = (value - target).abs();
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((i, delta)),
        }
    }
    best.map(|(i, _)| i)
}

/// Enumerate the adjustment window and keep the compliant combinations.
///
/// Every candidate's depth of field is recomputed with the candidate
/// aperture and focal length (current pixel size, focus distance, and
/// blur criterion), and its pixel density is probed at the fixed test
/// distance with the candidate focal length.
///
/// # Errors
///
/// Returns `NoFeasibleCandidate` when nothing in the window complies;
/// callers report this rather than treating it as fatal. Invalid current
/// settings surface as `InvalidAperture`, `InvalidFocalLength`, or
/// `InvalidFocusDistance`.
pub fn search(
    sensor: &SensorGeometry,
    f_number: f64,
    focal_length_mm: f64,
    focus_distance_mm: f64,
    criterion: BlurCriterion,
    requirements: &Requirements,
    window: &SearchWindow,
) -> Result<AdjustmentOutcome> {
    if f_number <= 0.0 {
        return Err(PlannerError::InvalidAperture { f_number });
    }
    if focal_length_mm <= 0.0 {
        return Err(PlannerError::InvalidFocalLength { focal_length_mm });
    }
    if focus_distance_mm <= 0.0 {
        return Err(PlannerError::InvalidFocusDistance {
            distance_cm: focus_distance_mm / 10.0,
        });
    }

    let ladder = &apertures::F_STOP_LADDER;
    let center = nearest_index(ladder, f_number).unwrap_or(0);
    let steps = window.aperture_steps as usize;
    let lo = center.saturating_sub(steps);
    let hi = (center + steps).min(ladder.len() - 1);
    let aperture_candidates = &ladder[lo..=hi];

    let focal_candidates: Vec<f64> = (-(window.focal_window_mm as i64)
        ..=window.focal_window_mm as i64)
        .map(|delta| focal_length_mm + delta as f64)
        .filter(|f| *f > 0.0)
        .collect();

    let aperture_span = aperture_candidates[aperture_candidates.len() - 1] - aperture_candidates[0];
    let focal_span = match focal_candidates.as_slice() {
        [] => 0.0,
        [first, .., last] => last - first,
        [_] => 0.0,
    };

    let mut candidates = Vec::new();
    let mut combinations_tried = 0usize;

    for &n_try in aperture_candidates {
        for &f_try in &focal_candidates {
            combinations_tried += 1;

            let dof = DepthOfField::compute(
                sensor.pixel_size_um,
                f_try,
                n_try,
                focus_distance_mm,
                criterion,
            )?;
            let covers = dof.near_mm / 10.0 <= requirements.near_limit_cm
                && dof.far.reaches_mm(requirements.far_limit_cm * 10.0);
            if !covers {
                continue;
            }

            // A focal length at or beyond the test distance cannot form an
            // image there; such a candidate is simply infeasible.
            let px = match FaceCoverage::pixels_at(sensor, f_try, face::TEST_DISTANCE_CM) {
                Ok(px) => px,
                Err(_) => continue,
            };
            if px < requirements.required_pixels {
                continue;
            }

            let aperture_deviation = if aperture_span > 0.0 {
                (n_try - f_number).abs() / aperture_span
            } else {
                0.0
            };
            let focal_deviation = if focal_span > 0.0 {
                (f_try - focal_length_mm).abs() / focal_span
            } else {
                0.0
            };

            candidates.push(AdjustmentCandidate {
                f_number: n_try,
                focal_length_mm: f_try,
                aperture_deviation,
                focal_deviation,
            });
        }
    }

    if candidates.is_empty() {
        return Err(PlannerError::NoFeasibleCandidate { combinations_tried });
    }

    let closest_aperture = *candidates
        .iter()
        .min_by(|a, b| {
            a.aperture_deviation
                .total_cmp(&b.aperture_deviation)
                .then(a.focal_deviation.total_cmp(&b.focal_deviation))
        })
        .expect("candidate list is non-empty");
    let closest_focal = *candidates
        .iter()
        .min_by(|a, b| {
            a.focal_deviation
                .total_cmp(&b.focal_deviation)
                .then(a.aperture_deviation.total_cmp(&b.aperture_deviation))
        })
        .expect("candidate list is non-empty");

    Ok(AdjustmentOutcome {
        f_number,
        focal_length_mm,
        candidates,
        closest_aperture,
        closest_focal,
        combinations_tried,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sensor_1080p() -> SensorGeometry {
        SensorGeometry::resolve(1920, 1080, Some(5.37), None).unwrap()
    }

    fn requirements(near: f64, far: f64, px: f64) -> Requirements {
        Requirements {
            near_limit_cm: near,
            far_limit_cm: far,
            required_pixels: px,
        }
    }

    fn window(stops: u32, mm: u32) -> SearchWindow {
        SearchWindow {
            aperture_steps: stops,
            focal_window_mm: mm,
        }
    }

    #[test]
    fn test_feasible_set_around_indoor_setting() {
        let sensor = sensor_1080p();
        let outcome = search(
            &sensor,
            2.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(90.0, 125.0, 80.0),
            &window(1, 2),
        )
        .unwrap();

        // Apertures {1.4, 2.0, 2.8} × focal lengths {4..=8}
        assert_eq!(outcome.combinations_tried, 15);

        let pairs: Vec<(f64, f64)> = outcome
            .candidates
            .iter()
            .map(|c| (c.f_number, c.focal_length_mm))
            .collect();
        assert_eq!(pairs, vec![(2.0, 7.0), (2.8, 7.0), (2.8, 8.0)]);
    }

    #[test]
    fn test_extremal_recommendations() {
        let sensor = sensor_1080p();
        let outcome = search(
            &sensor,
            2.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(90.0, 125.0, 80.0),
            &window(1, 2),
        )
        .unwrap();

        // (2.0, 7) keeps the original aperture
        assert_eq!(outcome.closest_aperture.f_number, 2.0);
        assert_eq!(outcome.closest_aperture.focal_length_mm, 7.0);
        assert_relative_eq!(outcome.closest_aperture.aperture_deviation, 0.0);
        assert_relative_eq!(outcome.closest_aperture.focal_deviation, 0.25);

        // focal deviation ties at 0.25 between (2.0, 7) and (2.8, 7);
        // the smaller aperture deviation wins
        assert_eq!(outcome.closest_focal.f_number, 2.0);
        assert_eq!(outcome.closest_focal.focal_length_mm, 7.0);
    }

    #[test]
    fn test_axis_stepping() {
        let sensor = sensor_1080p();
        let outcome = search(
            &sensor,
            2.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(90.0, 125.0, 80.0),
            &window(1, 2),
        )
        .unwrap();

        assert_eq!(outcome.apertures(), vec![2.0, 2.8]);
        assert_eq!(outcome.focal_lengths(), vec![7.0, 8.0]);

        let at_origin = outcome.step_aperture(0).unwrap();
        assert_eq!(
            (at_origin.f_number, at_origin.focal_length_mm),
            (2.0, 7.0)
        );
        let stepped = outcome.step_aperture(1).unwrap();
        assert_eq!((stepped.f_number, stepped.focal_length_mm), (2.8, 7.0));
        assert!(outcome.step_aperture(2).is_none());
        assert!(outcome.step_aperture(-1).is_none());

        let longer = outcome.step_focal_length(1).unwrap();
        assert_eq!((longer.f_number, longer.focal_length_mm), (2.8, 8.0));
    }

    #[test]
    fn test_empty_tolerance_returns_original_when_feasible() {
        let sensor = sensor_1080p();
        let outcome = search(
            &sensor,
            2.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(80.0, 140.0, 70.0),
            &window(0, 0),
        )
        .unwrap();

        assert_eq!(outcome.candidates.len(), 1);
        let only = &outcome.candidates[0];
        assert_eq!((only.f_number, only.focal_length_mm), (2.0, 6.0));
        assert_relative_eq!(only.aperture_deviation, 0.0);
        assert_relative_eq!(only.focal_deviation, 0.0);
    }

    #[test]
    fn test_empty_tolerance_infeasible_original_reports_no_candidate() {
        let sensor = sensor_1080p();
        let err = search(
            &sensor,
            2.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(90.0, 125.0, 80.0),
            &window(0, 0),
        )
        .unwrap_err();

        assert_eq!(
            err,
            PlannerError::NoFeasibleCandidate {
                combinations_tried: 1
            }
        );
    }

    #[test]
    fn test_window_clamps_at_ladder_edges() {
        let sensor = sensor_1080p();
        // f/1.0 sits at the bottom of the ladder; the window clamps there
        // instead of indexing out of range.
        let result = search(
            &sensor,
            1.0,
            6.0,
            1000.0,
            BlurCriterion::Conservative,
            &requirements(90.0, 130.0, 80.0),
            &window(2, 2),
        );
        if let Ok(outcome) = result {
            assert!(outcome.candidates.iter().all(|c| c.f_number >= 1.0));
        }
    }

    #[test]
    fn test_invalid_current_settings() {
        let sensor = sensor_1080p();
        assert!(matches!(
            search(
                &sensor,
                0.0,
                6.0,
                1000.0,
                BlurCriterion::Conservative,
                &requirements(90.0, 125.0, 80.0),
                &window(1, 1),
            ),
            Err(PlannerError::InvalidAperture { .. })
        ));
        assert!(matches!(
            search(
                &sensor,
                2.0,
                6.0,
                0.0,
                BlurCriterion::Conservative,
                &requirements(90.0, 125.0, 80.0),
                &window(1, 1),
            ),
            Err(PlannerError::InvalidFocusDistance { .. })
        ));
    }
}
