//! Depth-of-field module
//!
//! This module computes circle-of-confusion-based depth of field, checks
//! a configuration against recognition requirements, and searches the
//! discrete aperture/focal-length neighborhood for compliant adjustments.

pub mod adjust;
pub mod compliance;
pub mod dof;

pub use adjust::{AdjustmentCandidate, AdjustmentOutcome};
pub use compliance::ComplianceVerdict;
pub use dof::{DepthOfField, Reach};
