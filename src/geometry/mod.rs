//! Sensor and lens geometry module
//!
//! This module resolves sensor dimensions from partial input and handles
//! the angular and linear field-of-view conversions, plus the
//! optical-format classification of a sensor diagonal.

pub mod distance;
pub mod format;
pub mod fov;
pub mod sensor;

pub use distance::WorkingDistance;
pub use format::FormatMatch;
pub use fov::FieldOfView;
pub use sensor::SensorGeometry;
