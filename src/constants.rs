//! Reference constants for optical evaluation
//!
//! This module contains compile-time constants for the photographic
//! formulas: diffraction reference values, face-recognition targets,
//! the standard f-stop ladder, and the optical-format lookup table.
//! None of these are mutated at runtime.

/// Diffraction reference values
pub mod diffraction {
    /// Reference wavelength for the Airy disk, in micrometers (green light)
    pub const WAVELENGTH_UM: f64 = 0.55;

    /// Airy disk diameter factor: d = 2.44 * lambda * N
    pub const AIRY_FACTOR: f64 = 2.44;
}

/// Circle-of-confusion scaling factors applied to the permissible blur
pub mod blur {
    /// Conservative scaling: two pixels of permissible blur
    pub const CONSERVATIVE_FACTOR: f64 = 2.0;

    /// Bayer-pattern corrected scaling: three pixels of permissible blur
    pub const BAYER_FACTOR: f64 = 3.0;
}

/// Face-recognition reference scenario
pub mod face {
    /// Width of the reference object (an average face), in centimeters
    pub const WIDTH_CM: f64 = 18.0;

    /// Canonical pixel count across the reference object for recognition
    pub const TARGET_PIXELS: f64 = 80.0;

    /// Fixed test distance at which pixel density is verified, in centimeters
    pub const TEST_DISTANCE_CM: f64 = 500.0;
}

/// Discrete aperture values used by the adjustment search
pub mod apertures {
    /// Standard full-stop f-number ladder
    pub const F_STOP_LADDER: [f64; 11] = [
        1.0, 1.4, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0, 32.0,
    ];
}

/// Standard optical-format naming table
pub mod formats {
    /// Conversion factor from sensor diagonal (mm) to optical-format inches
    ///
    /// Optical formats descend from vidicon tube sizing, where the usable
    /// image diagonal is roughly 2/3 of the nominal tube diameter.
    pub const DIAGONAL_TO_FORMAT_IN: f64 = 1.5 / 25.4;

    /// 35 mm film equivalent-inches value, computed as
    /// hypot(36, 24) * 1.5 / 25.4 from the full film-frame diagonal
    pub const FULL_FRAME_EQUIV_IN: f64 = 2.555_115_155_840_566;

    /// Ordered lookup table: (label, format value in inches)
    ///
    /// Nearest-value match wins; ties break to the earlier entry.
    pub const TABLE: [(&str, f64); 15] = [
        ("1/4\"", 1.0 / 4.0),
        ("1/3.6\"", 1.0 / 3.6),
        ("1/3.2\"", 1.0 / 3.2),
        ("1/3\"", 1.0 / 3.0),
        ("1/2.7\"", 1.0 / 2.7),
        ("1/2.5\"", 1.0 / 2.5),
        ("1/2.3\"", 1.0 / 2.3),
        ("1/2\"", 1.0 / 2.0),
        ("1/1.8\"", 1.0 / 1.8),
        ("1/1.7\"", 1.0 / 1.7),
        ("2/3\"", 2.0 / 3.0),
        ("1\"", 1.0),
        ("4/3\"", 4.0 / 3.0),
        ("APS-C", 1.674),
        ("35mm film", FULL_FRAME_EQUIV_IN),
    ];
}
