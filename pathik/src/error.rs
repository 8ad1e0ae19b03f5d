//! Error types for Pathik

use thiserror::Error;

/// Pathik error type
///
/// Per-tick decision logic never fails; errors only come from building the
/// pipeline (configuration, calibration) or from a frame that does not match
/// the calibrated camera size.
#[derive(Error, Debug)]
pub enum PathikError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frame is {}x{}, rectifier is calibrated for {}x{}", actual.0, actual.1, expected.0, expected.1)]
    FrameSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Calibration points do not define an invertible perspective transform")]
    DegenerateCalibration,
}

impl From<toml::de::Error> for PathikError {
    fn from(e: toml::de::Error) -> Self {
        PathikError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PathikError>;
