use thiserror::Error;

use crate::metrics::MetricId;
use crate::reference::Gender;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid landmark set: expected {expected} points, found {found}")]
    InvalidLandmarkSet { expected: usize, found: usize },

    #[error("Invalid gender {0:?}: expected \"male\" or \"female\"")]
    InvalidGender(String),

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("No reference entry for metric {metric} ({gender})")]
    UnknownMetric { metric: MetricId, gender: Gender },

    #[error("Invalid reference table: {0}")]
    InvalidReference(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of [`Error`] for callers deciding what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied data violates the input contract.
    Input,
    /// Landmarks are too degenerate to measure ("could not analyze this photo").
    Geometry,
    /// Reference tables or config are inconsistent. A bug, not a user error.
    Configuration,
    /// Reading a file failed.
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLandmarkSet { .. } | Error::InvalidGender(_) => ErrorKind::Input,
            Error::DegenerateGeometry(_) | Error::DivisionByZero(_) => ErrorKind::Geometry,
            Error::UnknownMetric { .. } | Error::InvalidReference(_) | Error::InvalidConfig(_) => {
                ErrorKind::Configuration
            }
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let err = Error::InvalidLandmarkSet {
            expected: 68,
            found: 67,
        };
        assert_eq!(err.kind(), ErrorKind::Input);
        assert_eq!(
            err.to_string(),
            "Invalid landmark set: expected 68 points, found 67"
        );

        assert_eq!(
            Error::DivisionByZero("ipd".into()).kind(),
            ErrorKind::Geometry
        );
        assert_eq!(
            Error::UnknownMetric {
                metric: MetricId::JawAngle,
                gender: Gender::Female,
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            Error::InvalidConfig("scoring.tolerance_score".into()).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn unknown_metric_message_names_metric_and_gender() {
        let err = Error::UnknownMetric {
            metric: MetricId::NasalIndex,
            gender: Gender::Male,
        };
        assert_eq!(
            err.to_string(),
            "No reference entry for metric nasal_index (male)"
        );
    }
}
