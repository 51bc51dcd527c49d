//! Typed failure surfaces exposed to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Color;

/// Result type for localization operations.
pub type LocalizationResult<T> = Result<T, LocalizationError>;

/// Relative configuration of two circles that admit no intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircleConfiguration {
    /// Center separation exceeds the sum of the radii.
    Disjoint,
    /// One circle lies entirely within the other.
    Contained,
    /// Coincident centers with equal radii.
    Coincident,
}

/// Error classification for the localization pipeline.
///
/// Input-validation errors are caller mistakes and surface immediately.
/// Geometric-degeneracy errors (`NoGeometricSolution`, `DegenerateTriangle`)
/// are expected occasional outcomes of noisy input; the pooling layer
/// tolerates a pair contributing zero candidates and keeps going.
/// `NoConsensus` is fatal for the cycle and left to the caller, who decides
/// whether to retry on the next sensor cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocalizationError {
    /// No registered landmark carries the requested color.
    LandmarkNotFound { color: Color },
    /// A landmark with this color is already registered.
    DuplicateColor { color: Color },
    /// A sighting reached the circle solver without a fused distance.
    IncompleteObservation { sequence_id: u64, color: Color },
    /// A stored slant distance is shorter than the landmark's height offset,
    /// which no physical measurement can produce.
    ImplausibleDistance {
        color: Color,
        distance_m: f64,
        height_offset_m: f64,
    },
    /// The two sighting circles do not intersect.
    NoGeometricSolution {
        configuration: CircleConfiguration,
        separation_m: f64,
    },
    /// The two observation angles close no triangle over the baseline.
    DegenerateTriangle { angle_a_deg: f64, angle_b_deg: f64 },
    /// No pooled candidate cleared the consensus frequency threshold.
    NoConsensus { pooled: usize },
    /// Malformed per-cycle request.
    InvalidRequest { reason: String },
}

impl fmt::Display for LocalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalizationError::LandmarkNotFound { color } => {
                write!(f, "no registered landmark has color {:?}", color)
            }
            LocalizationError::DuplicateColor { color } => {
                write!(f, "a landmark with color {:?} is already registered", color)
            }
            LocalizationError::IncompleteObservation { sequence_id, color } => {
                write!(
                    f,
                    "sighting {} of the {:?} landmark has no distance after fusion",
                    sequence_id, color
                )
            }
            LocalizationError::ImplausibleDistance {
                color,
                distance_m,
                height_offset_m,
            } => {
                write!(
                    f,
                    "{} m slant distance to the {:?} landmark is shorter than its {} m height offset",
                    distance_m, color, height_offset_m
                )
            }
            LocalizationError::NoGeometricSolution {
                configuration,
                separation_m,
            } => {
                write!(
                    f,
                    "sighting circles do not intersect ({:?} at {} m center separation)",
                    configuration, separation_m
                )
            }
            LocalizationError::DegenerateTriangle {
                angle_a_deg,
                angle_b_deg,
            } => {
                write!(
                    f,
                    "observation angles {}° and {}° close no triangle over the baseline",
                    angle_a_deg, angle_b_deg
                )
            }
            LocalizationError::NoConsensus { pooled } => {
                write!(
                    f,
                    "none of the {} pooled candidates cleared the consensus threshold",
                    pooled
                )
            }
            LocalizationError::InvalidRequest { reason } => {
                write!(f, "invalid localization request: {}", reason)
            }
        }
    }
}

impl std::error::Error for LocalizationError {}
