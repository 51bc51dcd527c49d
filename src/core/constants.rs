//! Numeric constants shared across the pipeline.

/// Decimal places kept by the geometry kernel (rotations, angles, distances).
///
/// Rounding here keeps downstream equality comparisons stable across repeated
/// runs of the same cycle.
pub const GEOMETRY_PRECISION: i32 = 3;

/// Decimal places kept by the circle-intersection solver and final estimates.
pub const SOLVER_PRECISION: i32 = 4;

/// Default Euclidean distance under which two candidate points count as the
/// same position (meters).
pub const DEFAULT_EQUALITY_THRESHOLD_M: f64 = 0.1;

/// Default share of the candidate pool a point must agree with to survive
/// consensus (percent).
pub const DEFAULT_FREQUENCY_THRESHOLD_PCT: f64 = 80.0;

/// Minimum number of perimeter landmarks for polygon containment to be
/// meaningful. Deployments conventionally use 4 in a rectangle, but the
/// algorithms are polygon-general.
pub const MIN_PERIMETER_LANDMARKS: usize = 3;
