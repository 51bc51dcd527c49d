//! Rotation and angle primitives used by every solver above them.

use nalgebra::{Point2, Vector2};

use crate::core::constants::GEOMETRY_PRECISION;

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Rotate a 2D vector clockwise by `angle_deg` degrees.
///
/// Sighting angles follow a counter-clockwise sign convention while this
/// rotation applies clockwise; callers must not conflate the two. Components
/// are rounded so repeated runs produce byte-stable results for downstream
/// equality checks.
pub fn rotate_vector(v: Vector2<f64>, angle_deg: f64) -> Vector2<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vector2::new(
        round_to(v.x * cos + v.y * sin, GEOMETRY_PRECISION),
        round_to(v.y * cos - v.x * sin, GEOMETRY_PRECISION),
    )
}

/// Signed angle from `a` to `b` in degrees, via the `atan2` difference.
///
/// The result is not wrapped beyond what the `atan2` difference naturally
/// yields, so composed values can fall outside ±180°.
pub fn angle_between(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let angle = b.y.atan2(b.x) - a.y.atan2(a.x);
    round_to(angle.to_degrees(), GEOMETRY_PRECISION)
}

/// Counter-clockwise 45° frame-alignment offset, wrapped into (−180, 180].
///
/// Applies to scalar angles only; vectors go through [`rotate_vector`].
pub fn rotate_angle(alpha: f64) -> f64 {
    if alpha + 45.0 > 180.0 {
        alpha - 360.0 + 45.0
    } else {
        alpha + 45.0
    }
}

/// Euclidean distance between two points, rounded like the other kernel
/// outputs.
pub fn point_distance(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    round_to(nalgebra::distance(a, b), GEOMETRY_PRECISION)
}
