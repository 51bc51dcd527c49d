//! Two-circle intersection via chord-midpoint construction.

use nalgebra::Point2;
use std::cmp::Ordering;

use crate::algorithms::geometry::{point_distance, round_to};
use crate::core::constants::SOLVER_PRECISION;
use crate::validation::error::{CircleConfiguration, LocalizationError, LocalizationResult};

/// Intersect two distance-labeled circles.
///
/// Returns exactly one point for tangency and two points otherwise. Two-point
/// results are ordered by descending angle from `center_a` so output stays
/// deterministic under floating-point ordering noise; coordinates are rounded
/// for stable downstream comparison. The three no-solution configurations
/// surface as [`LocalizationError::NoGeometricSolution`] with their
/// classification.
pub fn intersect_circles(
    center_a: &Point2<f64>,
    radius_a: f64,
    center_b: &Point2<f64>,
    radius_b: f64,
) -> LocalizationResult<Vec<Point2<f64>>> {
    let dx = center_b.x - center_a.x;
    let dy = center_b.y - center_a.y;
    let separation = point_distance(center_a, center_b);

    let no_solution = |configuration| {
        Err(LocalizationError::NoGeometricSolution {
            configuration,
            separation_m: separation,
        })
    };
    if separation > radius_a + radius_b {
        return no_solution(CircleConfiguration::Disjoint);
    }
    if separation < (radius_b - radius_a).abs() {
        return no_solution(CircleConfiguration::Contained);
    }
    if separation == 0.0 && radius_a == radius_b {
        return no_solution(CircleConfiguration::Coincident);
    }

    // Distance from center A to the chord between the intersection points,
    // then half the chord length.
    let chord_distance =
        (radius_a.powi(2) - radius_b.powi(2) + separation.powi(2)) / (2.0 * separation);
    let half_chord = (radius_a.powi(2) - chord_distance.powi(2)).sqrt();
    let midpoint_x = center_a.x + chord_distance * dx / separation;
    let midpoint_y = center_a.y + chord_distance * dy / separation;

    let first = Point2::new(
        round_to(midpoint_x + half_chord * dy / separation, SOLVER_PRECISION),
        round_to(midpoint_y - half_chord * dx / separation, SOLVER_PRECISION),
    );
    let second = Point2::new(
        round_to(midpoint_x - half_chord * dy / separation, SOLVER_PRECISION),
        round_to(midpoint_y + half_chord * dx / separation, SOLVER_PRECISION),
    );

    if separation == radius_a + radius_b || separation == radius_a - radius_b {
        return Ok(vec![first]);
    }

    let angle_from_a = |p: &Point2<f64>| (p.y - center_a.y).atan2(p.x - center_a.x);
    let mut points = vec![first, second];
    points.sort_by(|p, q| {
        angle_from_a(q)
            .partial_cmp(&angle_from_a(p))
            .unwrap_or(Ordering::Equal)
    });
    Ok(points)
}
