//! Pair and triple observation fusion: estimator, distance refinement,
//! circle intersection and perimeter filtering, pooled for consensus.

use log::debug;
use nalgebra::Point2;

use crate::algorithms::circles::intersect_circles;
use crate::algorithms::distance::estimate_distances;
use crate::algorithms::perimeter::filter_inside;
use crate::core::registry::Perimeter;
use crate::core::types::HeadingContext;
use crate::processing::sighting::Sighting;
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Candidate positions from a single pair of sightings.
///
/// Runs the angular distance estimator, fuses each sighting's distance in
/// place, intersects the two landmark circles and prunes candidates outside
/// the perimeter. The sightings must be in left-to-right camera order; see
/// [`estimate_distances`].
pub fn solve_pair(
    a: &mut Sighting,
    b: &mut Sighting,
    heading: &HeadingContext,
    perimeter: &Perimeter,
) -> LocalizationResult<Vec<Point2<f64>>> {
    let (estimate_a, estimate_b) = estimate_distances(a, b, heading, perimeter)?;
    a.adjust_distance(estimate_a)?;
    b.adjust_distance(estimate_b)?;

    let radius_a = a
        .distance()
        .ok_or(LocalizationError::IncompleteObservation {
            sequence_id: a.sequence_id,
            color: a.landmark.color,
        })?;
    let radius_b = b
        .distance()
        .ok_or(LocalizationError::IncompleteObservation {
            sequence_id: b.sequence_id,
            color: b.landmark.color,
        })?;

    let candidates = intersect_circles(
        &a.landmark.position,
        radius_a,
        &b.landmark.position,
        radius_b,
    )?;
    let inside = filter_inside(candidates, perimeter);
    debug!(
        "pair ({:?}, {:?}) yielded {} candidate(s) inside the perimeter",
        a.landmark.color,
        b.landmark.color,
        inside.len()
    );
    Ok(inside)
}

/// Pooled candidates from the three unordered pairs of a sighting triple.
///
/// Pooling deliberately keeps duplicates: a point found by several pairs is
/// over-represented, which is exactly the weight the consensus resolver
/// measures. A pair hitting a geometric degeneracy contributes nothing and
/// the remaining pairs carry on; caller mistakes still propagate.
pub fn solve_triple(
    sightings: &mut [Sighting; 3],
    heading: &HeadingContext,
    perimeter: &Perimeter,
) -> LocalizationResult<Vec<Point2<f64>>> {
    let mut pooled = Vec::new();
    for (i, j) in [(0usize, 1usize), (1, 2), (0, 2)] {
        let (left, right) = sightings.split_at_mut(j);
        match solve_pair(&mut left[i], &mut right[0], heading, perimeter) {
            Ok(points) => pooled.extend(points),
            Err(
                error @ (LocalizationError::NoGeometricSolution { .. }
                | LocalizationError::DegenerateTriangle { .. }),
            ) => {
                debug!("pair ({}, {}) contributed no candidates: {}", i, j, error);
            }
            Err(error) => return Err(error),
        }
    }
    Ok(pooled)
}
