//! Angular distance estimation: two sightings' corrected angles to two
//! landmark distances via triangle decomposition over the baseline.

use crate::algorithms::geometry::{angle_between, point_distance, rotate_vector};
use crate::core::registry::Perimeter;
use crate::core::types::HeadingContext;
use crate::processing::sighting::Sighting;
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Derive the agent's distance to each of two sighted landmarks from the
/// sightings' corrected angles and the perimeter geometry alone.
///
/// Observation vectors come from rotating the initial-direction vector
/// clockwise by each corrected angle. The reference perpendicular is the
/// winding-order boundary vector between the two landmarks rotated 90°
/// clockwise, which faces away from the agent; each observation's signed
/// angle against it determines the triangle decomposition. The returned pair
/// is attributed to `(a, b)` in argument order.
///
/// Precondition: the two sightings must be supplied in left-to-right camera
/// order. Violating the ordering silently flips which side of the perimeter
/// the agent is assumed to occupy and corrupts the result for non-adjacent
/// landmark pairs; it cannot be validated here because the ordering encodes
/// information only the camera has.
pub fn estimate_distances(
    a: &Sighting,
    b: &Sighting,
    heading: &HeadingContext,
    perimeter: &Perimeter,
) -> LocalizationResult<(f64, f64)> {
    let observation_a = rotate_vector(heading.initial_direction, a.corrected_angle_deg);
    let observation_b = rotate_vector(heading.initial_direction, b.corrected_angle_deg);

    let boundary = perimeter.boundary_vector(&a.landmark, &b.landmark);
    let perpendicular = rotate_vector(boundary, 90.0);

    let angle_a = angle_between(observation_a, perpendicular);
    let angle_b = angle_between(observation_b, perpendicular);

    // Work the wider triangle first; remember the order so the results can be
    // attributed back to the caller's arguments.
    let swapped = angle_a.abs() < angle_b.abs();
    let (first, second) = if swapped {
        (angle_b, angle_a)
    } else {
        (angle_a, angle_b)
    };

    let baseline = point_distance(&a.landmark.position, &b.landmark.position);

    let (d_first, d_second) = if first * second < 0.0 {
        // Opposite signs: the agent projects between the two landmarks, so
        // the baseline splits into two right triangles sharing a height.
        let x = baseline
            / (1.0 + second.abs().to_radians().tan() / first.abs().to_radians().tan());
        let y = baseline - x;
        (
            x / first.abs().to_radians().sin(),
            y / second.abs().to_radians().sin(),
        )
    } else {
        // Same sign: both landmarks lie on the same side, solved via the law
        // of sines over the angle difference.
        let diff = (first.abs() - second.abs()).to_radians();
        if diff.sin() == 0.0 {
            return Err(LocalizationError::DegenerateTriangle {
                angle_a_deg: angle_a,
                angle_b_deg: angle_b,
            });
        }
        (
            baseline * second.to_radians().cos() / diff.sin(),
            baseline * first.to_radians().cos() / diff.sin(),
        )
    };

    Ok(if swapped {
        (d_second, d_first)
    } else {
        (d_first, d_second)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LandmarkRegistry;
    use crate::core::types::{Color, Landmark, SequenceCounter};
    use approx::assert_relative_eq;
    use nalgebra::Vector2;

    fn square_registry() -> LandmarkRegistry {
        let mut registry = LandmarkRegistry::new();
        registry.register(Landmark::new(Color::Red, 0.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Green, 10.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Blue, 10.0, 10.0)).unwrap();
        registry.register(Landmark::new(Color::Yellow, 0.0, 10.0)).unwrap();
        registry
    }

    fn heading() -> HeadingContext {
        // Agent initialised facing the red-green side from inside the square
        HeadingContext::new(Vector2::new(0.0, -1.0), 0.0, 0.0)
    }

    fn sighting(
        registry: &LandmarkRegistry,
        counter: &SequenceCounter,
        color: Color,
        angle_deg: f64,
    ) -> Sighting {
        Sighting::new(color, angle_deg, &heading(), registry, None, counter).unwrap()
    }

    #[test]
    fn test_symmetric_adjacent_pair() {
        // Agent at (5,5): both landmarks of the red-green side at 45° either
        // side of the initial direction, distance 5√2 each
        let registry = square_registry();
        let counter = SequenceCounter::new();
        let red = sighting(&registry, &counter, Color::Red, 45.0);
        let green = sighting(&registry, &counter, Color::Green, -45.0);

        let (d_red, d_green) =
            estimate_distances(&red, &green, &heading(), &registry.perimeter()).unwrap();
        assert_relative_eq!(d_red, 7.071, epsilon = 0.01);
        assert_relative_eq!(d_green, 7.071, epsilon = 0.01);
    }

    #[test]
    fn test_asymmetric_adjacent_pair_keeps_argument_order() {
        // Agent at (3,4): distance 5 to red at the origin and √65 to green,
        // attributed in argument order even though the estimator reorders the
        // triangles internally
        let registry = square_registry();
        let counter = SequenceCounter::new();
        let red = sighting(&registry, &counter, Color::Red, 36.87);
        let green = sighting(&registry, &counter, Color::Green, -60.255);

        let (d_red, d_green) =
            estimate_distances(&red, &green, &heading(), &registry.perimeter()).unwrap();
        assert_relative_eq!(d_red, 5.0, epsilon = 0.01);
        assert_relative_eq!(d_green, 65f64.sqrt(), epsilon = 0.01);
    }

    #[test]
    fn test_diagonal_pair() {
        // Same agent position against the red-blue diagonal
        let registry = square_registry();
        let counter = SequenceCounter::new();
        let red = sighting(&registry, &counter, Color::Red, 36.87);
        let blue = sighting(&registry, &counter, Color::Blue, -130.601);

        let (d_red, d_blue) =
            estimate_distances(&red, &blue, &heading(), &registry.perimeter()).unwrap();
        assert_relative_eq!(d_red, 5.0, epsilon = 0.01);
        assert_relative_eq!(d_blue, 85f64.sqrt(), epsilon = 0.01);
    }

    #[test]
    fn test_same_sign_pair_outside_the_strip() {
        // Agent at (15,5), beyond the green corner: both observation angles
        // fall on the same side of the perpendicular
        let registry = square_registry();
        let counter = SequenceCounter::new();
        // Angles chosen so the rotated initial direction points at each
        // landmark from (15,5)
        let red = sighting(&registry, &counter, Color::Red, 71.565);
        let green = sighting(&registry, &counter, Color::Green, 45.0);

        let (d_red, d_green) =
            estimate_distances(&red, &green, &heading(), &registry.perimeter()).unwrap();
        assert_relative_eq!(d_red, 250f64.sqrt(), epsilon = 0.02);
        assert_relative_eq!(d_green, 50f64.sqrt(), epsilon = 0.02);
    }

    #[test]
    fn test_identical_angles_are_degenerate() {
        let registry = square_registry();
        let counter = SequenceCounter::new();
        let red = sighting(&registry, &counter, Color::Red, 30.0);
        let green = sighting(&registry, &counter, Color::Green, 30.0);

        let result = estimate_distances(&red, &green, &heading(), &registry.perimeter());
        assert!(matches!(
            result,
            Err(LocalizationError::DegenerateTriangle { .. })
        ));
    }
}
