//! Candidate pruning against the boundary polygon.

use nalgebra::Point2;

use crate::core::registry::Perimeter;

/// Keep only the candidates strictly inside the boundary polygon.
///
/// Dropping an outside candidate is the intended filtering behaviour, not an
/// error condition: two-circle intersection regularly produces one mirror
/// point beyond the perimeter.
pub fn filter_inside(points: Vec<Point2<f64>>, perimeter: &Perimeter) -> Vec<Point2<f64>> {
    points
        .into_iter()
        .filter(|point| perimeter.contains(point))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::LandmarkRegistry;
    use crate::core::types::{Color, Landmark};

    fn square_perimeter() -> Perimeter {
        let mut registry = LandmarkRegistry::new();
        registry.register(Landmark::new(Color::Red, 0.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Green, 10.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Blue, 10.0, 10.0)).unwrap();
        registry.register(Landmark::new(Color::Yellow, 0.0, 10.0)).unwrap();
        registry.perimeter()
    }

    #[test]
    fn test_mirror_candidate_is_dropped() {
        // The two intersection points of the radius-7 circles around red and
        // green; only the one with positive y lies inside the square
        let perimeter = square_perimeter();
        let candidates = vec![Point2::new(5.0, 4.899), Point2::new(5.0, -4.899)];
        let inside = filter_inside(candidates, &perimeter);
        assert_eq!(inside, vec![Point2::new(5.0, 4.899)]);
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let inside = filter_inside(Vec::new(), &square_perimeter());
        assert!(inside.is_empty());
    }
}
