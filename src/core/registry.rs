//! Landmark lookup and the derived boundary polygon.

use nalgebra::{Point2, Vector2};

use crate::core::constants::MIN_PERIMETER_LANDMARKS;
use crate::core::types::{Color, Landmark};
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Ordered collection of registered landmarks.
///
/// Registration order is significant: the perimeter-flagged subset, taken in
/// this order, defines the boundary polygon and the adjacency/winding the
/// angular distance estimator relies on. Landmarks live for the session.
#[derive(Debug, Clone, Default)]
pub struct LandmarkRegistry {
    landmarks: Vec<Landmark>,
}

impl LandmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a landmark, rejecting duplicate colors.
    pub fn register(&mut self, landmark: Landmark) -> LocalizationResult<()> {
        if self.landmarks.iter().any(|l| l.color == landmark.color) {
            return Err(LocalizationError::DuplicateColor {
                color: landmark.color,
            });
        }
        self.landmarks.push(landmark);
        Ok(())
    }

    /// Look up a landmark by its color.
    pub fn find_by_color(&self, color: Color) -> LocalizationResult<&Landmark> {
        self.landmarks
            .iter()
            .find(|l| l.color == color)
            .ok_or(LocalizationError::LandmarkNotFound { color })
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// The boundary polygon view: perimeter-flagged landmarks in
    /// registration order.
    pub fn perimeter(&self) -> Perimeter {
        Perimeter {
            landmarks: self
                .landmarks
                .iter()
                .filter(|l| l.on_perimeter)
                .cloned()
                .collect(),
        }
    }
}

/// The boundary formed by perimeter-flagged landmarks, in registration
/// order. Order encodes both edge adjacency and winding.
#[derive(Debug, Clone)]
pub struct Perimeter {
    landmarks: Vec<Landmark>,
}

impl Perimeter {
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    fn index_of(&self, color: Color) -> Option<usize> {
        self.landmarks.iter().position(|l| l.color == color)
    }

    /// True when the two colors occupy neighbouring perimeter slots,
    /// including the wrap-around edge between the last and first landmark.
    pub fn is_adjacent(&self, a: Color, b: Color) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) if i != j => {
                let gap = i.abs_diff(j);
                gap == 1 || gap == self.landmarks.len() - 1
            }
            _ => false,
        }
    }

    /// Winding-order vector between two perimeter landmarks.
    ///
    /// Adjacent pairs always yield the edge vector in registration order, so
    /// the result is independent of argument order. Non-adjacent pairs yield
    /// `b - a` directly, which is only meaningful when the caller passes the
    /// landmarks in left-to-right camera order.
    pub fn boundary_vector(&self, a: &Landmark, b: &Landmark) -> Vector2<f64> {
        let (i, j) = match (self.index_of(a.color), self.index_of(b.color)) {
            (Some(i), Some(j)) if i != j => (i, j),
            _ => return b.position - a.position,
        };
        let gap = i.abs_diff(j);
        if gap != 1 && gap != self.landmarks.len() - 1 {
            return b.position - a.position;
        }
        // The edge runs from the earlier slot to the later one, except across
        // the wrap-around where it runs from the last slot back to the first.
        let a_comes_first = if gap == 1 { i < j } else { i > j };
        if a_comes_first {
            b.position - a.position
        } else {
            a.position - b.position
        }
    }

    /// Strict point-in-polygon test (even-odd ray casting).
    ///
    /// Points on an edge or vertex do not count as contained; the ray cast
    /// alone is not strict on the boundary, so edges are checked first.
    /// Always false when fewer than three perimeter landmarks are registered.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let n = self.landmarks.len();
        if n < MIN_PERIMETER_LANDMARKS {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let pi = self.landmarks[i].position;
            let pj = self.landmarks[j].position;
            if on_segment(&pj, &pi, point) {
                return false;
            }
            if (pi.y > point.y) != (pj.y > point.y) {
                let x_cross = pj.x + (point.y - pj.y) * (pi.x - pj.x) / (pi.y - pj.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// True when `p` lies on the closed segment from `a` to `b`.
fn on_segment(a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross != 0.0 {
        return false;
    }
    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    dot >= 0.0 && dot <= (b.x - a.x).powi(2) + (b.y - a.y).powi(2)
}
