//! Geometric solvers of the triangulation pipeline.

pub mod circles;
pub mod distance;
pub mod geometry;
pub mod perimeter;

pub use circles::intersect_circles;
pub use distance::estimate_distances;
pub use perimeter::filter_inside;
