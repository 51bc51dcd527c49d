//! Core data types for the localization pipeline.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// LED color identifying a landmark.
///
/// Colors are the primary key of the registry: a deployment must give every
/// landmark a distinct color for lookups to be unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    White,
}

/// A fixed, uniquely colored reference point in the operating area.
///
/// Immutable once registered. Coordinates are meters in the landmark frame,
/// with the origin at the registered zero-landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Landmark {
    pub color: Color,
    pub position: Point2<f64>,
    /// Whether the landmark sits on the area boundary. Perimeter landmarks,
    /// in registration order, define the containment polygon and the
    /// adjacency used by the distance estimator.
    pub on_perimeter: bool,
    /// Height difference between the camera and the landmark (meters), used
    /// to project slant distances onto the ground plane.
    pub height_offset: f64,
}

impl Landmark {
    /// Create a perimeter landmark at ground level.
    pub fn new(color: Color, x: f64, y: f64) -> Self {
        Self {
            color,
            position: Point2::new(x, y),
            on_perimeter: true,
            height_offset: 0.0,
        }
    }

    /// Set the camera-to-landmark height offset (meters).
    pub fn with_height(mut self, height_offset: f64) -> Self {
        self.height_offset = height_offset;
        self
    }

    /// Mark the landmark as interior rather than on the boundary.
    pub fn off_perimeter(mut self) -> Self {
        self.on_perimeter = false;
        self
    }
}

/// The heading references needed to convert a camera-relative angle into the
/// shared perimeter frame.
///
/// Sighting angles follow the counter-clockwise sign convention of the
/// camera, while the geometry kernel applies rotations clockwise; the
/// conversion happens inside the pipeline, never at this boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingContext {
    /// Unit vector of the agent's direction at initialisation, fixed for the
    /// session.
    pub initial_direction: Vector2<f64>,
    /// Angle between the initial direction and magnetic north (degrees),
    /// measured once at setup.
    pub heading_north_deg: f64,
    /// Angle between the current direction and the initial direction
    /// (degrees), refreshed from the magnetometer each cycle.
    pub heading_to_direction_deg: f64,
}

impl HeadingContext {
    pub fn new(
        initial_direction: Vector2<f64>,
        heading_north_deg: f64,
        heading_to_direction_deg: f64,
    ) -> Self {
        Self {
            initial_direction,
            heading_north_deg,
            heading_to_direction_deg,
        }
    }
}

/// Monotonic id source for sightings.
///
/// Explicit rather than process-global so ordering stays reproducible in
/// tests and callers decide how widely a counter is shared. Ids serve audit
/// and ordering only, never control flow.
#[derive(Debug, Default)]
pub struct SequenceCounter(AtomicU64);

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next sighting id.
    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}
