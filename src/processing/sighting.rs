//! Per-observation state: one camera sighting of one landmark.

use crate::core::registry::LandmarkRegistry;
use crate::core::types::{Color, HeadingContext, Landmark, SequenceCounter};
use crate::validation::error::{LocalizationError, LocalizationResult};

/// One camera-derived angular (and optionally distance) observation of a
/// landmark.
///
/// Sightings are created fresh each localization cycle, consumed by the
/// estimator/solver pipeline and discarded once the cycle's estimate is
/// produced. The distance is the only mutable field; it is progressively
/// refined in place by [`Sighting::adjust_distance`] and never reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    /// Monotonic id for audit and ordering.
    pub sequence_id: u64,
    /// The landmark this sighting observed.
    pub landmark: Landmark,
    /// Observation angle converted into the perimeter-referenced frame
    /// (degrees): raw camera angle plus both heading offsets.
    pub corrected_angle_deg: f64,
    distance: Option<f64>,
}

impl Sighting {
    /// Build a sighting from a raw camera-relative angle.
    ///
    /// Fails with [`LandmarkNotFound`](crate::LocalizationError::LandmarkNotFound)
    /// when the color has no registered landmark; a sighting is never left
    /// half-constructed.
    pub fn new(
        color: Color,
        raw_angle_deg: f64,
        heading: &HeadingContext,
        registry: &LandmarkRegistry,
        measured_distance: Option<f64>,
        counter: &SequenceCounter,
    ) -> LocalizationResult<Self> {
        let landmark = registry.find_by_color(color)?.clone();
        Ok(Self {
            sequence_id: counter.next_id(),
            landmark,
            corrected_angle_deg: raw_angle_deg
                + heading.heading_to_direction_deg
                + heading.heading_north_deg,
            distance: measured_distance,
        })
    }

    /// The current fused distance estimate, if any (meters).
    pub fn distance(&self) -> Option<f64> {
        self.distance
    }

    /// Fuse a new distance measurement into the sighting.
    ///
    /// With no prior value the measurement is stored directly. Otherwise the
    /// previously stored distance is first corrected for the landmark height
    /// offset (`theta = asin(height / previous)`, projecting the slant range
    /// onto the ground plane) and the two samples are averaged. Repeated
    /// calls keep averaging against the already-corrected value. Returns the
    /// fused distance.
    ///
    /// A stored slant range shorter than the height offset cannot come from
    /// any physical measurement and would push `asin` out of its domain; it
    /// fails with [`ImplausibleDistance`](LocalizationError::ImplausibleDistance)
    /// and leaves the stored distance untouched.
    pub fn adjust_distance(&mut self, new_distance: f64) -> LocalizationResult<f64> {
        let fused = match self.distance {
            None => new_distance,
            Some(previous) => {
                let adjusted_previous = if self.landmark.height_offset == 0.0 {
                    previous
                } else if previous < self.landmark.height_offset {
                    return Err(LocalizationError::ImplausibleDistance {
                        color: self.landmark.color,
                        distance_m: previous,
                        height_offset_m: self.landmark.height_offset,
                    });
                } else {
                    let theta = (self.landmark.height_offset / previous).asin();
                    previous * theta.cos()
                };
                (adjusted_previous + new_distance) / 2.0
            }
        };
        self.distance = Some(fused);
        Ok(fused)
    }
}
