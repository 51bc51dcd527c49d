//! Cycle-level localization: observations in, one position estimate out.

use nalgebra::Point2;

use crate::core::registry::LandmarkRegistry;
use crate::core::types::{Color, HeadingContext, SequenceCounter};
use crate::processing::consensus::ConsensusResolver;
use crate::processing::fusion::{solve_pair, solve_triple};
use crate::processing::sighting::Sighting;
use crate::utils::config::LocalizationConfig;
use crate::validation::error::{LocalizationError, LocalizationResult};

/// One raw camera observation, as delivered by the detection front end.
///
/// The angle is camera-relative, in degrees, positive to the left of the
/// current direction of travel. A blob-size distance estimate may accompany
/// it and is fused with the angular estimator's output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Color of the sighted landmark.
    pub color: Color,
    /// Camera-relative observation angle (degrees).
    pub angle_deg: f64,
    /// Optional distance measured from the detection itself (meters).
    pub distance_m: Option<f64>,
}

impl Observation {
    /// An angle-only observation.
    pub fn new(color: Color, angle_deg: f64) -> Self {
        Self {
            color,
            angle_deg,
            distance_m: None,
        }
    }

    /// Attach a measured distance to the observation.
    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = Some(distance_m);
        self
    }
}

/// Runs localization cycles against a fixed landmark registry.
///
/// A cycle takes two or three simultaneous observations, supplied in
/// left-to-right camera order, and produces one consensus position estimate.
/// The localizer keeps no per-cycle state beyond the monotonic sequence
/// counter; heading updates between cycles go through
/// [`Localizer::update_heading`].
#[derive(Debug)]
pub struct Localizer {
    registry: LandmarkRegistry,
    heading: HeadingContext,
    resolver: ConsensusResolver,
    sequence: SequenceCounter,
}

impl Localizer {
    /// Localizer with the default consensus thresholds.
    pub fn new(registry: LandmarkRegistry, heading: HeadingContext) -> Self {
        Self {
            registry,
            heading,
            resolver: ConsensusResolver::new(),
            sequence: SequenceCounter::new(),
        }
    }

    /// Localizer with consensus thresholds taken from a configuration.
    pub fn with_config(
        registry: LandmarkRegistry,
        heading: HeadingContext,
        config: &LocalizationConfig,
    ) -> Self {
        Self {
            registry,
            heading,
            resolver: ConsensusResolver::from_config(config),
            sequence: SequenceCounter::new(),
        }
    }

    /// Record a change of travel direction relative to the initial direction
    /// (degrees). Applies to every subsequent cycle.
    pub fn update_heading(&mut self, heading_to_direction_deg: f64) {
        self.heading.heading_to_direction_deg = heading_to_direction_deg;
    }

    /// Run one localization cycle over two or three observations.
    ///
    /// Observations must be in left-to-right camera order. Cycles of any
    /// other size are rejected with
    /// [`InvalidRequest`](LocalizationError::InvalidRequest) before any
    /// sighting is built.
    pub fn locate(&self, observations: &[Observation]) -> LocalizationResult<Point2<f64>> {
        let perimeter = self.registry.perimeter();
        let pooled = match observations {
            [a, b] => {
                let mut first = self.sighting(a)?;
                let mut second = self.sighting(b)?;
                solve_pair(&mut first, &mut second, &self.heading, &perimeter)?
            }
            [a, b, c] => {
                let mut triple = [self.sighting(a)?, self.sighting(b)?, self.sighting(c)?];
                solve_triple(&mut triple, &self.heading, &perimeter)?
            }
            _ => {
                return Err(LocalizationError::InvalidRequest {
                    reason: format!(
                        "expected 2 or 3 observations per cycle, got {}",
                        observations.len()
                    ),
                })
            }
        };
        self.resolver.resolve(&pooled)
    }

    fn sighting(&self, observation: &Observation) -> LocalizationResult<Sighting> {
        Sighting::new(
            observation.color,
            observation.angle_deg,
            &self.heading,
            &self.registry,
            observation.distance_m,
            &self.sequence,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Landmark;
    use approx::assert_relative_eq;
    use nalgebra::Vector2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn square_registry() -> LandmarkRegistry {
        let mut registry = LandmarkRegistry::new();
        registry.register(Landmark::new(Color::Red, 0.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Green, 10.0, 0.0)).unwrap();
        registry.register(Landmark::new(Color::Blue, 10.0, 10.0)).unwrap();
        registry.register(Landmark::new(Color::Yellow, 0.0, 10.0)).unwrap();
        registry
    }

    fn localizer() -> Localizer {
        let heading = HeadingContext::new(Vector2::new(0.0, -1.0), 0.0, 0.0);
        Localizer::new(square_registry(), heading)
    }

    #[test]
    fn test_two_observation_cycle() {
        // Agent at (3,4) sighting the red-green side of the square
        let observations = [
            Observation::new(Color::Red, 36.87),
            Observation::new(Color::Green, -60.255),
        ];
        let estimate = localizer().locate(&observations).unwrap();
        assert_relative_eq!(estimate.x, 3.0, epsilon = 0.02);
        assert_relative_eq!(estimate.y, 4.0, epsilon = 0.02);
    }

    #[test]
    fn test_measured_distance_is_fused_into_the_estimate() {
        let observations = [
            Observation::new(Color::Red, 36.87).with_distance(5.0),
            Observation::new(Color::Green, -60.255),
        ];
        let estimate = localizer().locate(&observations).unwrap();
        assert_relative_eq!(estimate.x, 3.0, epsilon = 0.02);
        assert_relative_eq!(estimate.y, 4.0, epsilon = 0.02);
    }

    #[test]
    fn test_three_observation_cycle_falls_short_of_the_default_threshold() {
        // The square is symmetric across the red-blue diagonal, so that
        // pair's mirror candidate at (4,3) stays inside the perimeter and
        // caps every clustered candidate at 75% agreement
        let observations = [
            Observation::new(Color::Red, 36.87),
            Observation::new(Color::Green, -60.255),
            Observation::new(Color::Blue, -130.601),
        ];
        let result = localizer().locate(&observations);
        assert!(matches!(
            result,
            Err(LocalizationError::NoConsensus { pooled: 4 })
        ));
    }

    #[test]
    fn test_three_observation_cycle_with_a_lowered_threshold() {
        let heading = HeadingContext::new(Vector2::new(0.0, -1.0), 0.0, 0.0);
        let config = LocalizationConfig {
            equality_threshold_m: 0.1,
            frequency_threshold_pct: 75.0,
        };
        let localizer = Localizer::with_config(square_registry(), heading, &config);

        let observations = [
            Observation::new(Color::Red, 36.87),
            Observation::new(Color::Green, -60.255),
            Observation::new(Color::Blue, -130.601),
        ];
        let estimate = localizer.locate(&observations).unwrap();
        assert_relative_eq!(estimate.x, 3.0, epsilon = 0.05);
        assert_relative_eq!(estimate.y, 4.0, epsilon = 0.05);
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let observations = [
            Observation::new(Color::Purple, 30.0),
            Observation::new(Color::Green, -60.0),
        ];
        let result = localizer().locate(&observations);
        assert!(matches!(
            result,
            Err(LocalizationError::LandmarkNotFound {
                color: Color::Purple
            })
        ));
    }

    #[test]
    fn test_wrong_cycle_sizes_are_rejected() {
        let single = [Observation::new(Color::Red, 30.0)];
        match localizer().locate(&single) {
            Err(LocalizationError::InvalidRequest { reason }) => {
                assert_eq!(reason, "expected 2 or 3 observations per cycle, got 1");
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let four = [Observation::new(Color::Red, 30.0); 4];
        assert!(matches!(
            localizer().locate(&four),
            Err(LocalizationError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_degenerate_pair_propagates_from_a_two_observation_cycle() {
        let observations = [
            Observation::new(Color::Red, 30.0),
            Observation::new(Color::Green, 30.0),
        ];
        let result = localizer().locate(&observations);
        assert!(matches!(
            result,
            Err(LocalizationError::DegenerateTriangle { .. })
        ));
    }

    #[test]
    fn test_heading_update_applies_to_subsequent_cycles() {
        // Same agent position as test_two_observation_cycle, but the agent
        // has turned 20° so the camera reports angles shifted by -20°
        let mut localizer = localizer();
        localizer.update_heading(20.0);
        let observations = [
            Observation::new(Color::Red, 16.87),
            Observation::new(Color::Green, -80.255),
        ];
        let estimate = localizer.locate(&observations).unwrap();
        assert_relative_eq!(estimate.x, 3.0, epsilon = 0.02);
        assert_relative_eq!(estimate.y, 4.0, epsilon = 0.02);
    }

    #[test]
    fn test_noisy_angles_stay_within_the_equality_threshold() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.05).unwrap();
        let localizer = localizer();

        for _ in 0..20 {
            let observations = [
                Observation::new(Color::Red, 36.87 + noise.sample(&mut rng)),
                Observation::new(Color::Green, -60.255 + noise.sample(&mut rng)),
            ];
            let estimate = localizer.locate(&observations).unwrap();
            assert_relative_eq!(estimate.x, 3.0, epsilon = 0.1);
            assert_relative_eq!(estimate.y, 4.0, epsilon = 0.1);
        }
    }
}
