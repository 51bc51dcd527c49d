//! Majority agreement over pooled candidate positions.

use log::debug;
use nalgebra::Point2;

use crate::algorithms::geometry::round_to;
use crate::core::constants::{
    DEFAULT_EQUALITY_THRESHOLD_M, DEFAULT_FREQUENCY_THRESHOLD_PCT, SOLVER_PRECISION,
};
use crate::utils::config::LocalizationConfig;
use crate::validation::error::{LocalizationError, LocalizationResult};

/// Reduces a pool of candidate positions to a single estimate by majority
/// agreement.
///
/// Two candidates agree when their Euclidean distance is under the equality
/// threshold. A candidate survives when the share of the pool agreeing with
/// it (itself included) reaches the frequency threshold; the estimate is the
/// component-wise mean of the survivors.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusResolver {
    /// Euclidean distance under which two candidates count as the same
    /// position (meters).
    pub equality_threshold_m: f64,
    /// Minimum share of the pool, in percent, a candidate must agree with to
    /// survive.
    pub frequency_threshold_pct: f64,
}

impl Default for ConsensusResolver {
    fn default() -> Self {
        Self {
            equality_threshold_m: DEFAULT_EQUALITY_THRESHOLD_M,
            frequency_threshold_pct: DEFAULT_FREQUENCY_THRESHOLD_PCT,
        }
    }
}

impl ConsensusResolver {
    /// Resolver with the default thresholds (0.1 m, 80%).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with explicit thresholds.
    pub fn with_thresholds(equality_threshold_m: f64, frequency_threshold_pct: f64) -> Self {
        Self {
            equality_threshold_m,
            frequency_threshold_pct,
        }
    }

    /// Resolver tuned from a validated configuration.
    pub fn from_config(config: &LocalizationConfig) -> Self {
        Self {
            equality_threshold_m: config.equality_threshold_m,
            frequency_threshold_pct: config.frequency_threshold_pct,
        }
    }

    /// Resolve the pooled candidates to a single position estimate.
    ///
    /// Fails with [`NoConsensus`](LocalizationError::NoConsensus) when no
    /// candidate reaches the frequency threshold, including for an empty
    /// pool.
    pub fn resolve(&self, pooled: &[Point2<f64>]) -> LocalizationResult<Point2<f64>> {
        let survivors: Vec<&Point2<f64>> = pooled
            .iter()
            .filter(|candidate| {
                let agreeing = pooled
                    .iter()
                    .filter(|other| {
                        nalgebra::distance(*candidate, *other) < self.equality_threshold_m
                    })
                    .count();
                agreeing as f64 / pooled.len() as f64 * 100.0 >= self.frequency_threshold_pct
            })
            .collect();

        if survivors.is_empty() {
            return Err(LocalizationError::NoConsensus {
                pooled: pooled.len(),
            });
        }
        debug!(
            "{} of {} pooled candidate(s) reached {}% agreement",
            survivors.len(),
            pooled.len(),
            self.frequency_threshold_pct
        );

        let count = survivors.len() as f64;
        let (sum_x, sum_y) = survivors
            .iter()
            .fold((0.0, 0.0), |(x, y), point| (x + point.x, y + point.y));
        Ok(Point2::new(
            round_to(sum_x / count, SOLVER_PRECISION),
            round_to(sum_y / count, SOLVER_PRECISION),
        ))
    }
}
