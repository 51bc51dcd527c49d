//! Landmark-based 2D self-localization.
//!
//! Turns noisy angular sightings of colored landmarks, together with two
//! heading references, into a single consensus position estimate. The
//! pipeline runs angular distance estimation over landmark pairs, intersects
//! the resulting distance circles, prunes candidates outside the landmark
//! perimeter, pools candidates across pair/triple combinations and averages
//! the ones the pool agrees on.

pub mod algorithms;
pub mod api;
pub mod core;
pub mod processing;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use crate::api::localizer::{Localizer, Observation};
pub use crate::core::registry::{LandmarkRegistry, Perimeter};
pub use crate::core::types::{Color, HeadingContext, Landmark, SequenceCounter};
pub use crate::processing::consensus::ConsensusResolver;
pub use crate::processing::sighting::Sighting;
pub use crate::utils::config::{ConfigError, LocalizationConfig};
pub use crate::validation::error::{CircleConfiguration, LocalizationError, LocalizationResult};
