//! Shared data model: landmarks, heading references, sighting ids.

pub mod constants;
pub mod registry;
pub mod types;

pub use constants::*;
pub use registry::{LandmarkRegistry, Perimeter};
pub use types::{Color, HeadingContext, Landmark, SequenceCounter};
