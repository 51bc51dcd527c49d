//! Error taxonomy of the localization core.

pub mod error;

pub use error::{CircleConfiguration, LocalizationError, LocalizationResult};
