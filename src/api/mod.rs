//! Public entry point for running localization cycles.

pub mod localizer;

pub use localizer::{Localizer, Observation};
