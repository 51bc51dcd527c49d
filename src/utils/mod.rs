//! Shared utilities: runtime configuration.

pub mod config;

pub use config::{ConfigError, LocalizationConfig};
