//! Per-cycle observation pipeline: sighting state, pair/triple fusion and
//! consensus resolution.

pub mod consensus;
pub mod fusion;
pub mod sighting;

pub use consensus::ConsensusResolver;
pub use fusion::{solve_pair, solve_triple};
pub use sighting::Sighting;
