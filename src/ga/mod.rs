//! GA-based send-time optimization.
//!
//! Searches per-target time offsets that make every player's consecutive
//! sends land in the acceptable cadence band.
//!
//! # Encoding
//!
//! One integer gene (offset in seconds) per scheduled target, in a fixed
//! [`GeneLayout`] order. Genes are bounded by `[-window, +window)`.
//!
//! # Submodules
//!
//! - [`operators`]: Fitness-proportionate parent selection
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning", Ch. 3

mod chromosome;
mod config;
mod fitness;
pub mod operators;
mod problem;
mod runner;

pub use chromosome::{
    crossover_at, reset_gene_mutation, sample_offset, single_point_crossover, GeneLayout,
    OffsetChromosome,
};
pub use config::GaConfig;
pub use fitness::{
    cadence_score, interval_value, optimal_interval, LOOSE_TOLERANCE_SECS, OPTIMAL_BASE_SECS,
    OPTIMAL_SECS_PER_WAVE, TIGHT_TOLERANCE_SECS,
};
pub use problem::{ActionInfo, TimingProblem, TrialSend};
pub use runner::{CancelToken, GaResult, GaRunner};
