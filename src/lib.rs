//! Send-time offset optimization for coordinated timed actions.
//!
//! Given actors, targets and the actions linking them, finds a per-target
//! time offset so that each player's consecutive sends are spaced inside an
//! acceptable cadence band: never colliding, never needlessly spread out.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Point`, `Actor`, `Target`, `Action`,
//!   `ActionPlan`, `ServerSettings`
//! - **`travel`**: Travel-time model on the wrapped (toroidal) grid
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling references, speeds)
//! - **`ga`**: Offset chromosome, cadence fitness and the GA runner
//! - **`scheduler`**: Request/outcome interface, committing offsets, diagnostics
//!
//! # Architecture
//!
//! Data flows one way: plan → travel-time snapshot → fitness → GA loop →
//! offset mapping. The core never mutates the caller's records; results are
//! committed by producing new `Action` values.
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"

pub mod error;
pub mod ga;
pub mod models;
pub mod parallel;
pub mod scheduler;
pub mod travel;
pub mod validation;

pub use error::{Result, ScheduleError};
