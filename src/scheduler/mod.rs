//! Scheduling entry points and diagnostics.
//!
//! Wraps the GA behind a request/outcome interface and provides helpers to
//! commit results back onto actions.
//!
//! # Flow
//!
//! ```text
//! ActionPlan ──assign_flex──▶ ActionPlan ──OffsetScheduler──▶ offsets
//!                                                              │
//!                       Vec<Action> ◀──────apply_offsets───────┘
//! ```
//!
//! # Report
//!
//! `CadenceReport` lists per player the consecutive send intervals of a
//! schedule and each interval's score.

mod apply;
mod offset;
mod report;

pub use apply::{apply_offsets, assign_flex};
pub use offset::{OffsetScheduler, ScheduleOutcome, ScheduleRequest};
pub use report::{CadenceReport, IntervalEntry, PlayerCadence};
