//! Action (timed send) model.
//!
//! An action sends `waves` repetitions from one actor to one target and must
//! land at a given time. The send time is derived: it is the effective
//! landing time minus the travel time from actor to target.
//!
//! # Time Model
//!
//! All times are whole seconds relative to an epoch chosen by the caller.
//! The effective landing time is the sum of four additive parts:
//! - **Landing**: the base landing time planned for the action
//! - **Flex**: a random per-target spread assigned once before optimization
//! - **Offset**: the per-target shift chosen by the scheduler
//! - **Override**: a manual per-action correction applied by the user

use serde::{Deserialize, Serialize};

/// Classifies an action by the slowest unit it carries.
///
/// The classifier selects the unit base speed used for travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActionKind {
    /// Carries a conquering unit.
    Conquest,
    /// Carries siege engines.
    Siege,
    /// Carries rams.
    Ram,
    /// Foot troops only.
    #[default]
    Infantry,
    /// Mounted troops only.
    Cavalry,
}

/// A single timed action from an actor to a target.
///
/// Immutable input to the scheduler. Committing a schedule produces new
/// `Action` values (see [`crate::scheduler::apply_offsets`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Sending actor identifier.
    pub actor_id: String,
    /// Receiving target identifier.
    pub target_id: String,
    /// Repetition count. Zero means "not planned" and excludes the action.
    #[serde(default = "default_waves")]
    pub waves: u32,
    /// Speed classifier.
    #[serde(default)]
    pub kind: ActionKind,
    /// Base landing time (s).
    pub landing_time: i64,
    /// Per-target random flex (s).
    #[serde(default)]
    pub flex_secs: i64,
    /// Scheduler-assigned per-target offset (s).
    #[serde(default)]
    pub offset_secs: i64,
    /// Manual correction (s).
    #[serde(default)]
    pub override_secs: i64,
}

fn default_waves() -> u32 {
    1
}

impl Action {
    /// Creates an action with a single wave landing at `landing_time`.
    pub fn new(
        actor_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: ActionKind,
        landing_time: i64,
    ) -> Self {
        Self {
            actor_id: actor_id.into(),
            target_id: target_id.into(),
            waves: 1,
            kind,
            landing_time,
            flex_secs: 0,
            offset_secs: 0,
            override_secs: 0,
        }
    }

    /// Sets the wave count.
    pub fn with_waves(mut self, waves: u32) -> Self {
        self.waves = waves;
        self
    }

    /// Sets the per-target flex.
    pub fn with_flex(mut self, flex_secs: i64) -> Self {
        self.flex_secs = flex_secs;
        self
    }

    /// Sets the scheduler offset.
    pub fn with_offset(mut self, offset_secs: i64) -> Self {
        self.offset_secs = offset_secs;
        self
    }

    /// Sets the manual override.
    pub fn with_override(mut self, override_secs: i64) -> Self {
        self.override_secs = override_secs;
        self
    }

    /// Whether this action takes part in scheduling (`waves > 0`).
    #[inline]
    pub fn is_planned(&self) -> bool {
        self.waves > 0
    }

    /// Landing time before the scheduler offset is applied (s).
    #[inline]
    pub fn pre_offset_landing_time(&self) -> i64 {
        self.landing_time + self.flex_secs + self.override_secs
    }

    /// Effective landing time (s).
    #[inline]
    pub fn landing_time(&self) -> i64 {
        self.pre_offset_landing_time() + self.offset_secs
    }

    /// Effective send time given the travel duration (s).
    #[inline]
    pub fn send_time(&self, travel_secs: i64) -> i64 {
        self.landing_time() - travel_secs
    }
}
