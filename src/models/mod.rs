//! Attack-timing domain models.
//!
//! Provides the input data of a scheduling run. The scheduler treats every
//! type here as read-only: it never mutates a caller's records.
//!
//! # Domain Mappings
//!
//! | u-attack-schedule | Meaning |
//! |-------------------|---------|
//! | Actor | Origin village/base owned by a player |
//! | Target | Destination of one or more actions |
//! | Action | Waves sent from an actor to a target |
//! | ActionPlan | All actors, targets and actions of one run |

mod action;
mod actor;
mod plan;
mod point;
mod settings;
mod target;

pub use action::{Action, ActionKind};
pub use actor::{Actor, SpeedModifier, UnknownSpeedModifier, MAX_TIER_BONUS};
pub use plan::ActionPlan;
pub use point::Point;
pub use settings::{ServerSettings, UnitSpeeds};
pub use target::Target;
