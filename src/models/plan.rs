//! Action plan: the complete input of one scheduling run.
//!
//! Bundles actors, targets and actions as supplied by the caller. The plan
//! is read-only for the scheduler; it is snapshotted into compact per-action
//! records before the search starts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Action, Actor, ServerSettings, Target};
use crate::travel::travel_seconds_for;

/// Actors, targets and the actions linking them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    /// Action origins.
    pub actors: Vec<Actor>,
    /// Action destinations.
    pub targets: Vec<Target>,
    /// Planned actions (including zero-wave entries, which are ignored).
    pub actions: Vec<Action>,
}

impl ActionPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor.
    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    /// Adds a target.
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Adds an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Looks up an actor by ID.
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    /// Looks up a target by ID.
    pub fn target(&self, id: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// Actions with at least one wave.
    pub fn planned_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|a| a.is_planned())
    }

    /// Sorted IDs of every target hit by at least one planned action.
    pub fn planned_target_ids(&self) -> Vec<String> {
        self.planned_actions()
            .map(|a| a.target_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Travel time of an action.
    ///
    /// `None` when the actor or target is unknown, or the unit never arrives
    /// (non-positive speed).
    pub fn travel_seconds(&self, action: &Action, settings: &ServerSettings) -> Option<i64> {
        let actor = self.actor(&action.actor_id)?;
        let target = self.target(&action.target_id)?;
        travel_seconds_for(actor, target, action.kind, settings)
    }

    /// Effective send time of an action, when its travel time is defined.
    pub fn send_time(&self, action: &Action, settings: &ServerSettings) -> Option<i64> {
        self.travel_seconds(action, settings)
            .map(|travel| action.send_time(travel))
    }
}
