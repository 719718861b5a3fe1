//! Send-time GA problem definition.
//!
//! Bridges domain models (`ActionPlan`, `ServerSettings`) to the offset
//! chromosome. The plan is snapshotted once into compact [`ActionInfo`]
//! records; fitness is then a pure function of `(chromosome, snapshot)` and
//! never touches the caller's actions.

use std::collections::{BTreeMap, HashMap};

use super::chromosome::{GeneLayout, OffsetChromosome};
use super::fitness::{cadence_score, interval_value};
use crate::error::{Result, ScheduleError};
use crate::models::{ActionPlan, Actor, ServerSettings, Target};
use crate::travel::travel_seconds_for;
use crate::validation::validate_input;

/// Compact action descriptor for GA evaluation.
///
/// Extracted from `Action`/`Actor`/`Target` to avoid cloning full domain
/// objects. Travel time does not depend on the offset, so it is computed
/// once here.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInfo {
    /// Position of the source action in `ActionPlan::actions`.
    pub action_index: usize,
    /// Sending actor.
    pub actor_id: String,
    /// Owning player of the sending actor.
    pub player_id: String,
    /// Receiving target.
    pub target_id: String,
    /// Gene position of the target.
    pub gene: usize,
    /// Wave count (> 0).
    pub waves: u32,
    /// Landing time without the scheduler offset (s).
    pub landing_time: i64,
    /// Travel duration (s).
    pub travel_secs: i64,
}

impl ActionInfo {
    /// Trial send time under a candidate offset for this action's target.
    #[inline]
    pub fn send_time(&self, offset: i64) -> i64 {
        self.landing_time + offset - self.travel_secs
    }
}

/// One send in a player's time-ordered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSend {
    /// Index into [`TimingProblem::actions`].
    pub info: usize,
    /// Trial send time (s).
    pub send_time: i64,
    /// Wave count.
    pub waves: u32,
}

/// GA problem definition for send-time offset optimization.
///
/// Evaluates a chromosome by grouping actions by owning player, sorting
/// each group by trial send time and summing the interval scores of
/// adjacent sends.
///
/// # Example
/// ```
/// use u_attack_schedule::ga::{OffsetChromosome, TimingProblem};
/// use u_attack_schedule::models::{Action, ActionKind, ActionPlan, Actor, Point, ServerSettings, Target};
///
/// let plan = ActionPlan::new()
///     .with_actor(Actor::new("A1", "alice", Point::new(0, 0)))
///     .with_target(Target::new("T1", Point::new(10, 0)))
///     .with_action(Action::new("A1", "T1", ActionKind::Cavalry, 100_000));
/// let problem = TimingProblem::new(&plan, &ServerSettings::default()).unwrap();
/// assert_eq!(problem.layout().len(), 1);
/// assert_eq!(problem.evaluate(&OffsetChromosome::from_genes(vec![0])), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct TimingProblem {
    actions: Vec<ActionInfo>,
    players: BTreeMap<String, Vec<usize>>,
    layout: GeneLayout,
}

impl TimingProblem {
    /// Creates a problem from a plan.
    ///
    /// # Errors
    /// - [`ScheduleError::Validation`] when the plan fails integrity checks.
    /// - [`ScheduleError::InvalidState`] when no action has `waves > 0`.
    pub fn new(plan: &ActionPlan, settings: &ServerSettings) -> Result<Self> {
        validate_input(plan, settings)?;

        let layout = GeneLayout::new(plan.planned_target_ids());
        if layout.is_empty() {
            return Err(ScheduleError::invalid_state(
                "no actions with waves > 0 to schedule",
            ));
        }

        let actors: HashMap<&str, &Actor> =
            plan.actors.iter().map(|a| (a.id.as_str(), a)).collect();
        let targets: HashMap<&str, &Target> =
            plan.targets.iter().map(|t| (t.id.as_str(), t)).collect();

        let mut actions = Vec::new();
        let mut players: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (action_index, action) in plan.actions.iter().enumerate() {
            if !action.is_planned() {
                continue;
            }
            let (Some(actor), Some(target), Some(gene)) = (
                actors.get(action.actor_id.as_str()),
                targets.get(action.target_id.as_str()),
                layout.index_of(&action.target_id),
            ) else {
                return Err(ScheduleError::invalid_state(format!(
                    "action {action_index} references an unknown actor or target"
                )));
            };
            let Some(travel_secs) = travel_seconds_for(actor, target, action.kind, settings) else {
                return Err(ScheduleError::invalid_state(format!(
                    "action {action_index} has no finite travel time"
                )));
            };

            players
                .entry(actor.player_id.clone())
                .or_default()
                .push(actions.len());
            actions.push(ActionInfo {
                action_index,
                actor_id: actor.id.clone(),
                player_id: actor.player_id.clone(),
                target_id: target.id.clone(),
                gene,
                waves: action.waves,
                landing_time: action.pre_offset_landing_time(),
                travel_secs,
            });
        }

        Ok(Self {
            actions,
            players,
            layout,
        })
    }

    /// Gene ordering of this problem.
    pub fn layout(&self) -> &GeneLayout {
        &self.layout
    }

    /// Planned action snapshots.
    pub fn actions(&self) -> &[ActionInfo] {
        &self.actions
    }

    /// Player IDs in sorted order.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.keys().map(|p| p.as_str())
    }

    /// Sends of one player under a chromosome, sorted by trial send time.
    ///
    /// Sends with equal times keep plan order.
    pub fn player_sends(&self, player_id: &str, chromosome: &OffsetChromosome) -> Vec<TrialSend> {
        self.players
            .get(player_id)
            .map(|indices| self.sorted_sends(indices, chromosome))
            .unwrap_or_default()
    }

    /// Fitness of a chromosome (higher = better, never negative).
    ///
    /// One send buffer is reused across players.
    pub fn evaluate(&self, chromosome: &OffsetChromosome) -> f64 {
        let mut sends = Vec::with_capacity(self.actions.len());
        self.players
            .values()
            .map(|indices| {
                self.fill_sorted_sends(indices, chromosome, &mut sends);
                cadence_score(sends.iter().map(|s| (s.send_time, s.waves)))
            })
            .sum()
    }

    /// Per-pair scores of one player's sequence, as `(interval, score)`.
    pub fn player_intervals(
        &self,
        player_id: &str,
        chromosome: &OffsetChromosome,
    ) -> Vec<(i64, f64)> {
        Self::intervals(&self.player_sends(player_id, chromosome))
    }

    /// `(interval, score)` of each adjacent pair of already sorted sends.
    pub fn intervals(sorted_sends: &[TrialSend]) -> Vec<(i64, f64)> {
        sorted_sends
            .windows(2)
            .map(|pair| {
                let interval = pair[1].send_time - pair[0].send_time;
                (interval, interval_value(interval, pair[1].waves))
            })
            .collect()
    }

    fn sorted_sends(&self, indices: &[usize], chromosome: &OffsetChromosome) -> Vec<TrialSend> {
        let mut sends = Vec::with_capacity(indices.len());
        self.fill_sorted_sends(indices, chromosome, &mut sends);
        sends
    }

    fn fill_sorted_sends(
        &self,
        indices: &[usize],
        chromosome: &OffsetChromosome,
        sends: &mut Vec<TrialSend>,
    ) {
        sends.clear();
        sends.extend(indices.iter().map(|&i| {
            let info = &self.actions[i];
            let offset = chromosome.genes.get(info.gene).copied().unwrap_or(0);
            TrialSend {
                info: i,
                send_time: info.send_time(offset),
                waves: info.waves,
            }
        }));
        sends.sort_by_key(|s| s.send_time);
    }
}
