//! Send-time offset scheduler.
//!
//! # Algorithm
//!
//! 1. Check the run configuration (window, population, probabilities).
//! 2. Validate the plan and snapshot it into a [`TimingProblem`].
//! 3. Run the GA (see [`crate::ga::GaRunner`]).
//! 4. Return the best-ever candidate as a target → offset mapping, plus a
//!    cadence report for review.
//!
//! The caller applies the mapping with [`super::apply_offsets`]. A poor
//! schedule is a valid outcome, reported through `fitness`, not an error.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::CadenceReport;
use crate::error::Result;
use crate::ga::{CancelToken, GaConfig, GaResult, GaRunner, TimingProblem};
use crate::models::{ActionPlan, ServerSettings};

/// Input container for scheduling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRequest {
    /// Actors, targets and actions.
    pub plan: ActionPlan,
    /// Server-wide travel constants.
    pub settings: ServerSettings,
    /// GA parameters.
    pub config: GaConfig,
}

impl ScheduleRequest {
    /// Creates a request with default settings and configuration.
    pub fn new(plan: ActionPlan) -> Self {
        Self {
            plan,
            ..Self::default()
        }
    }

    /// Parses a JSON request document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets server settings.
    pub fn with_settings(mut self, settings: ServerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the GA configuration.
    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }
}

/// Result of a scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Offset (s) per scheduled target.
    pub offsets: BTreeMap<String, i64>,
    /// Fitness of the chosen offsets.
    pub fitness: f64,
    /// Generations evaluated.
    pub generations: usize,
    /// Best-ever fitness after each generation.
    pub history: Vec<f64>,
    /// Whether the run was cut short.
    pub cancelled: bool,
    /// Wall-clock duration of the search.
    pub elapsed: Duration,
    /// Per-player interval breakdown of the chosen offsets.
    pub report: CadenceReport,
}

/// Optimizes per-target send offsets for an action plan.
///
/// # Example
///
/// ```
/// use u_attack_schedule::ga::GaConfig;
/// use u_attack_schedule::models::{Action, ActionKind, ActionPlan, Actor, Point, Target};
/// use u_attack_schedule::scheduler::{apply_offsets, OffsetScheduler, ScheduleRequest};
///
/// let plan = ActionPlan::new()
///     .with_actor(Actor::new("A1", "alice", Point::new(0, 0)))
///     .with_target(Target::new("T1", Point::new(4, 0)))
///     .with_target(Target::new("T2", Point::new(0, 4)))
///     .with_action(Action::new("A1", "T1", ActionKind::Cavalry, 80_000).with_waves(2))
///     .with_action(Action::new("A1", "T2", ActionKind::Cavalry, 80_000).with_waves(2));
/// let request = ScheduleRequest::new(plan.clone())
///     .with_config(GaConfig::default().with_max_generations(20).with_seed(1));
///
/// let outcome = OffsetScheduler::new().schedule(&request).unwrap();
/// assert_eq!(outcome.offsets.len(), 2);
/// let committed = apply_offsets(&plan.actions, &outcome.offsets);
/// assert_eq!(committed[0].offset_secs, outcome.offsets["T1"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OffsetScheduler {
    cancel: CancelToken,
}

impl OffsetScheduler {
    /// Creates a scheduler with its own cancel token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an externally owned cancel token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Handle for cancelling a run from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Schedules with the RNG built from the request's configuration.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome> {
        self.schedule_with_progress(request, |_, _, _| {})
    }

    /// Schedules under an externally owned cancel token.
    ///
    /// On cancellation the best candidate found so far is returned with
    /// `cancelled` set.
    pub fn schedule_with_cancel(
        &self,
        request: &ScheduleRequest,
        cancel: &CancelToken,
    ) -> Result<ScheduleOutcome> {
        self.clone()
            .with_cancel_token(cancel.clone())
            .schedule(request)
    }

    /// Schedules, reporting `(generation, max_generations, best_fitness)`.
    pub fn schedule_with_progress<F>(
        &self,
        request: &ScheduleRequest,
        on_progress: F,
    ) -> Result<ScheduleOutcome>
    where
        F: FnMut(usize, usize, f64),
    {
        let mut rng = request.config.make_rng();
        self.schedule_with_rng(request, &mut rng, on_progress)
    }

    /// Schedules with an injected random source.
    ///
    /// # Errors
    /// - `InvalidState` for a zero window or no action with `waves > 0`.
    /// - `Validation` when the plan fails integrity checks.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            actors = request.plan.actors.len(),
            targets = request.plan.targets.len(),
            actions = request.plan.actions.len()
        )
    )]
    pub fn schedule_with_rng<R, F>(
        &self,
        request: &ScheduleRequest,
        rng: &mut R,
        on_progress: F,
    ) -> Result<ScheduleOutcome>
    where
        R: Rng,
        F: FnMut(usize, usize, f64),
    {
        request.config.validate()?;
        let problem = TimingProblem::new(&request.plan, &request.settings)?;
        tracing::info!(
            genes = problem.layout().len(),
            planned_actions = problem.actions().len(),
            window_secs = request.config.window_secs,
            "Scheduling request accepted"
        );

        let result = GaRunner::run_with_rng(&problem, &request.config, rng, &self.cancel, on_progress)?;
        Ok(Self::outcome(&problem, result))
    }

    fn outcome(problem: &TimingProblem, result: GaResult) -> ScheduleOutcome {
        ScheduleOutcome {
            offsets: result.best.to_offsets(problem.layout()),
            report: CadenceReport::calculate(problem, &result.best),
            fitness: result.best_fitness,
            generations: result.generations,
            history: result.history,
            cancelled: result.cancelled,
            elapsed: result.elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::models::{Action, ActionKind, Actor, Point, SpeedModifier, Target};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    fn make_plan() -> ActionPlan {
        let mut plan = ActionPlan::new()
            .with_actor(
                Actor::new("A1", "alice", Point::new(0, 0))
                    .with_speed_modifier(SpeedModifier::Double)
                    .with_tier_bonus(5),
            )
            .with_actor(Actor::new("A2", "alice", Point::new(-30, 12)))
            .with_actor(Actor::new("B1", "bob", Point::new(150, -190)));
        for (i, (x, y)) in [(10, 10), (-40, 25), (190, 190), (-199, -3)].into_iter().enumerate() {
            plan = plan.with_target(Target::new(format!("T{i}"), Point::new(x, y)));
        }
        plan.with_action(Action::new("A1", "T0", ActionKind::Siege, 500_000).with_waves(3))
            .with_action(Action::new("A1", "T1", ActionKind::Ram, 500_000).with_waves(2))
            .with_action(Action::new("A2", "T2", ActionKind::Conquest, 500_000).with_waves(1))
            .with_action(Action::new("A2", "T0", ActionKind::Infantry, 500_000).with_waves(4))
            .with_action(Action::new("B1", "T2", ActionKind::Cavalry, 500_000).with_waves(2))
            .with_action(Action::new("B1", "T3", ActionKind::Cavalry, 500_000).with_waves(0))
    }

    fn make_request() -> ScheduleRequest {
        make_request_for(make_plan())
    }

    fn make_request_for(plan: ActionPlan) -> ScheduleRequest {
        ScheduleRequest::new(plan).with_config(
            GaConfig::default()
                .with_population_size(40)
                .with_max_generations(25)
                .with_window_secs(600)
                .with_seed(42)
                .with_parallel(false),
        )
    }

    #[test]
    fn test_offsets_cover_planned_targets() {
        let outcome = OffsetScheduler::new().schedule(&make_request()).unwrap();
        let keys: BTreeSet<&str> = outcome.offsets.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, BTreeSet::from(["T0", "T1", "T2"]));
        assert!(outcome.offsets.values().all(|o| (-600..600).contains(o)));
        assert_eq!(outcome.generations, 25);
    }

    #[test]
    fn test_report_matches_fitness() {
        let outcome = OffsetScheduler::new().schedule(&make_request()).unwrap();
        assert_eq!(outcome.report.total_score, outcome.fitness);
        assert_eq!(outcome.history.last().copied(), Some(outcome.fitness));
    }

    #[test]
    fn test_seeded_schedule_reproducible() {
        let a = OffsetScheduler::new().schedule(&make_request()).unwrap();
        let b = OffsetScheduler::new().schedule(&make_request()).unwrap();
        assert_eq!(a.offsets, b.offsets);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_injected_rng() {
        let request = make_request();
        let scheduler = OffsetScheduler::new();
        let a = scheduler
            .schedule_with_rng(&request, &mut SmallRng::seed_from_u64(9), |_, _, _| {})
            .unwrap();
        let b = scheduler
            .schedule_with_rng(&request, &mut SmallRng::seed_from_u64(9), |_, _, _| {})
            .unwrap();
        assert_eq!(a.offsets, b.offsets);
    }

    #[test]
    fn test_no_planned_actions_is_invalid_state() {
        let plan = ActionPlan::new()
            .with_actor(Actor::new("A1", "alice", Point::new(0, 0)))
            .with_target(Target::new("T1", Point::new(1, 0)))
            .with_action(Action::new("A1", "T1", ActionKind::Ram, 100).with_waves(0));
        let err = OffsetScheduler::new()
            .schedule(&ScheduleRequest::new(plan))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidState(_)));
    }

    #[test]
    fn test_only_stale_zero_wave_actions_is_invalid_state() {
        let plan = ActionPlan::new()
            .with_target(Target::new("T1", Point::new(1, 0)))
            .with_action(Action::new("gone", "T1", ActionKind::Ram, 100).with_waves(0));
        let err = OffsetScheduler::new()
            .schedule(&ScheduleRequest::new(plan))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidState(_)));
    }

    #[test]
    fn test_stale_zero_wave_action_does_not_block_run() {
        let plan = make_plan().with_action(Action::new("A1", "Tgone", ActionKind::Ram, 0).with_waves(0));
        let outcome = OffsetScheduler::new()
            .schedule(&make_request_for(plan))
            .unwrap();
        assert!(!outcome.offsets.contains_key("Tgone"));
        assert_eq!(outcome.offsets.len(), 3);
    }

    #[test]
    fn test_zero_window_is_invalid_state() {
        let request = make_request().with_config(GaConfig::default().with_window_secs(0));
        let err = OffsetScheduler::new().schedule(&request).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidState(_)));
    }

    #[test]
    fn test_invalid_plan_is_validation_error() {
        let plan = make_plan().with_action(Action::new("A9", "T0", ActionKind::Ram, 0));
        let err = OffsetScheduler::new()
            .schedule(&ScheduleRequest::new(plan))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Validation(_)));
    }

    #[test]
    fn test_cancelled_run_returns_outcome() {
        let scheduler = OffsetScheduler::new();
        scheduler.cancel_token().cancel();
        let outcome = scheduler.schedule(&make_request()).unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.generations, 1);
        assert_eq!(outcome.offsets.len(), 3);
    }

    #[test]
    fn test_schedule_with_external_cancel() {
        let token = CancelToken::new();
        token.cancel();
        let scheduler = OffsetScheduler::new();
        let outcome = scheduler
            .schedule_with_cancel(&make_request(), &token)
            .unwrap();
        assert!(outcome.cancelled);
        assert_eq!(outcome.generations, 1);
        // The scheduler's own token is untouched.
        assert!(!scheduler.cancel_token().is_cancelled());
    }

    #[test]
    fn test_plan_is_not_mutated() {
        let request = make_request();
        let before = request.plan.clone();
        OffsetScheduler::new().schedule(&request).unwrap();
        assert_eq!(request.plan, before);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "plan": {
                "actors": [{"id": "A1", "player_id": "p", "position": {"x": 0, "y": 0},
                            "speed_modifier": "Double"}],
                "targets": [{"id": "T1", "position": {"x": 0, "y": 1}}],
                "actions": [{"actor_id": "A1", "target_id": "T1", "kind": "Cavalry",
                             "landing_time": 1000}]
            },
            "config": {"population_size": 5, "max_generations": 3, "seed": 1, "parallel": false}
        }"#;
        let request = ScheduleRequest::from_json(json).unwrap();
        assert_eq!(request.plan.actors[0].speed_modifier, SpeedModifier::Double);
        assert_eq!(request.plan.actors[0].tier_bonus, 0);
        assert_eq!(request.plan.actions[0].waves, 1);
        assert!(request.plan.targets[0].attributes.is_empty());
        assert_eq!(request.settings, ServerSettings::default());
        assert_eq!(
            request.plan.send_time(&request.plan.actions[0], &request.settings),
            Some(1000 - 95)
        );

        let outcome = OffsetScheduler::new().schedule(&request).unwrap();
        assert_eq!(outcome.generations, 3);
        // A single send has no pairs to score.
        assert_eq!(outcome.fitness, 0.0);
    }
}
