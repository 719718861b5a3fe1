//! Send-cadence diagnostics.
//!
//! Lists, per player, every consecutive pair of sends under a schedule with
//! the interval between them and that interval's score. Intended for
//! operator review; it has no effect on the search.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total score | Sum of all interval scores (= fitness) |
//! | Pairs | Number of consecutive send pairs |
//! | Collisions | Pairs with interval <= 0 |
//! | In-band rate | Fraction of pairs scoring exactly 1 |

use serde::Serialize;
use std::fmt;

use crate::ga::{optimal_interval, OffsetChromosome, TimingProblem};

/// One consecutive pair of sends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalEntry {
    /// Actor of the earlier send.
    pub from_actor: String,
    /// Target of the earlier send.
    pub from_target: String,
    /// Actor of the later send.
    pub to_actor: String,
    /// Target of the later send.
    pub to_target: String,
    /// Position of the later send in `ActionPlan::actions`.
    pub action_index: usize,
    /// Send time of the later send (s).
    pub send_time: i64,
    /// Seconds between the two sends.
    pub interval: i64,
    /// Wave count of the later send.
    pub waves: u32,
    /// Optimal interval for `waves` (s).
    pub optimal: i64,
    /// Interval score in `[0, 1]`.
    pub score: f64,
}

/// All intervals of one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCadence {
    /// Player identifier.
    pub player_id: String,
    /// Consecutive pairs in send order.
    pub entries: Vec<IntervalEntry>,
    /// Sum of entry scores.
    pub score: f64,
}

/// Per-player cadence breakdown of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CadenceReport {
    /// Players in sorted order.
    pub players: Vec<PlayerCadence>,
    /// Sum of all interval scores.
    pub total_score: f64,
    /// Number of consecutive pairs.
    pub pairs: usize,
    /// Pairs sent at the same second or in inverted order.
    pub collisions: usize,
    /// Pairs inside the acceptable band.
    pub in_band: usize,
}

impl CadenceReport {
    /// Computes the report for a chromosome.
    pub fn calculate(problem: &TimingProblem, chromosome: &OffsetChromosome) -> Self {
        let actions = problem.actions();
        let mut players = Vec::new();
        let mut pairs = 0;
        let mut collisions = 0;
        let mut in_band = 0;

        for player_id in problem.player_ids() {
            let sends = problem.player_sends(player_id, chromosome);
            let scores = TimingProblem::intervals(&sends);

            let entries: Vec<IntervalEntry> = sends
                .windows(2)
                .zip(scores)
                .map(|(pair, (interval, score))| {
                    let prev = &actions[pair[0].info];
                    let next = &actions[pair[1].info];
                    IntervalEntry {
                        from_actor: prev.actor_id.clone(),
                        from_target: prev.target_id.clone(),
                        to_actor: next.actor_id.clone(),
                        to_target: next.target_id.clone(),
                        action_index: next.action_index,
                        send_time: pair[1].send_time,
                        interval,
                        waves: next.waves,
                        optimal: optimal_interval(next.waves),
                        score,
                    }
                })
                .collect();

            pairs += entries.len();
            collisions += entries.iter().filter(|e| e.interval <= 0).count();
            in_band += entries.iter().filter(|e| e.score == 1.0).count();

            players.push(PlayerCadence {
                player_id: player_id.to_string(),
                score: entries.iter().map(|e| e.score).sum(),
                entries,
            });
        }

        Self {
            total_score: players.iter().map(|p| p.score).sum(),
            players,
            pairs,
            collisions,
            in_band,
        }
    }

    /// Fraction of pairs inside the acceptable band (1.0 when there are none).
    pub fn in_band_rate(&self) -> f64 {
        if self.pairs == 0 {
            1.0
        } else {
            self.in_band as f64 / self.pairs as f64
        }
    }
}

impl fmt::Display for CadenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "score {:.3} over {} pairs ({} in band, {} collisions)",
            self.total_score, self.pairs, self.in_band, self.collisions
        )?;
        for player in &self.players {
            writeln!(f, "{} ({:.3})", player.player_id, player.score)?;
            for e in &player.entries {
                writeln!(
                    f,
                    "  {}->{} then {}->{}: {:>5}s (optimal {}s, {} waves) {:.3}",
                    e.from_actor,
                    e.from_target,
                    e.to_actor,
                    e.to_target,
                    e.interval,
                    e.optimal,
                    e.waves,
                    e.score
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Action, ActionKind, ActionPlan, Actor, Point, ServerSettings, Target,
    };

    /// alice sends three times from the same spot; travel is 0.
    fn make_problem() -> TimingProblem {
        let plan = ActionPlan::new()
            .with_actor(Actor::new("A1", "alice", Point::new(0, 0)))
            .with_actor(Actor::new("B1", "bob", Point::new(9, 9)))
            .with_target(Target::new("T1", Point::new(0, 0)))
            .with_target(Target::new("T2", Point::new(0, 0)))
            .with_target(Target::new("T3", Point::new(0, 0)))
            .with_action(Action::new("A1", "T1", ActionKind::Ram, 1_000).with_waves(2))
            .with_action(Action::new("A1", "T2", ActionKind::Ram, 1_050).with_waves(2))
            .with_action(Action::new("A1", "T3", ActionKind::Ram, 1_050).with_waves(1))
            .with_action(Action::new("B1", "T1", ActionKind::Ram, 1_000).with_waves(1));
        TimingProblem::new(&plan, &ServerSettings::default()).unwrap()
    }

    #[test]
    fn test_report_matches_fitness() {
        let problem = make_problem();
        let ch = OffsetChromosome::from_genes(vec![0, 0, 0]);
        let report = CadenceReport::calculate(&problem, &ch);

        assert_eq!(report.total_score, problem.evaluate(&ch));
        assert_eq!(report.players.len(), 2);
        assert_eq!(report.pairs, 2);
        assert_eq!(report.collisions, 1);
        assert_eq!(report.in_band, 1);
        assert_eq!(report.in_band_rate(), 0.5);
    }

    #[test]
    fn test_entries_in_send_order() {
        let problem = make_problem();
        let ch = OffsetChromosome::from_genes(vec![0, 0, 45]);
        let report = CadenceReport::calculate(&problem, &ch);

        let alice = &report.players[0];
        assert_eq!(alice.player_id, "alice");
        assert_eq!(alice.entries.len(), 2);
        assert_eq!(alice.entries[0].to_target, "T2");
        assert_eq!(alice.entries[0].interval, 50);
        assert_eq!(alice.entries[0].optimal, 50);
        assert_eq!(alice.entries[1].to_target, "T3");
        assert_eq!(alice.entries[1].action_index, 2);
        assert_eq!(alice.entries[1].interval, 45);
        assert_eq!(alice.entries[1].score, 1.0);
        assert_eq!(alice.score, 2.0);

        let bob = &report.players[1];
        assert!(bob.entries.is_empty());
        assert_eq!(bob.score, 0.0);
    }

    #[test]
    fn test_display() {
        let problem = make_problem();
        let ch = OffsetChromosome::from_genes(vec![0, 0, 45]);
        let text = CadenceReport::calculate(&problem, &ch).to_string();
        assert!(text.starts_with("score 2.000 over 2 pairs"));
        assert!(text.contains("alice (2.000)"));
        assert!(text.contains("A1->T2 then A1->T3"));
    }
}
