//! Generational GA loop.
//!
//! # Algorithm
//!
//! ```text
//! INIT → (EVALUATE → SELECT/REPRODUCE → MUTATE) × generations → DONE
//! ```
//!
//! 1. **Init**: `population_size` chromosomes, genes uniform in `[-w, +w)`.
//! 2. **Evaluate**: fitness of every candidate (in parallel), then a barrier.
//!    The best-ever candidate is replaced only on a strictly greater fitness.
//! 3. **Reproduce**: roulette wheel over the generation. Each slot is a
//!    single-point crossover child with probability `crossover_rate`, or an
//!    unchanged copy of one drawn parent. If the total fitness is zero the
//!    generation carries over unchanged.
//! 4. **Mutate**: once per generation, with probability `mutation_rate`, one
//!    gene of one random old candidate is resampled. The edit reaches every
//!    next-generation slot that copied that candidate unchanged; crossover
//!    children are unaffected.
//!
//! The result is the best candidate seen during the whole run, which need
//! not be a member of the final population.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use rayon::prelude::*;
use tracing::instrument;

use super::chromosome::{sample_offset, single_point_crossover, GeneLayout, OffsetChromosome};
use super::config::GaConfig;
use super::operators::RouletteWheel;
use super::problem::TimingProblem;
use crate::error::{Result, ScheduleError};
use crate::parallel::WorkerPool;

/// Cooperative cancellation flag shared with a caller.
///
/// The runner checks it after each generation and returns the best
/// candidate found so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best candidate seen during the run.
    pub best: OffsetChromosome,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Generations evaluated.
    pub generations: usize,
    /// Best-ever fitness after each generation (non-decreasing).
    pub history: Vec<f64>,
    /// Whether the run stopped early (cancel token or time limit).
    pub cancelled: bool,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Runs the offset GA on a [`TimingProblem`].
///
/// # Example
/// ```
/// use u_attack_schedule::ga::{GaConfig, GaRunner, TimingProblem};
/// use u_attack_schedule::models::{Action, ActionKind, ActionPlan, Actor, Point, ServerSettings, Target};
///
/// let plan = ActionPlan::new()
///     .with_actor(Actor::new("A1", "alice", Point::new(0, 0)))
///     .with_target(Target::new("T1", Point::new(3, 0)))
///     .with_target(Target::new("T2", Point::new(0, 3)))
///     .with_action(Action::new("A1", "T1", ActionKind::Cavalry, 50_000))
///     .with_action(Action::new("A1", "T2", ActionKind::Cavalry, 50_000));
/// let problem = TimingProblem::new(&plan, &ServerSettings::default()).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(20)
///     .with_seed(42);
///
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best.genes.len(), 2);
/// assert_eq!(result.history.len(), 20);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs to completion with the RNG built from `config`.
    pub fn run(problem: &TimingProblem, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_progress(problem, config, &CancelToken::new(), |_, _, _| {})
    }

    /// Runs with a cancel token and a progress callback
    /// `(generation, max_generations, best_fitness)`.
    pub fn run_with_progress<F>(
        problem: &TimingProblem,
        config: &GaConfig,
        cancel: &CancelToken,
        on_progress: F,
    ) -> Result<GaResult>
    where
        F: FnMut(usize, usize, f64),
    {
        let mut rng = config.make_rng();
        Self::run_with_rng(problem, config, &mut rng, cancel, on_progress)
    }

    /// Runs with an injected random source.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            genes = problem.layout().len(),
            population = config.population_size,
            generations = config.max_generations
        )
    )]
    pub fn run_with_rng<R, F>(
        problem: &TimingProblem,
        config: &GaConfig,
        rng: &mut R,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<GaResult>
    where
        R: Rng,
        F: FnMut(usize, usize, f64),
    {
        config.validate()?;
        let layout = problem.layout();
        if layout.is_empty() {
            return Err(ScheduleError::invalid_state("no targets to schedule"));
        }

        let pool = if config.parallel {
            WorkerPool::with_workers(config.workers)?
        } else {
            WorkerPool::global()
        };
        tracing::debug!(
            parallel = config.parallel,
            workers = pool.workers(),
            "Evaluation pool ready"
        );
        let started = Instant::now();
        let deadline = config.time_limit().map(|limit| started + limit);

        let mut population: Vec<OffsetChromosome> = (0..config.population_size)
            .map(|_| OffsetChromosome::random(layout, config.window_secs, rng))
            .collect();

        let mut best: Option<OffsetChromosome> = None;
        let mut history = Vec::with_capacity(config.max_generations);
        let mut cancelled = false;

        for generation in 0..config.max_generations {
            let fitness = Self::evaluate(problem, &population, config.parallel, &pool);
            for (candidate, &f) in population.iter_mut().zip(&fitness) {
                candidate.fitness = f;
            }

            if let Some(gen_best) = Self::fittest(&population) {
                let improved = match &best {
                    Some(b) => gen_best.fitness > b.fitness,
                    None => true,
                };
                if improved {
                    best = Some(gen_best.clone());
                }
            }
            let best_fitness = best.as_ref().map_or(0.0, |b| b.fitness);
            history.push(best_fitness);

            tracing::debug!(
                generation,
                best_fitness,
                total_fitness = fitness.iter().sum::<f64>(),
                "Generation evaluated"
            );
            on_progress(generation + 1, config.max_generations, best_fitness);

            if cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d) {
                cancelled = generation + 1 < config.max_generations;
                break;
            }
            if generation + 1 < config.max_generations {
                population = Self::next_generation(layout, config, &population, rng);
            }
        }

        let best = best.ok_or_else(|| ScheduleError::invalid_state("no generation evaluated"))?;
        let result = GaResult {
            best_fitness: best.fitness,
            best,
            generations: history.len(),
            history,
            cancelled,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            best_fitness = result.best_fitness,
            generations = result.generations,
            cancelled = result.cancelled,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "GA run finished"
        );
        Ok(result)
    }

    /// Fitness of every candidate. Candidates are independent, so the
    /// parallel path only needs the barrier implied by `collect`.
    fn evaluate(
        problem: &TimingProblem,
        population: &[OffsetChromosome],
        parallel: bool,
        pool: &WorkerPool,
    ) -> Vec<f64> {
        if parallel {
            pool.install(|| population.par_iter().map(|c| problem.evaluate(c)).collect())
        } else {
            population.iter().map(|c| problem.evaluate(c)).collect()
        }
    }

    /// First candidate with the highest fitness.
    fn fittest(population: &[OffsetChromosome]) -> Option<&OffsetChromosome> {
        population.iter().fold(None, |acc: Option<&OffsetChromosome>, c| match acc {
            Some(b) if b.fitness >= c.fitness => Some(b),
            _ => Some(c),
        })
    }

    /// Builds the next generation from an evaluated one, then applies the
    /// generation-scoped mutation.
    fn next_generation<R: Rng>(
        layout: &GeneLayout,
        config: &GaConfig,
        old: &[OffsetChromosome],
        rng: &mut R,
    ) -> Vec<OffsetChromosome> {
        let weights: Vec<f64> = old.iter().map(|c| c.fitness).collect();

        // copied_from[i] = Some(parent) when slot i is an unchanged copy.
        let (mut next, copied_from): (Vec<OffsetChromosome>, Vec<Option<usize>>) =
            match RouletteWheel::new(&weights) {
                None => (old.to_vec(), (0..old.len()).map(Some).collect()),
                Some(wheel) => (0..config.population_size)
                    .map(|_| {
                        if rng.random_bool(config.crossover_rate) {
                            let p1 = wheel.spin(rng);
                            let p2 = wheel.spin(rng);
                            (single_point_crossover(&old[p1], &old[p2], rng), None)
                        } else {
                            let p = wheel.spin(rng);
                            (old[p].clone(), Some(p))
                        }
                    })
                    .unzip(),
            };

        if rng.random_bool(config.mutation_rate) {
            let victim = rng.random_range(0..old.len());
            let gene = rng.random_range(0..layout.len());
            let value = sample_offset(config.window_secs, rng);
            let touched = Self::mutate_copies(&mut next, &copied_from, victim, gene, value);
            tracing::trace!(
                victim,
                target_id = layout.target_id(gene).unwrap_or_default(),
                value,
                touched,
                "Mutation applied"
            );
        }

        next
    }

    /// Writes a mutated gene of old candidate `victim` into every slot that
    /// copied it unchanged. Crossover children are left alone.
    ///
    /// Returns the number of slots touched.
    fn mutate_copies(
        next: &mut [OffsetChromosome],
        copied_from: &[Option<usize>],
        victim: usize,
        gene: usize,
        value: i64,
    ) -> usize {
        let mut touched = 0;
        for (slot, origin) in next.iter_mut().zip(copied_from) {
            if *origin == Some(victim) {
                slot.genes[gene] = value;
                touched += 1;
            }
        }
        touched
    }
}
