//! GA run configuration.
//!
//! All tunables are inputs, never constants. Every time quantity is in
//! seconds, including the offset window used both for initial sampling and
//! for mutation.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Genetic scheduler parameters.
///
/// # Example
/// ```
/// use u_attack_schedule::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_window_secs(120)
///     .with_seed(42)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Candidates per generation.
    pub population_size: usize,
    /// Number of generations to run.
    pub max_generations: usize,
    /// Probability that a next-generation slot is filled by crossover.
    pub crossover_rate: f64,
    /// Probability, once per generation, of a single-gene reset mutation.
    pub mutation_rate: f64,
    /// Offset window (s): genes are drawn from `[-window, +window)`.
    pub window_secs: u32,
    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Evaluate candidates of a generation in parallel.
    pub parallel: bool,
    /// Worker threads for parallel evaluation (0 = Rayon default).
    pub workers: usize,
    /// Wall-clock limit (ms). The run stops after the generation in progress.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            window_secs: 300,
            seed: None,
            parallel: true,
            workers: 0,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation count.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-generation mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the offset window (s).
    pub fn with_window_secs(mut self, window_secs: u32) -> Self {
        self.window_secs = window_secs;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the worker thread count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(limit.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Wall-clock limit, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Checks the preconditions of a run.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidState`] for a zero window, an empty
    /// population, zero generations or a probability outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.window_secs == 0 {
            return Err(ScheduleError::invalid_state("offset window is zero"));
        }
        if self.population_size == 0 {
            return Err(ScheduleError::invalid_state("population size is zero"));
        }
        if self.max_generations == 0 {
            return Err(ScheduleError::invalid_state("generation count is zero"));
        }
        for (name, p) in [
            ("crossover rate", self.crossover_rate),
            ("mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ScheduleError::invalid_state(format!(
                    "{name} {p} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Builds the run's RNG from the seed, or from the OS without one.
    pub fn make_rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}
