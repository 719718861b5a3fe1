//! Rayon thread pool configuration for fitness evaluation.
//!
//! Use [`WorkerPool::install`] to evaluate a generation with a fixed number
//! of threads, or rely on Rayon's default (all CPU cores).

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// Worker threads used to evaluate candidates.
///
/// Built once per run so that every generation reuses the same threads.
#[derive(Debug)]
pub struct WorkerPool {
    workers: usize,
    pool: Option<ThreadPool>,
}

impl WorkerPool {
    /// Uses all available CPU cores (global Rayon pool).
    pub fn global() -> Self {
        Self {
            workers: 0,
            pool: None,
        }
    }

    /// Uses exactly `n` worker threads. If 0, uses the global Rayon pool.
    pub fn with_workers(n: usize) -> Result<Self> {
        if n == 0 {
            return Ok(Self::global());
        }
        let pool = ThreadPoolBuilder::new().num_threads(n).build()?;
        Ok(Self {
            workers: n,
            pool: Some(pool),
        })
    }

    /// Configured worker count (0 = Rayon default).
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs a closure on this pool. Parallel iterators inside the closure
    /// use the dedicated threads, or the global pool when none was built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_global_pool_runs_inline() {
        let sum = WorkerPool::global().install(|| (1..=10).into_par_iter().sum::<i32>());
        assert_eq!(sum, 55);
    }

    #[test]
    fn test_fixed_pool_thread_count() {
        let pool = WorkerPool::with_workers(2).unwrap();
        assert_eq!(pool.workers(), 2);
        assert_eq!(pool.install(rayon::current_num_threads), 2);
    }

    #[test]
    fn test_zero_workers_is_global() {
        let pool = WorkerPool::with_workers(0).unwrap();
        assert_eq!(pool.workers(), 0);
    }
}
