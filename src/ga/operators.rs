//! Parent selection for the offset GA.
//!
//! Fitness-proportionate (roulette wheel) selection: each candidate is
//! drawn with probability equal to its share of the total population
//! fitness. Fitness in this problem is never negative, so no shifting is
//! needed; zero-fitness candidates are never selected.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_attack_schedule::ga::operators::RouletteWheel;
//!
//! let wheel = RouletteWheel::new(&[0.0, 2.0, 0.0]).unwrap();
//! let mut rng = SmallRng::seed_from_u64(1);
//! assert_eq!(wheel.spin(&mut rng), 1);
//! assert!(RouletteWheel::new(&[0.0, 0.0]).is_none());
//! ```

use rand::Rng;

/// Cumulative-weight sampler over population indices.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
    total: f64,
}

impl RouletteWheel {
    /// Builds a wheel from per-candidate weights.
    ///
    /// Negative or non-finite weights count as zero. Returns `None` when the
    /// total weight is zero, which leaves nothing to select proportionally.
    pub fn new(weights: &[f64]) -> Option<Self> {
        let mut total = 0.0;
        let cumulative: Vec<f64> = weights
            .iter()
            .map(|&w| {
                if w.is_finite() && w > 0.0 {
                    total += w;
                }
                total
            })
            .collect();

        if total > 0.0 && total.is_finite() {
            Some(Self { cumulative, total })
        } else {
            None
        }
    }

    /// Total weight on the wheel.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Draws one index with probability proportional to its weight.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let spin = rng.random_range(0.0..self.total);
        let idx = self.cumulative.partition_point(|&c| c <= spin);
        idx.min(self.cumulative.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const TOLERANCE: f64 = 0.05;

    #[test]
    fn test_proportional_selection() {
        let wheel = RouletteWheel::new(&[0.1, 0.3, 0.6]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[wheel.spin(&mut rng)] += 1;
        }
        let share = |i: usize| counts[i] as f64 / 10_000.0;
        assert!((share(0) - 0.1).abs() < TOLERANCE);
        assert!((share(1) - 0.3).abs() < TOLERANCE);
        assert!((share(2) - 0.6).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let wheel = RouletteWheel::new(&[0.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..2_000 {
            let idx = wheel.spin(&mut rng);
            assert!(idx == 1 || idx == 3);
        }
    }

    #[test]
    fn test_single_candidate() {
        let wheel = RouletteWheel::new(&[3.5]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(wheel.spin(&mut rng), 0);
        }
        assert_eq!(wheel.total(), 3.5);
    }

    #[test]
    fn test_degenerate_wheels() {
        assert!(RouletteWheel::new(&[]).is_none());
        assert!(RouletteWheel::new(&[0.0, 0.0, 0.0]).is_none());
        assert!(RouletteWheel::new(&[-1.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_negative_weight_ignored() {
        let wheel = RouletteWheel::new(&[-5.0, 2.0]).unwrap();
        assert_eq!(wheel.total(), 2.0);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(wheel.spin(&mut rng), 1);
        }
    }
}
