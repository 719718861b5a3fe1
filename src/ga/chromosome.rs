//! Offset chromosome for send-time scheduling.
//!
//! # Encoding
//!
//! A chromosome assigns one integer offset (s) to every target that has at
//! least one planned action. Genes are stored positionally; the
//! [`GeneLayout`] fixes which target each position stands for. Because every
//! chromosome of a run has exactly `layout.len()` genes, no candidate can
//! miss a target or carry an extra one.
//!
//! Each gene is drawn uniformly from the half-open window `[-window, +window)`.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;

/// Fixed ordering of target IDs over gene positions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneLayout {
    target_ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl GeneLayout {
    /// Creates a layout from target IDs. Duplicates keep their first position.
    pub fn new(target_ids: impl IntoIterator<Item = String>) -> Self {
        let mut ids = Vec::new();
        let mut index = HashMap::new();
        for id in target_ids {
            if !index.contains_key(&id) {
                index.insert(id.clone(), ids.len());
                ids.push(id);
            }
        }
        Self {
            target_ids: ids,
            index,
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.target_ids.len()
    }

    /// Whether there is nothing to schedule.
    pub fn is_empty(&self) -> bool {
        self.target_ids.is_empty()
    }

    /// Gene position of a target.
    pub fn index_of(&self, target_id: &str) -> Option<usize> {
        self.index.get(target_id).copied()
    }

    /// Target ID at a gene position.
    pub fn target_id(&self, gene: usize) -> Option<&str> {
        self.target_ids.get(gene).map(|s| s.as_str())
    }

    /// Target IDs in gene order.
    pub fn target_ids(&self) -> &[String] {
        &self.target_ids
    }
}

/// One candidate schedule: a per-target offset vector.
///
/// Higher fitness = better schedule (maximization convention).
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetChromosome {
    /// Offset (s) per gene position.
    pub genes: Vec<i64>,
    /// Fitness value (higher = better). `-inf` until evaluated.
    pub fitness: f64,
}

impl OffsetChromosome {
    /// Creates an unevaluated chromosome from explicit genes.
    pub fn from_genes(genes: Vec<i64>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Creates a chromosome with every gene sampled from `[-window, +window)`.
    pub fn random<R: Rng>(layout: &GeneLayout, window_secs: u32, rng: &mut R) -> Self {
        let genes = (0..layout.len())
            .map(|_| sample_offset(window_secs, rng))
            .collect();
        Self::from_genes(genes)
    }

    /// Offset assigned to a target.
    pub fn offset_for(&self, layout: &GeneLayout, target_id: &str) -> Option<i64> {
        layout
            .index_of(target_id)
            .and_then(|idx| self.genes.get(idx))
            .copied()
    }

    /// Target ID → offset mapping.
    pub fn to_offsets(&self, layout: &GeneLayout) -> BTreeMap<String, i64> {
        layout
            .target_ids()
            .iter()
            .cloned()
            .zip(self.genes.iter().copied())
            .collect()
    }

    /// Validates gene count and bounds against a layout and window.
    pub fn is_valid(&self, layout: &GeneLayout, window_secs: u32) -> bool {
        let w = i64::from(window_secs);
        self.genes.len() == layout.len() && self.genes.iter().all(|g| (-w..w).contains(g))
    }
}

/// Samples one offset uniformly from `[-window, +window)`.
///
/// A zero window is rejected before the search starts; here it yields 0.
pub fn sample_offset<R: Rng>(window_secs: u32, rng: &mut R) -> i64 {
    let w = i64::from(window_secs);
    if w == 0 {
        return 0;
    }
    rng.random_range(-w..w)
}

// ======================== Crossover operators ========================

/// Single-point crossover over the gene ordering.
///
/// Picks `k` uniformly in `[0, len)`. The child takes genes at positions
/// `< k` from parent 1 and positions `>= k` from parent 2.
pub fn single_point_crossover<R: Rng>(
    p1: &OffsetChromosome,
    p2: &OffsetChromosome,
    rng: &mut R,
) -> OffsetChromosome {
    let len = p1.genes.len().min(p2.genes.len());
    if len == 0 {
        return OffsetChromosome::from_genes(p1.genes.clone());
    }
    let k = rng.random_range(0..len);
    crossover_at(p1, p2, k)
}

/// Crossover at a fixed cut point.
pub fn crossover_at(p1: &OffsetChromosome, p2: &OffsetChromosome, k: usize) -> OffsetChromosome {
    let genes = p1.genes[..k]
        .iter()
        .chain(&p2.genes[k..])
        .copied()
        .collect();
    OffsetChromosome::from_genes(genes)
}

// ======================== Mutation operators ========================

/// Reset mutation: overwrites one random gene with a fresh sample.
///
/// Returns the mutated position and its new value.
pub fn reset_gene_mutation<R: Rng>(
    chromosome: &mut OffsetChromosome,
    window_secs: u32,
    rng: &mut R,
) -> Option<(usize, i64)> {
    if chromosome.genes.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..chromosome.genes.len());
    let value = sample_offset(window_secs, rng);
    chromosome.genes[idx] = value;
    Some((idx, value))
}
