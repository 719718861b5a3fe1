//! Committing per-target times back onto actions.
//!
//! Both functions return new `Action` values; the caller's records are
//! never modified.

use std::collections::BTreeMap;

use rand::Rng;

use crate::models::Action;

/// Draws one random flex per target, uniform in `[-window, +window]`, and
/// returns the actions with it applied.
///
/// Every action aimed at the same target gets the same flex. Targets are
/// drawn in sorted ID order so a seeded RNG gives reproducible results.
pub fn assign_flex<R: Rng>(actions: &[Action], flex_window_secs: u32, rng: &mut R) -> Vec<Action> {
    let w = i64::from(flex_window_secs);
    let mut flex: BTreeMap<&str, i64> = actions
        .iter()
        .map(|a| (a.target_id.as_str(), 0))
        .collect();
    for value in flex.values_mut() {
        *value = rng.random_range(-w..=w);
    }

    actions
        .iter()
        .map(|a| {
            let f = flex.get(a.target_id.as_str()).copied().unwrap_or(0);
            a.clone().with_flex(f)
        })
        .collect()
}

/// Returns the actions with the scheduled per-target offsets committed.
///
/// Actions whose target has no entry (e.g. zero-wave actions) keep their
/// current offset.
pub fn apply_offsets(actions: &[Action], offsets: &BTreeMap<String, i64>) -> Vec<Action> {
    actions
        .iter()
        .map(|a| match offsets.get(&a.target_id) {
            Some(&offset) => a.clone().with_offset(offset),
            None => a.clone(),
        })
        .collect()
}
