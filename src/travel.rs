//! Travel-time model on a wrapped (toroidal) grid.
//!
//! # Distance
//!
//! Each axis wraps independently, so the per-axis distance is the shorter of
//! the direct and the wrapped-around path:
//!
//! ```text
//! delta = min(|a - b|, side - |a - b|),   side = 2 * server_size + 1
//! distance = sqrt(dx² + dy²)
//! ```
//!
//! # Duration
//!
//! The baseline rate is `base_speed * server_speed * modifier / 3600` grid
//! units per second. With a tier bonus, the first 20 units are traveled at
//! the baseline rate and the remainder at `rate * (1 + 0.2 * tier)`. The
//! summed duration is rounded half-up to whole seconds.
//!
//! The model is directional only through whose modifiers apply: A→B with
//! A's modifiers need not equal B→A with B's modifiers.

use crate::models::{Actor, ActionKind, Point, ServerSettings, Target};

/// Distance (grid units) traveled at the baseline rate before the tier bonus applies.
pub const TIER_BONUS_THRESHOLD: f64 = 20.0;

/// Speed bonus per tier level, as a fraction of the baseline rate.
pub const TIER_BONUS_PER_LEVEL: f64 = 0.2;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Shortest distance between two coordinates on one wrapped axis.
#[inline]
pub fn wrapped_delta(a: i32, b: i32, side: i64) -> i64 {
    let direct = (i64::from(a) - i64::from(b)).abs() % side;
    direct.min(side - direct)
}

/// Euclidean distance between two points on the wrapped grid.
pub fn distance(from: Point, to: Point, server_size: u32) -> f64 {
    let side = 2 * i64::from(server_size) + 1;
    let dx = wrapped_delta(from.x, to.x, side) as f64;
    let dy = wrapped_delta(from.y, to.y, side) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Travel duration in whole seconds.
///
/// # Arguments
/// * `unit_base_speed` - Grid units per hour of the slowest unit.
/// * `server_speed` - World speed multiplier.
/// * `speed_modifier` - Actor speed modifier factor.
/// * `tier_bonus` - Actor tier bonus level.
///
/// A zero distance yields `Some(0)`. Returns `None` when the rate is not
/// positive and finite, since the trip never arrives.
///
/// # Example
/// ```
/// use u_attack_schedule::models::Point;
/// use u_attack_schedule::travel::travel_seconds;
///
/// let secs = travel_seconds(Point::new(0, 0), Point::new(0, 1), 19.0, 1.0, 2.0, 0, 200);
/// assert_eq!(secs, Some(95));
/// ```
pub fn travel_seconds(
    from: Point,
    to: Point,
    unit_base_speed: f64,
    server_speed: f64,
    speed_modifier: f64,
    tier_bonus: u8,
    server_size: u32,
) -> Option<i64> {
    let dist = distance(from, to, server_size);
    if dist == 0.0 {
        return Some(0);
    }

    let rate = unit_base_speed * server_speed * speed_modifier / SECONDS_PER_HOUR;
    if !(rate.is_finite() && rate > 0.0) {
        return None;
    }

    let secs = if dist <= TIER_BONUS_THRESHOLD || tier_bonus == 0 {
        dist / rate
    } else {
        let boosted = rate * (1.0 + TIER_BONUS_PER_LEVEL * f64::from(tier_bonus));
        TIER_BONUS_THRESHOLD / rate + (dist - TIER_BONUS_THRESHOLD) / boosted
    };

    Some(round_half_up(secs))
}

/// Travel duration of an action kind from an actor to a target.
pub fn travel_seconds_for(
    actor: &Actor,
    target: &Target,
    kind: ActionKind,
    settings: &ServerSettings,
) -> Option<i64> {
    travel_seconds(
        actor.position,
        target.position,
        settings.unit_speeds.speed_for(kind),
        settings.speed_multiplier,
        actor.speed_modifier.factor(),
        actor.tier_bonus,
        settings.server_size,
    )
}

#[inline]
fn round_half_up(secs: f64) -> i64 {
    (secs + 0.5).floor() as i64
}
