//! Send-cadence scoring.
//!
//! Consecutive sends of one player should be spaced close to an optimal
//! interval that grows with the wave count of the later send:
//!
//! ```text
//! optimal(waves) = 40 + 5 * waves
//! diff = interval - optimal(waves)
//!
//! interval <= 0      → 0                   (collision or inverted order)
//! diff < -4          → 1 / (diff + 4)²     (packed too tightly)
//! diff > 24          → 1 / (diff - 24)     (spread too far)
//! otherwise          → 1                   (acceptable band, 28 s wide)
//! ```
//!
//! A player's score is the sum over adjacent pairs of its sends sorted by
//! send time; the fitness of a schedule is the sum over all players.

/// Optimal spacing with zero waves (s).
pub const OPTIMAL_BASE_SECS: i64 = 40;
/// Additional optimal spacing per wave (s).
pub const OPTIMAL_SECS_PER_WAVE: i64 = 5;
/// How much tighter than optimal a pair may be and still score 1.
pub const TIGHT_TOLERANCE_SECS: i64 = 4;
/// How much looser than optimal a pair may be and still score 1.
pub const LOOSE_TOLERANCE_SECS: i64 = 24;

/// Optimal interval before a send with `waves` repetitions (s).
#[inline]
pub fn optimal_interval(waves: u32) -> i64 {
    OPTIMAL_BASE_SECS + OPTIMAL_SECS_PER_WAVE * i64::from(waves)
}

/// Score of one interval between consecutive sends, in `[0, 1]`.
///
/// # Example
/// ```
/// use u_attack_schedule::ga::interval_value;
///
/// assert_eq!(interval_value(0, 3), 0.0);
/// assert_eq!(interval_value(55, 3), 1.0);
/// assert_eq!(interval_value(49, 3), 0.25);
/// ```
pub fn interval_value(interval: i64, waves: u32) -> f64 {
    if interval <= 0 {
        return 0.0;
    }
    let diff = interval - optimal_interval(waves);
    if diff < -TIGHT_TOLERANCE_SECS {
        let d = (diff + TIGHT_TOLERANCE_SECS) as f64;
        1.0 / (d * d)
    } else if diff > LOOSE_TOLERANCE_SECS {
        1.0 / (diff - LOOSE_TOLERANCE_SECS) as f64
    } else {
        1.0
    }
}

/// Scores sends already sorted by send time, given as `(send_time, waves)`.
pub fn cadence_score<I>(sorted_sends: I) -> f64
where
    I: IntoIterator<Item = (i64, u32)>,
{
    let mut sends = sorted_sends.into_iter();
    let Some((mut prev, _)) = sends.next() else {
        return 0.0;
    };
    sends
        .map(|(send_time, waves)| {
            let score = interval_value(send_time - prev, waves);
            prev = send_time;
            score
        })
        .sum()
}
