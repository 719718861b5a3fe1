//! Actor model.
//!
//! An actor is the origin of timed actions: a map position owned by a
//! player, with travel-speed modifiers. Several actors may belong to the
//! same player; send cadence is evaluated per player, not per actor.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Point;

/// Highest tier bonus level an actor can carry.
pub const MAX_TIER_BONUS: u8 = 20;

/// An origin of timed actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique actor identifier.
    pub id: String,
    /// Owning player identifier.
    pub player_id: String,
    /// Map position.
    pub position: Point,
    /// Global travel-speed modifier.
    #[serde(default)]
    pub speed_modifier: SpeedModifier,
    /// Tier bonus level (0..=20). Speeds up travel beyond the first 20 units.
    #[serde(default)]
    pub tier_bonus: u8,
}

impl Actor {
    /// Creates an actor with a normal speed modifier and no tier bonus.
    pub fn new(id: impl Into<String>, player_id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            player_id: player_id.into(),
            position,
            speed_modifier: SpeedModifier::Normal,
            tier_bonus: 0,
        }
    }

    /// Sets the speed modifier.
    pub fn with_speed_modifier(mut self, modifier: SpeedModifier) -> Self {
        self.speed_modifier = modifier;
        self
    }

    /// Sets the tier bonus level.
    pub fn with_tier_bonus(mut self, level: u8) -> Self {
        self.tier_bonus = level;
        self
    }
}

/// Discrete travel-speed modifiers an actor may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeedModifier {
    /// x2.0
    Double,
    /// x1.5
    OneAndHalf,
    /// x1.0
    #[default]
    Normal,
    /// x0.67
    TwoThirds,
    /// x0.5
    Half,
    /// x0.33
    Third,
}

impl SpeedModifier {
    /// All modifiers, fastest first.
    pub const ALL: [SpeedModifier; 6] = [
        SpeedModifier::Double,
        SpeedModifier::OneAndHalf,
        SpeedModifier::Normal,
        SpeedModifier::TwoThirds,
        SpeedModifier::Half,
        SpeedModifier::Third,
    ];

    /// Multiplier applied to the unit base speed.
    pub fn factor(self) -> f64 {
        match self {
            SpeedModifier::Double => 2.0,
            SpeedModifier::OneAndHalf => 1.5,
            SpeedModifier::Normal => 1.0,
            SpeedModifier::TwoThirds => 0.67,
            SpeedModifier::Half => 0.5,
            SpeedModifier::Third => 0.33,
        }
    }
}

/// Raised when a factor does not belong to the discrete modifier set.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("unsupported speed modifier: {0}")]
pub struct UnknownSpeedModifier(pub f64);

impl TryFrom<f64> for SpeedModifier {
    type Error = UnknownSpeedModifier;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        SpeedModifier::ALL
            .into_iter()
            .find(|m| (m.factor() - value).abs() < 1e-9)
            .ok_or(UnknownSpeedModifier(value))
    }
}

impl fmt::Display for SpeedModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.factor())
    }
}
