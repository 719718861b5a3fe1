//! Server-wide constants.
//!
//! Map size, world speed and per-kind unit base speeds. Loaded once per
//! scheduling run and shared read-only by every travel-time computation.

use serde::{Deserialize, Serialize};

use super::ActionKind;

/// Server-wide travel constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Half-width of the map. The grid side is `2 * server_size + 1`.
    pub server_size: u32,
    /// World speed multiplier applied to every unit speed.
    pub speed_multiplier: f64,
    /// Unit base speeds (grid units per hour) per action kind.
    pub unit_speeds: UnitSpeeds,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            server_size: 200,
            speed_multiplier: 1.0,
            unit_speeds: UnitSpeeds::default(),
        }
    }
}

impl ServerSettings {
    /// Creates settings for a map of the given half-width.
    pub fn new(server_size: u32) -> Self {
        Self {
            server_size,
            ..Self::default()
        }
    }

    /// Sets the world speed multiplier.
    pub fn with_speed_multiplier(mut self, multiplier: f64) -> Self {
        self.speed_multiplier = multiplier;
        self
    }

    /// Sets the unit speed table.
    pub fn with_unit_speeds(mut self, speeds: UnitSpeeds) -> Self {
        self.unit_speeds = speeds;
        self
    }

    /// Side length of the wrapped grid.
    #[inline]
    pub fn grid_side(&self) -> i64 {
        2 * i64::from(self.server_size) + 1
    }
}

/// Base speed (grid units per hour) of the slowest unit of each action kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitSpeeds {
    pub conquest: f64,
    pub siege: f64,
    pub ram: f64,
    pub infantry: f64,
    pub cavalry: f64,
}

impl Default for UnitSpeeds {
    fn default() -> Self {
        Self {
            conquest: 4.0,
            siege: 3.0,
            ram: 4.0,
            infantry: 6.0,
            cavalry: 19.0,
        }
    }
}

impl UnitSpeeds {
    /// Uses the same base speed for every kind.
    pub fn uniform(speed: f64) -> Self {
        Self {
            conquest: speed,
            siege: speed,
            ram: speed,
            infantry: speed,
            cavalry: speed,
        }
    }

    /// Base speed for an action kind.
    pub fn speed_for(&self, kind: ActionKind) -> f64 {
        match kind {
            ActionKind::Conquest => self.conquest,
            ActionKind::Siege => self.siege,
            ActionKind::Ram => self.ram,
            ActionKind::Infantry => self.infantry,
            ActionKind::Cavalry => self.cavalry,
        }
    }

    /// All (kind, speed) entries.
    pub fn entries(&self) -> [(ActionKind, f64); 5] {
        [
            (ActionKind::Conquest, self.conquest),
            (ActionKind::Siege, self.siege),
            (ActionKind::Ram, self.ram),
            (ActionKind::Infantry, self.infantry),
            (ActionKind::Cavalry, self.cavalry),
        ]
    }
}
