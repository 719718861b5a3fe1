//! Target model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Point;

/// A destination of timed actions.
///
/// Targets are the unit of scheduling: every planned action aimed at the
/// same target shares one optimized offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique, stable target identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Map position.
    pub position: Point,
    /// Domain-specific metadata (flags, notes).
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Target {
    /// Creates a target at the given position.
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            position,
            attributes: HashMap::new(),
        }
    }

    /// Sets the target name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_builder() {
        let target = Target::new("T1", Point::new(44, 66))
            .with_name("Capital")
            .with_attribute("wonder", "no");

        assert_eq!(target.id, "T1");
        assert_eq!(target.name, "Capital");
        assert_eq!(target.position, Point::new(44, 66));
        assert_eq!(target.attributes.get("wonder"), Some(&"no".to_string()));
    }
}
