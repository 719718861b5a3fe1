//! Grid coordinates.
//!
//! The map is a square of side `2 * server_size + 1` centered on the origin
//! that wraps at its edges (torus topology). A point is pure identity: it is
//! never mutated after creation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer coordinate on the wrapped map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}|{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_from_tuple() {
        let p: Point = (-122, 4).into();
        assert_eq!(p, Point::new(-122, 4));
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(44, -66).to_string(), "(44|-66)");
    }
}
