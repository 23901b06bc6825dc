use super::Point;
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Drilling hole identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HoleId(pub Uuid);

impl HoleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed-diameter mounting hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillingHole {
    pub id: HoleId,
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

impl DrillingHole {
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            id: HoleId::new(),
            x,
            y,
            diameter,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Distances from the hole centre to each side of `bounds`.
    pub fn clearances(&self, bounds: &BoundingBox) -> HoleClearances {
        HoleClearances {
            left: self.x - bounds.min_x,
            right: bounds.max_x - self.x,
            top: self.y - bounds.min_y,
            bottom: bounds.max_y - self.y,
        }
    }
}

/// Hole centre distance to the plate's bounding-box sides (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoleClearances {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl HoleClearances {
    pub fn min(&self) -> f64 {
        self.left.min(self.right).min(self.top).min(self.bottom)
    }
}
