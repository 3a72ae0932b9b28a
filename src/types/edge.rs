use super::point::Point;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Ungerichtete Kante zwischen zwei Punkten; `{a,b}` und `{b,a}` sind gleich.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    /// Die vier Grenzkanten des Einheitsquadrats.
    pub const NORTH: Edge = Edge {
        from: Point { x: 0.0, y: 1.0 },
        to: Point { x: 1.0, y: 1.0 },
    };
    pub const SOUTH: Edge = Edge {
        from: Point { x: 0.0, y: 0.0 },
        to: Point { x: 1.0, y: 0.0 },
    };
    pub const WEST: Edge = Edge {
        from: Point { x: 0.0, y: 0.0 },
        to: Point { x: 0.0, y: 1.0 },
    };
    pub const EAST: Edge = Edge {
        from: Point { x: 1.0, y: 1.0 },
        to: Point { x: 1.0, y: 0.0 },
    };

    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }

    pub fn length(&self) -> f32 {
        self.from.distance_to(self.to)
    }

    pub fn has_endpoint(&self, point: Point) -> bool {
        self.from == point || self.to == point
    }

    /// Der jeweils andere Endpunkt, falls `point` einer der beiden ist.
    pub fn other_endpoint(&self, point: Point) -> Option<Point> {
        if self.from == point {
            Some(self.to)
        } else if self.to == point {
            Some(self.from)
        } else {
            None
        }
    }

    fn canonical_pair(&self) -> ((u32, u32), (u32, u32)) {
        let a = self.from.canonical_bits();
        let b = self.to.canonical_bits();
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_pair().hash(state);
    }
}
