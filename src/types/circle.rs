use super::point::Point;
use serde::{Deserialize, Serialize};

/// Umkreis eines Dreiecks.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Inklusiver Test: Punkte auf dem Kreisrand zählen als enthalten.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}
