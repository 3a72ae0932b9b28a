// src/adjacency.rs

use crate::types::{Edge, Point};
use std::collections::{HashMap, HashSet};

/// Nachbarschaft aus den dualen Kanten: zwei Seeds grenzen aneinander,
/// wenn ihre Delaunay-Kante eine Randkante positiver Länge beigesteuert
/// hat. Symmetrie folgt direkt aus der ungerichteten Kante; Seeds, deren
/// Zellen sich nur in einem Punkt berühren, bleiben außen vor.
pub(crate) fn resolve_neighbors(
    duals: &HashMap<Edge, Option<Edge>>,
) -> HashMap<Point, HashSet<Point>> {
    let mut neighbors: HashMap<Point, HashSet<Point>> = HashMap::new();
    for (delaunay_edge, dual) in duals {
        if dual.is_none() {
            continue;
        }
        neighbors
            .entry(delaunay_edge.from)
            .or_default()
            .insert(delaunay_edge.to);
        neighbors
            .entry(delaunay_edge.to)
            .or_default()
            .insert(delaunay_edge.from);
    }
    neighbors
}
