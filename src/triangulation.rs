// src/triangulation.rs

use crate::error::{RegionGraphError, RegionGraphResult};
use crate::types::{Edge, Point, Triangle};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Eckpunkte des synthetischen Super-Dreiecks. Sie liegen strikt außerhalb
/// des Einheitsquadrats und können daher nie mit einem Seed kollidieren.
pub(crate) const SENTINELS: [Point; 3] = [
    Point { x: -1.0, y: -1.0 },
    Point { x: 4.0, y: -1.0 },
    Point { x: -1.0, y: 4.0 },
];

pub(crate) fn is_sentinel(point: Point) -> bool {
    SENTINELS.iter().any(|sentinel| *sentinel == point)
}

type TriangleId = u64;

/// Inkrementelle Bowyer-Watson-Triangulierung über dem Einheitsquadrat.
/// Der Kanten-Index wird bei jedem Einfügen mitgepflegt statt neu aufgebaut.
pub struct DelaunayTriangulation {
    triangles: HashMap<TriangleId, Triangle>,
    edge_index: HashMap<Edge, Vec<TriangleId>>,
    next_id: TriangleId,
}

impl DelaunayTriangulation {
    pub fn new() -> RegionGraphResult<Self> {
        let mut triangulation = Self {
            triangles: HashMap::new(),
            edge_index: HashMap::new(),
            next_id: 0,
        };
        let [a, b, c] = SENTINELS;
        triangulation.add_triangle(Triangle::new(a, b, c)?);
        Ok(triangulation)
    }

    /// Fügt einen Seed ein und stellt die Delaunay-Eigenschaft wieder her.
    pub fn insert(&mut self, point: Point) -> RegionGraphResult<()> {
        let dirty: Vec<TriangleId> = self
            .triangles
            .iter()
            .filter(|(_, triangle)| triangle.circumcircle().contains(point))
            .map(|(id, _)| *id)
            .collect();

        if dirty.is_empty() {
            return Err(RegionGraphError::GeometricFailure {
                operation: format!("no circumcircle contains inserted seed {point:?}"),
            });
        }

        // Randpolygon der dirty-Region: Kanten, die genau einmal vorkommen.
        // Innere Kanten tauchen in zwei dirty-Dreiecken auf und fallen weg.
        let mut occurrences: HashMap<Edge, u32> = HashMap::new();
        for id in &dirty {
            if let Some(triangle) = self.triangles.get(id) {
                for edge in triangle.edges() {
                    *occurrences.entry(edge).or_insert(0) += 1;
                }
            }
        }

        for id in dirty {
            self.remove_triangle(id);
        }

        for (edge, count) in occurrences {
            if count == 1 {
                self.add_triangle(Triangle::new(edge.from, edge.to, point)?);
            }
        }

        Ok(())
    }

    /// Schließt die Konstruktion ab. Gültig bleiben Dreiecke ohne
    /// Sentinel-Ecke, deren Umkreismittelpunkt im Einheitsquadrat liegt.
    pub fn finalize(self) -> FinalizedTriangulation {
        let retained: HashSet<TriangleId> = self
            .triangles
            .iter()
            .filter(|(_, triangle)| {
                !SENTINELS.iter().any(|sentinel| triangle.has_vertex(*sentinel))
                    && !triangle.circumcenter().is_outside_map()
            })
            .map(|(id, _)| *id)
            .collect();

        debug!(
            total = self.triangles.len(),
            retained = retained.len(),
            "triangulation finalized"
        );

        FinalizedTriangulation {
            triangles: self.triangles,
            edge_index: self.edge_index,
            retained,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn add_triangle(&mut self, triangle: Triangle) {
        let id = self.next_id;
        self.next_id += 1;
        for edge in triangle.edges() {
            let incident = self.edge_index.entry(edge).or_default();
            incident.push(id);
            debug_assert!(
                incident.len() <= 2,
                "edge {edge:?} referenced by more than two triangles"
            );
        }
        self.triangles.insert(id, triangle);
    }

    fn remove_triangle(&mut self, id: TriangleId) {
        let Some(triangle) = self.triangles.remove(&id) else {
            return;
        };
        for edge in triangle.edges() {
            if let Some(incident) = self.edge_index.get_mut(&edge) {
                incident.retain(|other| *other != id);
                if incident.is_empty() {
                    self.edge_index.remove(&edge);
                }
            }
        }
    }
}

/// Abgeschlossene Triangulierung. Verworfene Dreiecke bleiben adressierbar,
/// weil Randkanten ihre Umkreismittelpunkte noch für Grenz-Clips brauchen.
pub struct FinalizedTriangulation {
    triangles: HashMap<TriangleId, Triangle>,
    edge_index: HashMap<Edge, Vec<TriangleId>>,
    retained: HashSet<TriangleId>,
}

impl FinalizedTriangulation {
    pub fn retained_triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.retained.iter().filter_map(|id| self.triangles.get(id))
    }

    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Gültige Dreiecke an einer Kante (0, 1 oder 2).
    pub(crate) fn incident_retained(&self, edge: &Edge) -> Vec<&Triangle> {
        self.edge_index
            .get(edge)
            .into_iter()
            .flatten()
            .filter(|id| self.retained.contains(id))
            .filter_map(|id| self.triangles.get(id))
            .collect()
    }

    /// Alle Dreiecke an einer Kante, auch verworfene.
    pub(crate) fn incident_all(&self, edge: &Edge) -> Vec<&Triangle> {
        self.edge_index
            .get(edge)
            .into_iter()
            .flatten()
            .filter_map(|id| self.triangles.get(id))
            .collect()
    }

    /// Alle Delaunay-Kanten, deren beide Endpunkte Seeds sind.
    pub(crate) fn seed_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_index
            .keys()
            .filter(|edge| !is_sentinel(edge.from) && !is_sentinel(edge.to))
    }
}
