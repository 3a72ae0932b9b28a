// src/boundary.rs

use crate::error::{RegionGraphError, RegionGraphResult};
use crate::geometry::{self, EPSILON};
use crate::triangulation::FinalizedTriangulation;
use crate::types::{Edge, Point, Triangle};
use glam::Vec2;
use std::collections::{HashMap, HashSet};

/// Extrahiert Zellränder aus der abgeschlossenen Triangulierung.
/// Zustandslos; jeder Aufbau rechnet vollständig neu.
pub struct BoundaryExtractor;

impl BoundaryExtractor {
    /// Duale Randkante je Delaunay-Kante zwischen zwei Seeds, sofern sie
    /// einen Anteil positiver Länge innerhalb des Einheitsquadrats hat.
    pub(crate) fn dual_edges(
        triangulation: &FinalizedTriangulation,
    ) -> RegionGraphResult<HashMap<Edge, Option<Edge>>> {
        let mut duals = HashMap::new();
        for delaunay_edge in triangulation.seed_edges() {
            duals.insert(*delaunay_edge, Self::dual_edge(triangulation, delaunay_edge)?);
        }
        Ok(duals)
    }

    /// Baut den geschlossenen Zellrand eines Seeds aus seinen dualen Kanten.
    pub(crate) fn region_boundary(
        seed: Point,
        duals: &HashMap<Edge, Option<Edge>>,
    ) -> RegionGraphResult<Vec<Edge>> {
        let mut boundary: HashSet<Edge> = HashSet::new();
        for (delaunay_edge, dual) in duals {
            if !delaunay_edge.has_endpoint(seed) {
                continue;
            }
            let Some(dual) = dual else { continue };
            let Some(clipped) = Self::reclip(*dual) else { continue };
            if clipped.length() > EPSILON {
                boundary.insert(clipped);
            }
        }

        if boundary.is_empty() {
            return Err(RegionGraphError::GeometricFailure {
                operation: format!("region at {seed:?} produced no boundary edges"),
            });
        }

        let stitched = Self::stitch(seed, &boundary)?;
        boundary.extend(stitched);
        Self::verify_closed(seed, &boundary)?;
        Ok(boundary.into_iter().collect())
    }

    // === Duale Kanten ===

    fn dual_edge(
        triangulation: &FinalizedTriangulation,
        delaunay_edge: &Edge,
    ) -> RegionGraphResult<Option<Edge>> {
        let retained = triangulation.incident_retained(delaunay_edge);
        match retained.len() {
            // Innere Kante: verbindet die beiden Umkreismittelpunkte.
            2 => Ok(Self::positive_length(Edge::new(
                retained[0].circumcenter(),
                retained[1].circumcenter(),
            ))),
            // Frontier-Kante: der Zellrand läuft bis zur Kartengrenze.
            1 => Self::frontier_edge(delaunay_edge, retained[0]),
            // Beide Nachbardreiecke wurden verworfen; ihre Mittelpunkte
            // spannen die Mittelsenkrechte trotzdem auf und werden nur noch
            // für den Zuschnitt auf die Karte angefasst.
            0 => {
                let flanking = triangulation.incident_all(delaunay_edge);
                if flanking.len() != 2 {
                    return Err(RegionGraphError::GeometricFailure {
                        operation: format!(
                            "delaunay edge {delaunay_edge:?} has {} flanking triangles",
                            flanking.len()
                        ),
                    });
                }
                let clipped = geometry::clip_segment_to_map(
                    flanking[0].circumcenter(),
                    flanking[1].circumcenter(),
                );
                Ok(clipped.and_then(|(from, to)| Self::positive_length(Edge::new(from, to))))
            }
            count => Err(RegionGraphError::GeometricFailure {
                operation: format!(
                    "delaunay edge {delaunay_edge:?} has {count} retained triangles"
                ),
            }),
        }
    }

    /// Randstrahl einer Frontier-Kante, geschnitten mit der Kartengrenze.
    /// Richtungswahl: bei einem stumpfwinkligen Dreieck, dessen längste Kante
    /// die Frontier-Kante ist, liegt der Umkreismittelpunkt bereits jenseits
    /// der Kante und der Strahl läuft über ihn hinaus; sonst läuft er vom
    /// Mittelpunkt der Kante nach außen.
    fn frontier_edge(delaunay_edge: &Edge, triangle: &Triangle) -> RegionGraphResult<Option<Edge>> {
        let circumcenter = triangle.circumcenter();
        let midpoint = delaunay_edge.midpoint();

        let direction = if triangle.is_obtuse() && triangle.is_longest_edge(delaunay_edge) {
            circumcenter.to_vec2() - midpoint.to_vec2()
        } else {
            midpoint.to_vec2() - circumcenter.to_vec2()
        };

        let ray = Edge::new(circumcenter, midpoint);
        let mut crossing: Option<Point> = None;
        for border in Self::candidate_borders(direction) {
            let Ok(candidate) = geometry::segment_intersection(&ray, &border) else {
                // Strahl parallel zu dieser Grenze; die andere bleibt übrig.
                continue;
            };
            if !Self::on_border_segment(candidate) {
                continue;
            }
            let candidate = Self::clamp_to_map(candidate);
            let closer = match crossing {
                Some(best) => midpoint.distance_to(candidate) < midpoint.distance_to(best),
                None => true,
            };
            if closer {
                crossing = Some(candidate);
            }
        }

        let Some(crossing) = crossing else {
            return Err(RegionGraphError::NoIntersection {
                operation: format!(
                    "frontier ray from {circumcenter:?} through {midpoint:?} misses every map border"
                ),
            });
        };
        Ok(Self::positive_length(Edge::new(circumcenter, crossing)))
    }

    /// Grenzkandidaten nach Vorzeichen der Strahlrichtung je Achse.
    fn candidate_borders(direction: Vec2) -> [Edge; 2] {
        let horizontal = if direction.x >= 0.0 { Edge::EAST } else { Edge::WEST };
        let vertical = if direction.y >= 0.0 { Edge::NORTH } else { Edge::SOUTH };
        [horizontal, vertical]
    }

    fn on_border_segment(point: Point) -> bool {
        (-EPSILON..=1.0 + EPSILON).contains(&point.x)
            && (-EPSILON..=1.0 + EPSILON).contains(&point.y)
    }

    fn clamp_to_map(point: Point) -> Point {
        Point::new(point.x.clamp(0.0, 1.0), point.y.clamp(0.0, 1.0))
    }

    fn positive_length(edge: Edge) -> Option<Edge> {
        (edge.length() > EPSILON).then_some(edge)
    }

    /// Endpunkte außerhalb der Karte werden durch den nächstgelegenen
    /// Grenzschnitt entlang der Kante ersetzt.
    fn reclip(edge: Edge) -> Option<Edge> {
        if !edge.from.is_outside_map() && !edge.to.is_outside_map() {
            return Some(edge);
        }
        geometry::clip_segment_to_map(edge.from, edge.to).map(|(from, to)| Edge::new(from, to))
    }

    // === Vernähen entlang der Kartengrenze ===

    /// Schließt die offenen Kettenenden einer Randzelle entlang der
    /// Kartengrenze, über Eckpunkte hinweg. Von den beiden möglichen
    /// Grenzbögen gehört derjenige zur Zelle, dessen geschlossener Umriss
    /// den Seed enthält.
    fn stitch(seed: Point, boundary: &HashSet<Edge>) -> RegionGraphResult<Vec<Edge>> {
        let mut open: Vec<Point> = Self::endpoint_degrees(boundary)
            .into_iter()
            .filter(|(_, degree)| degree % 2 == 1)
            .map(|(point, _)| point)
            .collect();

        match open.len() {
            0 => return Ok(Vec::new()),
            2 => {}
            count => {
                return Err(RegionGraphError::GeometricFailure {
                    operation: format!("region at {seed:?} has {count} open chain endpoints"),
                });
            }
        }

        let end = open.pop().unwrap_or(seed);
        let start = open.pop().unwrap_or(seed);
        let t_start = Self::border_position(start).ok_or_else(|| {
            RegionGraphError::GeometricFailure {
                operation: format!("open endpoint {start:?} of region at {seed:?} is off the border"),
            }
        })?;
        let t_end = Self::border_position(end).ok_or_else(|| {
            RegionGraphError::GeometricFailure {
                operation: format!("open endpoint {end:?} of region at {seed:?} is off the border"),
            }
        })?;

        let forward = Self::arc_edges(start, end, t_start, t_end, true);
        let mut candidate: Vec<Edge> = boundary.iter().copied().collect();
        candidate.extend(forward.iter().copied());
        let polygon = Self::chain_polygon(seed, &candidate)?;
        if Self::polygon_contains(&polygon, seed) {
            Ok(forward)
        } else {
            Ok(Self::arc_edges(start, end, t_start, t_end, false))
        }
    }

    /// Kantenzug von `start` nach `end` entlang der Grenze in Laufrichtung.
    fn arc_edges(start: Point, end: Point, t_start: f32, t_end: f32, forward: bool) -> Vec<Edge> {
        let mut edges = Vec::new();
        let mut current = start;
        for corner in Self::arc_corners(t_start, t_end, forward) {
            if corner != current {
                edges.push(Edge::new(current, corner));
                current = corner;
            }
        }
        if current != end {
            edges.push(Edge::new(current, end));
        }
        edges
    }

    /// Ordnet die Kantenmenge zu einem geschlossenen Polygonzug.
    fn chain_polygon(seed: Point, edges: &[Edge]) -> RegionGraphResult<Vec<Point>> {
        let mut remaining = edges.to_vec();
        let Some(first) = remaining.pop() else {
            return Err(RegionGraphError::GeometricFailure {
                operation: format!("region at {seed:?} has an empty boundary chain"),
            });
        };
        let mut polygon = vec![first.from, first.to];

        while !remaining.is_empty() {
            let current = polygon[polygon.len() - 1];
            let Some(position) = remaining.iter().position(|edge| edge.has_endpoint(current))
            else {
                return Err(RegionGraphError::GeometricFailure {
                    operation: format!(
                        "boundary of region at {seed:?} does not chain at {current:?}"
                    ),
                });
            };
            let edge = remaining.swap_remove(position);
            let Some(next) = edge.other_endpoint(current) else {
                continue;
            };
            polygon.push(next);
        }

        if polygon.first() != polygon.last() {
            return Err(RegionGraphError::GeometricFailure {
                operation: format!("boundary of region at {seed:?} does not close"),
            });
        }
        polygon.pop();
        Ok(polygon)
    }

    /// Ray-Casting-Test, ob `point` innerhalb des Polygons liegt.
    fn polygon_contains(polygon: &[Point], point: Point) -> bool {
        if polygon.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let vi = polygon[i];
            let vj = polygon[j];
            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn endpoint_degrees(boundary: &HashSet<Edge>) -> HashMap<Point, u32> {
        let mut degrees: HashMap<Point, u32> = HashMap::new();
        for edge in boundary {
            *degrees.entry(edge.from).or_insert(0) += 1;
            *degrees.entry(edge.to).or_insert(0) += 1;
        }
        degrees
    }

    fn verify_closed(seed: Point, boundary: &HashSet<Edge>) -> RegionGraphResult<()> {
        for (point, degree) in Self::endpoint_degrees(boundary) {
            if degree != 2 {
                return Err(RegionGraphError::GeometricFailure {
                    operation: format!(
                        "boundary of region at {seed:?} is not a closed chain: {point:?} has degree {degree}"
                    ),
                });
            }
        }
        Ok(())
    }

    /// Position auf dem Grenzzyklus: Süd `[0,1)`, Ost `[1,2)`, Nord `[2,3)`,
    /// West `[3,4)`, jeweils gegen den Uhrzeigersinn.
    fn border_position(point: Point) -> Option<f32> {
        if point.is_outside_map() {
            return None;
        }
        if point.y.abs() <= EPSILON {
            return Some(point.x.clamp(0.0, 1.0));
        }
        if (point.x - 1.0).abs() <= EPSILON {
            return Some(1.0 + point.y.clamp(0.0, 1.0));
        }
        if (point.y - 1.0).abs() <= EPSILON {
            return Some(3.0 - point.x.clamp(0.0, 1.0));
        }
        if point.x.abs() <= EPSILON {
            let t = 4.0 - point.y.clamp(0.0, 1.0);
            return Some(if t >= 4.0 { t - 4.0 } else { t });
        }
        None
    }

    fn border_point_at(t: f32) -> Point {
        let t = t.rem_euclid(4.0);
        if t < 1.0 {
            Point::new(t, 0.0)
        } else if t < 2.0 {
            Point::new(1.0, t - 1.0)
        } else if t < 3.0 {
            Point::new(3.0 - t, 1.0)
        } else {
            Point::new(0.0, 4.0 - t)
        }
    }

    /// Eckpunkte strikt zwischen `from` und `to` in Laufrichtung.
    fn arc_corners(from: f32, to: f32, forward: bool) -> Vec<Point> {
        let span = if forward {
            (to - from).rem_euclid(4.0)
        } else {
            (from - to).rem_euclid(4.0)
        };

        let mut corners = Vec::new();
        let step: f32 = if forward { 1.0 } else { -1.0 };
        let mut t = if forward {
            (from + EPSILON).floor() + 1.0
        } else {
            (from - EPSILON).ceil() - 1.0
        };
        let mut travelled = if forward { t - from } else { from - t };
        while travelled < span - EPSILON {
            corners.push(Self::border_point_at(t));
            t += step;
            travelled += 1.0;
        }
        corners
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_border_position_roundtrip() {
        for t in [0.0, 0.25, 1.0, 1.5, 2.0, 2.75, 3.0, 3.5] {
            let point = BoundaryExtractor::border_point_at(t);
            let back = BoundaryExtractor::border_position(point).unwrap();
            assert_abs_diff_eq!(back, t, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_border_corners_are_exact() {
        assert_eq!(BoundaryExtractor::border_point_at(0.0), Point::new(0.0, 0.0));
        assert_eq!(BoundaryExtractor::border_point_at(1.0), Point::new(1.0, 0.0));
        assert_eq!(BoundaryExtractor::border_point_at(2.0), Point::new(1.0, 1.0));
        assert_eq!(BoundaryExtractor::border_point_at(3.0), Point::new(0.0, 1.0));
    }

    #[test]
    fn test_arc_corners_walk_both_sides() {
        // Von (0.5, 0) nach (0.5, 1): vorwärts über Ost, rückwärts über West.
        let forward = BoundaryExtractor::arc_corners(0.5, 2.5, true);
        assert_eq!(forward, vec![Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);

        let backward = BoundaryExtractor::arc_corners(0.5, 2.5, false);
        assert_eq!(backward, vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
    }

    #[test]
    fn test_arc_corners_skip_touching_corner() {
        // Startpunkt genau auf der Ecke (1, 0): die Ecke selbst zählt nicht.
        let corners = BoundaryExtractor::arc_corners(1.0, 1.5, true);
        assert!(corners.is_empty());
    }

    #[test]
    fn test_candidate_borders_follow_direction_signs() {
        let borders = BoundaryExtractor::candidate_borders(Vec2::new(0.5, -0.5));
        assert_eq!(borders, [Edge::EAST, Edge::SOUTH]);

        let borders = BoundaryExtractor::candidate_borders(Vec2::new(-0.5, 0.5));
        assert_eq!(borders, [Edge::WEST, Edge::NORTH]);
    }

    #[test]
    fn test_stitch_closes_adjacent_borders_via_corner() {
        // Offene Enden auf Süd- und Westgrenze; Seed unten links.
        let seed = Point::new(0.25, 0.25);
        let center = Point::new(0.5, 0.5);
        let south = Point::new(0.5, 0.0);
        let west = Point::new(0.0, 0.5);
        let boundary: HashSet<Edge> =
            [Edge::new(center, south), Edge::new(center, west)].into_iter().collect();

        let stitched = BoundaryExtractor::stitch(seed, &boundary).unwrap();
        let corner = Point::new(0.0, 0.0);
        assert_eq!(stitched.len(), 2);
        assert!(stitched.iter().all(|edge| edge.has_endpoint(corner)));
    }

    #[test]
    fn test_stitch_picks_the_arc_enclosing_the_seed() {
        // Zentraler Seed gegen Eck-Seed: beide Bögen sind gleich weit vom
        // Seed entfernt, aber nur einer umschließt ihn.
        let seed = Point::new(0.5, 0.5);
        let boundary: HashSet<Edge> =
            [Edge::new(Point::new(1.0, 0.4), Point::new(0.4, 1.0))].into_iter().collect();

        let stitched = BoundaryExtractor::stitch(seed, &boundary).unwrap();
        assert_eq!(stitched.len(), 4);
        assert!(stitched
            .iter()
            .all(|edge| !edge.has_endpoint(Point::new(1.0, 1.0))));
    }

    #[test]
    fn test_stitch_crosses_opposite_borders_on_the_seed_side() {
        // Mittelsenkrechte zweier Seeds; die linke Zelle schließt über West.
        let seed = Point::new(0.25, 0.5);
        let bottom = Point::new(0.5, 0.0);
        let top = Point::new(0.5, 1.0);
        let boundary: HashSet<Edge> = [Edge::new(bottom, top)].into_iter().collect();

        let stitched = BoundaryExtractor::stitch(seed, &boundary).unwrap();
        assert_eq!(stitched.len(), 3);
        for edge in &stitched {
            assert!(edge.from.x <= 0.5 + 1e-6);
            assert!(edge.to.x <= 0.5 + 1e-6);
        }
    }
}
