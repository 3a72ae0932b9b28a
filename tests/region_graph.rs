use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use region_graph::{Edge, Point, RegionDescriptor, RegionGraph, RegionGraphBuilder, Seed};
use std::collections::HashMap;

const TOLERANCE: f32 = 1e-4;

fn build(seeds: impl IntoIterator<Item = Seed>) -> RegionGraph {
    RegionGraphBuilder::with_seeds(seeds).build().unwrap()
}

fn scattered_seeds() -> Vec<Seed> {
    vec![
        Seed::new(1, 0.13, 0.22),
        Seed::new(2, 0.71, 0.16),
        Seed::new(3, 0.52, 0.47),
        Seed::new(4, 0.24, 0.79),
        Seed::new(5, 0.88, 0.61),
        Seed::new(6, 0.35, 0.53),
        Seed::new(7, 0.63, 0.85),
        Seed::new(8, 0.91, 0.13),
    ]
}

fn points_close(a: Point, b: Point) -> bool {
    a.distance_to(b) <= TOLERANCE
}

fn edges_close(a: &Edge, b: &Edge) -> bool {
    (points_close(a.from, b.from) && points_close(a.to, b.to))
        || (points_close(a.from, b.to) && points_close(a.to, b.from))
}

fn contains_edge(region: &RegionDescriptor, edge: &Edge) -> bool {
    region.boundary.iter().any(|candidate| edges_close(candidate, edge))
}

fn assert_closed_chain(region: &RegionDescriptor) {
    let mut degrees: HashMap<Point, u32> = HashMap::new();
    for edge in &region.boundary {
        *degrees.entry(edge.from).or_insert(0) += 1;
        *degrees.entry(edge.to).or_insert(0) += 1;
    }
    for (point, degree) in degrees {
        assert_eq!(
            degree, 2,
            "region {} has an open boundary at {point:?}",
            region.id
        );
    }
}

/// Ordnet die Randkanten zu einem Polygonzug und liefert die Eckpunkte.
fn ordered_polygon(region: &RegionDescriptor) -> Vec<Point> {
    let mut remaining = region.boundary.clone();
    let first = remaining.swap_remove(0);
    let mut polygon = vec![first.from, first.to];

    while !remaining.is_empty() {
        let current = *polygon.last().unwrap();
        let position = remaining
            .iter()
            .position(|edge| edge.has_endpoint(current))
            .unwrap_or_else(|| panic!("region {} boundary does not chain", region.id));
        let edge = remaining.swap_remove(position);
        let next = edge.other_endpoint(current).unwrap();
        polygon.push(next);
    }

    assert_eq!(polygon.first(), polygon.last(), "chain must close");
    polygon.pop();
    polygon
}

fn polygon_area(polygon: &[Point]) -> f32 {
    let mut doubled = 0.0f64;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        doubled += a.x as f64 * b.y as f64 - b.x as f64 * a.y as f64;
    }
    (doubled.abs() / 2.0) as f32
}

#[test]
fn single_seed_owns_the_unit_square() {
    let graph = build([Seed::new(42, 0.5, 0.5)]);
    let region = graph.region(42).unwrap();

    assert!(region.neighbors.is_empty());
    assert_eq!(region.boundary.len(), 4);
    for border in [Edge::SOUTH, Edge::EAST, Edge::NORTH, Edge::WEST] {
        assert!(contains_edge(region, &border));
    }
    assert_closed_chain(region);
}

#[test]
fn two_seeds_split_the_map_along_the_bisector() {
    let graph = build([Seed::new(1, 0.25, 0.5), Seed::new(2, 0.75, 0.5)]);

    let bisector = Edge::new(Point::new(0.5, 0.0), Point::new(0.5, 1.0));
    for id in [1, 2] {
        let region = graph.region(id).unwrap();
        assert!(contains_edge(region, &bisector), "region {id} misses the bisector");
        assert_eq!(region.neighbors.len(), 1);
        assert_closed_chain(region);
    }
    assert!(graph.are_neighbors(1, 2));
    assert!(graph.are_neighbors(2, 1));

    let left = ordered_polygon(graph.region(1).unwrap());
    assert_abs_diff_eq!(polygon_area(&left), 0.5, epsilon = 1e-3);
    for vertex in left {
        assert!(vertex.x <= 0.5 + TOLERANCE);
    }
}

#[test]
fn four_corner_seeds_tile_the_map_without_diagonal_neighbors() {
    let graph = build([
        Seed::new(1, 0.25, 0.25),
        Seed::new(2, 0.75, 0.25),
        Seed::new(3, 0.25, 0.75),
        Seed::new(4, 0.75, 0.75),
    ]);

    // Diagonal gegenüberliegende Zellen berühren sich nur im Mittelpunkt.
    for id in 1..=4 {
        let region = graph.region(id).unwrap();
        assert_eq!(region.neighbors.len(), 2, "region {id} has wrong neighbors");
        assert_closed_chain(region);
    }
    assert!(!graph.are_neighbors(1, 4));
    assert!(!graph.are_neighbors(2, 3));
    assert!(graph.are_neighbors(1, 2));
    assert!(graph.are_neighbors(1, 3));
    assert!(graph.are_neighbors(4, 2));
    assert!(graph.are_neighbors(4, 3));

    let mut total_area = 0.0;
    for id in 1..=4 {
        let polygon = ordered_polygon(graph.region(id).unwrap());
        let area = polygon_area(&polygon);
        assert_abs_diff_eq!(area, 0.25, epsilon = 1e-3);
        total_area += area;
    }
    assert_abs_diff_eq!(total_area, 1.0, epsilon = 1e-3);
}

#[test]
fn central_and_corner_seed_partition_the_map() {
    let graph = build([Seed::new(1, 0.5, 0.5), Seed::new(2, 0.9, 0.9)]);

    let central = graph.region(1).unwrap();
    let corner = graph.region(2).unwrap();
    assert_closed_chain(central);
    assert_closed_chain(corner);
    assert!(graph.are_neighbors(1, 2));

    let central_area = polygon_area(&ordered_polygon(central));
    let corner_area = polygon_area(&ordered_polygon(corner));
    assert!(central_area > corner_area);
    assert_abs_diff_eq!(central_area + corner_area, 1.0, epsilon = 1e-3);
}

#[test]
fn adjacency_is_symmetric_for_scattered_seeds() {
    let graph = build(scattered_seeds());
    for region in graph.regions() {
        for neighbor in &region.neighbors {
            assert!(
                graph.are_neighbors(*neighbor, region.id),
                "asymmetric adjacency between {} and {neighbor}",
                region.id
            );
        }
        assert!(!region.neighbors.contains(&region.id));
        assert!(!region.neighbors.is_empty());
    }
}

#[test]
fn boundaries_close_for_scattered_seeds() {
    let graph = build(scattered_seeds());
    assert_eq!(graph.len(), 8);
    for region in graph.regions() {
        assert_closed_chain(region);
        assert!(region.boundary.len() >= 3);
        for edge in &region.boundary {
            assert!(!edge.from.is_outside_map());
            assert!(!edge.to.is_outside_map());
        }
    }
}

#[test]
fn cells_tile_the_map_for_scattered_seeds() {
    let graph = build(scattered_seeds());
    let total: f32 = graph
        .regions()
        .map(|region| polygon_area(&ordered_polygon(region)))
        .sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-2);
}

#[test]
fn rebuild_is_independent_of_seed_order() {
    let seeds = scattered_seeds();
    let reference = build(seeds.clone());

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..5 {
        let mut shuffled = seeds.clone();
        shuffled.shuffle(&mut rng);
        let graph = build(shuffled);

        for region in reference.regions() {
            let other = graph.region(region.id).unwrap();
            assert_eq!(region.neighbors, other.neighbors);
            assert_eq!(region.center, other.center);
            assert_eq!(
                region.boundary.len(),
                other.boundary.len(),
                "region {} boundary size changed",
                region.id
            );
            for edge in &region.boundary {
                assert!(
                    contains_edge(other, edge),
                    "region {} lost edge {edge:?} after reordering",
                    region.id
                );
            }
        }
    }
}

#[test]
fn seed_names_survive_the_build() {
    let graph = build([
        Seed::named(1, "highlands", 0.25, 0.5),
        Seed::named(2, "marsh", 0.75, 0.5),
    ]);
    assert_eq!(graph.region(1).unwrap().name, "highlands");
    assert_eq!(graph.region(2).unwrap().name, "marsh");
}
