// src/builder.rs

use crate::adjacency;
use crate::boundary::BoundaryExtractor;
use crate::error::{RegionGraphError, RegionGraphResult};
use crate::region::{RegionDescriptor, RegionGraph, Seed};
use crate::triangulation::DelaunayTriangulation;
use crate::types::{Edge, Point};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, info, warn};

/// Baut aus einer Seed-Liste den vollständigen Regionsgraphen.
/// Jeder Aufrufer hält seine eigene Instanz; es gibt keinen globalen
/// Zustand, und jeder `build`-Aufruf rechnet von vorn.
pub struct RegionGraphBuilder {
    seeds: Vec<Seed>,
}

impl RegionGraphBuilder {
    pub fn new() -> Self {
        Self { seeds: Vec::new() }
    }

    pub fn with_seeds(seeds: impl IntoIterator<Item = Seed>) -> Self {
        Self {
            seeds: seeds.into_iter().collect(),
        }
    }

    pub fn add_seed(&mut self, seed: Seed) -> &mut Self {
        self.seeds.push(seed);
        self
    }

    /// Vollständiger Neuaufbau aus der aktuellen Seed-Liste. Ein Fehler
    /// bricht den Aufbau ab und liefert keinen Teilgraphen.
    pub fn build(&self) -> RegionGraphResult<RegionGraph> {
        info!(seed_count = self.seeds.len(), "region graph build started");
        self.validate()?;

        let mut graph = RegionGraph::default();

        match self.seeds.len() {
            0 => {
                warn!("no seeds supplied, returning an empty region graph");
                return Ok(graph);
            }
            1 => {
                // Ein einzelner Seed besitzt das gesamte Einheitsquadrat.
                graph.insert(Self::whole_map_region(&self.seeds[0]));
                info!(region_count = 1, "region graph build finished");
                return Ok(graph);
            }
            _ => {}
        }

        let mut triangulation = DelaunayTriangulation::new()?;
        for seed in &self.seeds {
            triangulation.insert(seed.position())?;
        }
        let finalized = triangulation.finalize();
        debug!(retained = finalized.retained_count(), "triangulation ready");

        let duals = BoundaryExtractor::dual_edges(&finalized)?;
        debug!(
            dual_count = duals.values().filter(|dual| dual.is_some()).count(),
            "dual edges computed"
        );

        let neighbor_points = adjacency::resolve_neighbors(&duals);
        let id_by_position: HashMap<Point, u32> = self
            .seeds
            .iter()
            .map(|seed| (seed.position(), seed.id))
            .collect();

        for seed in &self.seeds {
            let position = seed.position();
            let boundary = BoundaryExtractor::region_boundary(position, &duals)?;
            let neighbors: BTreeSet<u32> = neighbor_points
                .get(&position)
                .into_iter()
                .flatten()
                .filter_map(|point| id_by_position.get(point).copied())
                .collect();
            graph.insert(RegionDescriptor {
                id: seed.id,
                name: seed.name.clone(),
                center: position,
                boundary,
                neighbors,
            });
        }

        info!(region_count = graph.len(), "region graph build finished");
        Ok(graph)
    }

    fn validate(&self) -> RegionGraphResult<()> {
        let mut claimed_positions: HashMap<Point, u32> = HashMap::new();
        let mut claimed_ids: HashSet<u32> = HashSet::new();

        for seed in &self.seeds {
            if !seed.x.is_finite() || !seed.y.is_finite() || seed.position().is_outside_map() {
                return Err(RegionGraphError::InvalidInput {
                    id: seed.id,
                    x: seed.x,
                    y: seed.y,
                });
            }
            if let Some(first_id) = claimed_positions.insert(seed.position(), seed.id) {
                return Err(RegionGraphError::DuplicateSeed {
                    x: seed.x,
                    y: seed.y,
                    first_id,
                    second_id: seed.id,
                });
            }
            if !claimed_ids.insert(seed.id) {
                return Err(RegionGraphError::DuplicateRegionId { id: seed.id });
            }
        }
        Ok(())
    }

    fn whole_map_region(seed: &Seed) -> RegionDescriptor {
        RegionDescriptor {
            id: seed.id,
            name: seed.name.clone(),
            center: seed.position(),
            boundary: vec![Edge::SOUTH, Edge::EAST, Edge::NORTH, Edge::WEST],
            neighbors: BTreeSet::new(),
        }
    }
}

impl Default for RegionGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
