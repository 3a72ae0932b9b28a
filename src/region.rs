// src/region.rs

use crate::types::{Edge, Point};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Eingabedatensatz eines Seeds. Das Dekodieren aus dem Speicherformat
/// übernimmt ein vorgelagerter Lade-Kollaborateur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl Seed {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            name: String::new(),
            x,
            y,
        }
    }

    pub fn named(id: u32, name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Fertige Region: Zentrum, geschlossener Rand und Nachbar-Ids.
/// Reine Daten; Skalierung und Darstellung passieren außerhalb.
#[derive(Debug, Clone, Serialize)]
pub struct RegionDescriptor {
    pub id: u32,
    pub name: String,
    pub center: Point,
    pub boundary: Vec<Edge>,
    pub neighbors: BTreeSet<u32>,
}

/// Ergebnisgraph, nach Region-Id geordnet.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionGraph {
    regions: BTreeMap<u32, RegionDescriptor>,
}

impl RegionGraph {
    pub(crate) fn insert(&mut self, descriptor: RegionDescriptor) {
        self.regions.insert(descriptor.id, descriptor);
    }

    pub fn region(&self, id: u32) -> Option<&RegionDescriptor> {
        self.regions.get(&id)
    }

    pub fn regions(&self) -> impl Iterator<Item = &RegionDescriptor> {
        self.regions.values()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn are_neighbors(&self, a: u32, b: u32) -> bool {
        self.regions
            .get(&a)
            .is_some_and(|region| region.neighbors.contains(&b))
    }
}
