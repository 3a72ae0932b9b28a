// src/lib.rs

//! Deterministische Voronoi-Regionsberechnung über dem Einheitsquadrat:
//! aus einer Seed-Liste entsteht je Region ein geschlossener, an der
//! Kartengrenze beschnittener Zellrand samt Nachbarschaftsliste.

pub mod builder;
pub mod error;
pub mod geometry;
pub mod region;
pub mod triangulation;
pub mod types;

mod adjacency;
mod boundary;

// Re-Exporte für den einfachen Zugriff auf die wichtigsten Elemente.
pub use builder::RegionGraphBuilder;
pub use error::{RegionGraphError, RegionGraphResult};
pub use region::{RegionDescriptor, RegionGraph, Seed};
pub use types::{Circle, Edge, Point, Triangle};
