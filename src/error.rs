// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionGraphError {
    #[error(
        "duplicate seed coordinates ({x}, {y}): already claimed by region {first_id}, repeated by region {second_id}"
    )]
    DuplicateSeed {
        x: f32,
        y: f32,
        first_id: u32,
        second_id: u32,
    },

    #[error("duplicate region id {id}")]
    DuplicateRegionId { id: u32 },

    #[error("seed {id} lies outside the unit square: ({x}, {y})")]
    InvalidInput { id: u32, x: f32, y: f32 },

    #[error("degenerate geometry: {operation}")]
    DegenerateGeometry { operation: String },

    #[error("no intersection: {operation}")]
    NoIntersection { operation: String },

    #[error("geometric invariant violated: {operation}")]
    GeometricFailure { operation: String },
}

pub type RegionGraphResult<T> = Result<T, RegionGraphError>;
