use std::fmt;

use gridstar_core::Coord;
use thiserror::Error;

/// One of the two endpoints of a search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::Goal => f.write_str("goal"),
        }
    }
}

/// Reasons a [`GridMap`](crate::GridMap) can be rejected or refuse an edit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("map has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{coord} is outside the {rows}x{cols} map")]
    OutOfBounds { coord: Coord, rows: i32, cols: i32 },

    #[error("{endpoint} {coord} is outside the {rows}x{cols} map")]
    EndpointOutOfBounds {
        endpoint: Endpoint,
        coord: Coord,
        rows: i32,
        cols: i32,
    },

    #[error("{endpoint} {coord} is not traversable")]
    EndpointBlocked { endpoint: Endpoint, coord: Coord },

    #[error("map text has no {0} marker")]
    MissingEndpoint(Endpoint),

    #[error("map text marks the {endpoint} twice, at {first} and {second}")]
    DuplicateEndpoint {
        endpoint: Endpoint,
        first: Coord,
        second: Coord,
    },

    #[error("unknown tile {ch:?} at row {row}, column {col}")]
    UnknownTile { ch: char, row: usize, col: usize },
}
