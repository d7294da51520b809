//! Strategies for choosing the candidate successors of an expanded cell.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use enumset::EnumSet;
use gridstar_core::{Coord, Point};

use crate::{Direction, DistanceStrategy, GridMap, RayCast, UnknownName};

/// Produces candidate successors for a cell being expanded.
///
/// Candidates are appended to `out`; the caller clears it beforehand. They carry no costs or
/// parent yet. Implementations may emit cells that are blocked or already expanded, since the
/// search filters those itself.
pub trait NeighborStrategy: Send + Sync {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        distance: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    );

    fn label(&self) -> &'static str;

    fn explanation(&self) -> &'static str {
        ""
    }
}

/// Emits the traversable cells one step away in each direction of a set, in direction order.
fn adjacent(map: &GridMap, cursor: Coord, directions: EnumSet<Direction>, out: &mut Vec<Point>) {
    for dir in directions {
        let (dr, dc) = dir.offset();
        let next = cursor.offset(dr, dc);
        if map.is_traversable(next) {
            out.push(Point::new(next));
        }
    }
}

/// North, east, south and west.
#[derive(Clone, Copy, Debug, Default)]
pub struct FourDirections;

impl NeighborStrategy for FourDirections {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        _: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        adjacent(map, cursor, Direction::CARDINAL, out);
    }

    fn label(&self) -> &'static str {
        "4-Directional"
    }

    fn explanation(&self) -> &'static str {
        "Traversable cells to the north, east, south and west. Works best with the Manhattan \
         heuristic."
    }
}

/// The four cardinal directions, then the four diagonals.
///
/// Diagonal moves are allowed even when both orthogonal cells beside them are blocked.
#[derive(Clone, Copy, Debug, Default)]
pub struct EightDirections;

impl NeighborStrategy for EightDirections {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        _: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        adjacent(map, cursor, Direction::CARDINAL, out);
        adjacent(map, cursor, Direction::DIAGONAL, out);
    }

    fn label(&self) -> &'static str {
        "8-Directional"
    }

    fn explanation(&self) -> &'static str {
        "Diagonally adjacent cells as well as the four cardinal ones. Works best with the \
         Euclidean or diagonal heuristics; with Manhattan a diagonal step counts as 2."
    }
}

impl<N: NeighborStrategy + ?Sized> NeighborStrategy for Arc<N> {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        distance: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        (**self).neighbors(map, cursor, distance, out)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn explanation(&self) -> &'static str {
        (**self).explanation()
    }
}

impl<N: NeighborStrategy + ?Sized> NeighborStrategy for Box<N> {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        distance: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        (**self).neighbors(map, cursor, distance, out)
    }

    fn label(&self) -> &'static str {
        (**self).label()
    }

    fn explanation(&self) -> &'static str {
        (**self).explanation()
    }
}

/// The built-in neighbor strategies as a closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    FourDirections,
    EightDirections,
    RayCast,
}

static RAY_CAST: RayCast = RayCast::new();

impl Topology {
    pub const ALL: [Topology; 3] = [
        Topology::FourDirections,
        Topology::EightDirections,
        Topology::RayCast,
    ];

    fn strategy(self) -> &'static dyn NeighborStrategy {
        match self {
            Topology::FourDirections => &FourDirections,
            Topology::EightDirections => &EightDirections,
            Topology::RayCast => &RAY_CAST,
        }
    }
}

impl NeighborStrategy for Topology {
    fn neighbors(
        &self,
        map: &GridMap,
        cursor: Coord,
        distance: &dyn DistanceStrategy,
        out: &mut Vec<Point>,
    ) {
        self.strategy().neighbors(map, cursor, distance, out)
    }

    fn label(&self) -> &'static str {
        self.strategy().label()
    }

    fn explanation(&self) -> &'static str {
        self.strategy().explanation()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Topology {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, UnknownName> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "4" | "four" | "4directional" | "fourdirections" => Ok(Topology::FourDirections),
            "8" | "eight" | "8directional" | "eightdirections" => Ok(Topology::EightDirections),
            "raycast" | "jumppoint" | "rays" => Ok(Topology::RayCast),
            _ => Err(UnknownName {
                kind: "topology",
                name: s.to_owned(),
            }),
        }
    }
}
