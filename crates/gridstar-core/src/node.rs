use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A cell coordinate on a grid map.
///
/// Rows grow downwards and columns grow to the right. Coordinates are signed so that strategies
/// can step off the edge of a map and test the result with a bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[inline(always)]
    pub const fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }

    #[inline(always)]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Coord {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// Index of a point stored in a [`NodePool`](crate::NodePool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A search point: a coordinate together with its path costs and a link to the point it was
/// reached from.
///
/// Equality and hashing consider only the coordinate. Two points at the same cell are equal even
/// when their costs differ, which is what lets the open and closed sets answer "has this cell
/// been seen" questions. Cost ordering is a separate concern, see [`Point::cmp_cost`].
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub coord: Coord,
    /// Accumulated cost from the start (g).
    pub from_cost: f64,
    /// Estimated remaining cost to the goal (h).
    pub to_cost: f64,
    /// The expanded point this one was reached from, `None` for the start.
    pub parent: Option<NodeId>,
}

impl Point {
    pub const fn new(coord: Coord) -> Self {
        Point {
            coord,
            from_cost: 0.0,
            to_cost: 0.0,
            parent: None,
        }
    }

    pub const fn at(row: i32, col: i32) -> Self {
        Point::new(Coord::new(row, col))
    }

    #[inline(always)]
    pub fn row(&self) -> i32 {
        self.coord.row
    }

    #[inline(always)]
    pub fn col(&self) -> i32 {
        self.coord.col
    }

    /// Total cost (f = g + h).
    #[inline(always)]
    pub fn total_cost(&self) -> f64 {
        self.from_cost + self.to_cost
    }

    /// Orders points by total cost only.
    ///
    /// Points with equal total cost compare `Equal` whatever their coordinates are. NaN costs
    /// compare `Equal` to everything.
    pub fn cmp_cost(&self, other: &Point) -> Ordering {
        self.total_cost()
            .partial_cmp(&other.total_cost())
            .unwrap_or(Ordering::Equal)
    }
}

impl From<Coord> for Point {
    fn from(coord: Coord) -> Self {
        Point::new(coord)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

impl PartialEq<Coord> for Point {
    fn eq(&self, other: &Coord) -> bool {
        self.coord == *other
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.coord.fmt(f)
    }
}
