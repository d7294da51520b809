use std::fmt;
use std::str::FromStr;

use gridstar_core::Coord;

use crate::{Endpoint, Grid, GridError};

/// A traversability map with a start and a goal.
///
/// The obstacle table uses `true` for cells that cannot be entered. Every constructor checks
/// that both endpoints lie on traversable cells inside the table, and edits through
/// [`GridMap::set_traversable`] keep that invariant, so a search never has to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    obstacles: Grid<bool>,
    start: Coord,
    goal: Coord,
    seed: u64,
    endpoints_swapped: bool,
}

impl GridMap {
    /// Builds a map from an obstacle table.
    ///
    /// `seed` is an opaque tag describing where the map came from; the search never reads it.
    pub fn new(
        obstacles: Grid<bool>,
        start: Coord,
        goal: Coord,
        seed: u64,
    ) -> Result<Self, GridError> {
        if obstacles.rows() == 0 || obstacles.cols() == 0 {
            return Err(GridError::Empty);
        }
        let map = GridMap {
            obstacles,
            start,
            goal,
            seed,
            endpoints_swapped: false,
        };
        map.check_endpoint(Endpoint::Start, start)?;
        map.check_endpoint(Endpoint::Goal, goal)?;
        Ok(map)
    }

    /// Builds a map with no obstacles.
    pub fn open(rows: i32, cols: i32, start: Coord, goal: Coord) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::Empty);
        }
        Self::new(Grid::new(rows, cols, |_| false), start, goal, 0)
    }

    /// Builds a map from rows of obstacle flags.
    pub fn from_rows<R: AsRef<[bool]>>(
        rows: &[R],
        start: Coord,
        goal: Coord,
        seed: u64,
    ) -> Result<Self, GridError> {
        let obstacles = table_from_rows(rows, |blocked: &bool| *blocked)?;
        Self::new(obstacles, start, goal, seed)
    }

    /// Builds a map from rows of integers where `0` is traversable and anything else is an
    /// obstacle.
    pub fn from_int_rows<R: AsRef<[i32]>>(
        rows: &[R],
        start: Coord,
        goal: Coord,
        seed: u64,
    ) -> Result<Self, GridError> {
        let obstacles = table_from_rows(rows, |v: &i32| *v != 0)?;
        Self::new(obstacles, start, goal, seed)
    }

    /// Parses a map drawn as text, one row per line.
    ///
    /// `.` is open ground, `S` and `G` mark the start and the goal (both on open ground), and
    /// `#`, `@`, `T`, `O` or `W` are obstacles. Blank lines and surrounding whitespace are
    /// ignored.
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut start = None;
        let mut goal = None;
        let mut rows = vec![];

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = rows.len();
            let mut cells = vec![];
            for (col, ch) in line.chars().enumerate() {
                let here = Coord::new(row as i32, col as i32);
                let blocked = match ch {
                    '.' => false,
                    'S' => {
                        mark(&mut start, Endpoint::Start, here)?;
                        false
                    }
                    'G' => {
                        mark(&mut goal, Endpoint::Goal, here)?;
                        false
                    }
                    '#' | '@' | 'T' | 'O' | 'W' => true,
                    _ => return Err(GridError::UnknownTile { ch, row, col }),
                };
                cells.push(blocked);
            }
            rows.push(cells);
        }

        if rows.is_empty() {
            return Err(GridError::Empty);
        }
        let start = start.ok_or(GridError::MissingEndpoint(Endpoint::Start))?;
        let goal = goal.ok_or(GridError::MissingEndpoint(Endpoint::Goal))?;
        Self::from_rows(&rows, start, goal, 0)
    }

    #[inline(always)]
    pub fn rows(&self) -> i32 {
        self.obstacles.rows()
    }

    #[inline(always)]
    pub fn cols(&self) -> i32 {
        self.obstacles.cols()
    }

    #[inline(always)]
    pub fn contains(&self, coord: Coord) -> bool {
        self.obstacles.contains(coord)
    }

    /// Whether `coord` is inside the map and free of obstacles.
    #[inline(always)]
    pub fn is_traversable(&self, coord: Coord) -> bool {
        self.obstacles.get(coord).is_some_and(|&blocked| !blocked)
    }

    /// Changes the traversability of one cell.
    ///
    /// Blocking a cell that currently holds an endpoint is refused.
    pub fn set_traversable(&mut self, coord: Coord, traversable: bool) -> Result<(), GridError> {
        let (rows, cols) = (self.rows(), self.cols());
        if !traversable {
            for (endpoint, at) in [(Endpoint::Start, self.start), (Endpoint::Goal, self.goal)] {
                if at == coord {
                    return Err(GridError::EndpointBlocked { endpoint, coord });
                }
            }
        }
        let cell = self
            .obstacles
            .get_mut(coord)
            .ok_or(GridError::OutOfBounds { coord, rows, cols })?;
        *cell = !traversable;
        Ok(())
    }

    /// The cell the search starts from, honoring the endpoint swap.
    pub fn start(&self) -> Coord {
        if self.endpoints_swapped {
            self.goal
        } else {
            self.start
        }
    }

    /// The cell the search looks for, honoring the endpoint swap.
    pub fn goal(&self) -> Coord {
        if self.endpoints_swapped {
            self.start
        } else {
            self.goal
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn endpoints_swapped(&self) -> bool {
        self.endpoints_swapped
    }

    /// Reports the start as the goal and the goal as the start. The obstacle table is untouched.
    pub fn set_endpoints_swapped(&mut self, swapped: bool) {
        self.endpoints_swapped = swapped;
    }

    pub fn obstacles(&self) -> &Grid<bool> {
        &self.obstacles
    }

    /// One-line description of the map for status displays.
    pub fn summary(&self) -> String {
        format!(
            "Seed:{}   w:{} h:{}   Start:{}, Goal:{}",
            self.seed,
            self.cols(),
            self.rows(),
            self.start(),
            self.goal()
        )
    }

    fn check_endpoint(&self, endpoint: Endpoint, coord: Coord) -> Result<(), GridError> {
        if !self.contains(coord) {
            return Err(GridError::EndpointOutOfBounds {
                endpoint,
                coord,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        if !self.is_traversable(coord) {
            return Err(GridError::EndpointBlocked { endpoint, coord });
        }
        Ok(())
    }
}

fn mark(slot: &mut Option<Coord>, endpoint: Endpoint, here: Coord) -> Result<(), GridError> {
    if let Some(first) = *slot {
        return Err(GridError::DuplicateEndpoint {
            endpoint,
            first,
            second: here,
        });
    }
    *slot = Some(here);
    Ok(())
}

fn table_from_rows<R: AsRef<[T]>, T>(
    rows: &[R],
    mut blocked: impl FnMut(&T) -> bool,
) -> Result<Grid<bool>, GridError> {
    let expected = rows.first().map_or(0, |r| r.as_ref().len());
    if expected == 0 {
        return Err(GridError::Empty);
    }
    for (row, cells) in rows.iter().enumerate() {
        let found = cells.as_ref().len();
        if found != expected {
            return Err(GridError::Ragged {
                row,
                expected,
                found,
            });
        }
    }
    Ok(Grid::new(rows.len() as i32, expected as i32, |c| {
        blocked(&rows[c.row as usize].as_ref()[c.col as usize])
    }))
}

impl FromStr for GridMap {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, GridError> {
        GridMap::parse(s)
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, goal) = (self.start(), self.goal());
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let here = Coord::new(row, col);
                let ch = if here == start {
                    'S'
                } else if here == goal {
                    'G'
                } else if self.obstacles[here] {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
