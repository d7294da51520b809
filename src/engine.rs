use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use crate::grid::{DistanceStrategy, GridMap, NeighborStrategy};
use crate::{
    Coord, NodePool, Point, PriorityQueue, Relaxation, SearchConfig, SearchError, TotalCost,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    CompletedFound,
    CompletedNotFound,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Status::Running => "running",
            Status::CompletedFound => "path found",
            Status::CompletedNotFound => "no path",
        })
    }
}

/// An A* search over a [`GridMap`] that can be advanced one expansion at a time.
///
/// Every call to [`step`](Self::step) expands at most one cell, so a driver can inspect the open
/// and closed sets, the cursor and the partial path between calls. [`solve`](Self::solve) just
/// steps until the search ends.
///
/// Setters change a pending configuration which only takes effect on the next reset. A search in
/// progress always runs to completion with the settings it started with.
#[derive(Debug)]
pub struct SearchEngine {
    map: GridMap,
    pending: SearchConfig,
    config: SearchConfig,
    status: Status,
    open: PriorityQueue<Point, TotalCost>,
    closed: NodePool,
    best_g: AHashMap<Coord, f64>,
    cursor: Option<Point>,
    tail: Point,
    steps: usize,
    rng: Pcg64,
    candidates: Vec<Point>,
}

impl SearchEngine {
    pub fn new(map: GridMap) -> Self {
        Self::with_config(map, SearchConfig::default())
    }

    pub fn with_config(map: GridMap, config: SearchConfig) -> Self {
        let start = Point::new(map.start());
        let mut engine = SearchEngine {
            map,
            pending: config.clone(),
            rng: Pcg64::seed_from_u64(config.shuffle_seed),
            config,
            status: Status::Running,
            open: PriorityQueue::new(TotalCost),
            closed: NodePool::new(),
            best_g: AHashMap::new(),
            cursor: None,
            tail: start,
            steps: 0,
            candidates: vec![],
        };
        engine.reset();
        engine
    }

    /// Parses `text` with [`GridMap::parse`] and starts a search over it.
    pub fn from_text(text: &str, config: SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_config(GridMap::parse(text)?, config))
    }

    /// Restarts the search on the current map with the pending configuration.
    pub fn reset(&mut self) {
        self.config = self.pending.clone();
        self.map.set_endpoints_swapped(self.config.swap_endpoints);
        self.rng = Pcg64::seed_from_u64(self.config.shuffle_seed);

        let start = Point::new(self.map.start());
        self.status = Status::Running;
        self.cursor = None;
        self.tail = start;
        self.steps = 0;
        self.open.clear();
        self.closed.reset();
        self.best_g.clear();
        self.best_g.insert(start.coord, 0.0);
        self.open.push(start);

        debug!(
            "reset: {} {} {} dijkstra={} shuffle={}",
            self.map.summary(),
            self.config.heuristic.label(),
            self.config.neighbors.label(),
            self.config.dijkstra,
            self.config.shuffle,
        );
    }

    /// Restarts the search on a new map, keeping the pending configuration.
    pub fn reset_with_map(&mut self, map: GridMap) {
        self.map = map;
        self.reset();
    }

    /// Restarts the search on a new map with new strategies.
    pub fn reset_with<D, N>(&mut self, map: GridMap, heuristic: D, neighbors: N)
    where
        D: DistanceStrategy + 'static,
        N: NeighborStrategy + 'static,
    {
        self.pending.heuristic = Arc::new(heuristic);
        self.pending.neighbors = Arc::new(neighbors);
        self.reset_with_map(map);
    }

    /// Expands one cell. Does nothing once the search has ended.
    pub fn step(&mut self) -> Status {
        if self.status.is_terminal() {
            return self.status;
        }
        self.steps += 1;
        self.status = self.expand();
        match self.status {
            Status::Running => {}
            Status::CompletedFound => debug!(
                "path found after {} steps, cost {:.3}, {} closed",
                self.steps,
                self.tail.from_cost,
                self.closed.len()
            ),
            Status::CompletedNotFound => debug!(
                "no path after {} steps, {} closed",
                self.steps,
                self.closed.len()
            ),
        }
        self.status
    }

    fn expand(&mut self) -> Status {
        let cursor = loop {
            let Some(point) = self.open.pop() else {
                self.cursor = None;
                return Status::CompletedNotFound;
            };
            // Superseded entries and cells walled off after being queued are dropped here.
            if !self.closed.contains(point.coord) && self.map.is_traversable(point.coord) {
                break point;
            }
        };
        self.cursor = Some(cursor);

        if cursor.coord == self.map.goal() {
            self.tail = cursor;
            return Status::CompletedFound;
        }

        let id = self.closed.insert(cursor);
        trace!(
            "expand {} at {} g={:.3} f={:.3}",
            id,
            cursor.coord,
            cursor.from_cost,
            cursor.total_cost()
        );

        let SearchEngine {
            map,
            config,
            open,
            closed,
            best_g,
            rng,
            candidates,
            ..
        } = self;
        let heuristic = &*config.heuristic;
        let goal = map.goal();

        candidates.clear();
        config.neighbors.neighbors(map, cursor.coord, heuristic, candidates);
        candidates.retain(|p| map.is_traversable(p.coord) && !closed.contains(p.coord));
        for p in candidates.iter_mut() {
            p.from_cost = cursor.from_cost + heuristic.distance(cursor.coord, p.coord);
            p.to_cost = if config.dijkstra {
                0.0
            } else {
                heuristic.distance(p.coord, goal)
            };
            p.parent = Some(id);
        }

        if config.shuffle {
            candidates.shuffle(rng);
        }
        candidates.sort_by(Point::cmp_cost);

        for p in candidates.drain(..) {
            match config.relaxation {
                Relaxation::FirstSeen => {
                    if !open.contains(&p) {
                        open.push(p);
                    }
                }
                Relaxation::LazyDeletion => {
                    let best = best_g.entry(p.coord).or_insert(f64::INFINITY);
                    if p.from_cost < *best {
                        *best = p.from_cost;
                        open.push(p);
                    }
                }
            }
        }

        Status::Running
    }

    /// Steps until the search ends.
    pub fn solve(&mut self) -> Status {
        while !self.step().is_terminal() {}
        self.status
    }

    /// Steps until the search ends or `max_steps` expansions have been made by this call.
    pub fn solve_within(&mut self, max_steps: usize) -> Status {
        for _ in 0..max_steps {
            if self.step().is_terminal() {
                break;
            }
        }
        self.status
    }

    /// The path ending at the tail, goal first and start last.
    ///
    /// Until the goal is found the tail is the start, so this is a single point.
    pub fn path(&self) -> Vec<Point> {
        self.closed
            .path_from(&self.tail)
            .expect("tail only links to expanded cells")
    }

    /// The path ending at `point`, `point` first and start last.
    ///
    /// `point` should come from this search, for example a member of the open or closed set.
    pub fn path_from(&self, point: &Point) -> Result<Vec<Point>, SearchError> {
        self.closed.path_from(point).map_err(SearchError::UnknownNode)
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn start(&self) -> Coord {
        self.map.start()
    }

    pub fn goal(&self) -> Coord {
        self.map.goal()
    }

    /// The most recently expanded point.
    pub fn cursor(&self) -> Option<&Point> {
        self.cursor.as_ref()
    }

    /// The goal point once found, otherwise the start point.
    pub fn tail(&self) -> &Point {
        &self.tail
    }

    /// The open list in heap order. May contain stale entries for already expanded cells.
    ///
    /// Candidates that were blocked or already expanded when generated are never queued, so
    /// they do not appear here.
    pub fn open_set(&self) -> &[Point] {
        self.open.as_slice()
    }

    /// Expanded points in expansion order.
    pub fn closed_set(&self) -> &[Point] {
        self.closed.as_slice()
    }

    pub fn is_closed(&self, coord: Coord) -> bool {
        self.closed.contains(coord)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of steps taken since the last reset, counting only calls that found the search
    /// running.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The configuration of the search in progress.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The configuration the next reset will use.
    pub fn pending_config(&self) -> &SearchConfig {
        &self.pending
    }

    pub fn set_heuristic<D: DistanceStrategy + 'static>(&mut self, heuristic: D) {
        self.pending.heuristic = Arc::new(heuristic);
    }

    pub fn set_neighbors<N: NeighborStrategy + 'static>(&mut self, neighbors: N) {
        self.pending.neighbors = Arc::new(neighbors);
    }

    pub fn set_dijkstra(&mut self, dijkstra: bool) {
        self.pending.dijkstra = dijkstra;
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.pending.shuffle = shuffle;
    }

    pub fn set_shuffle_seed(&mut self, seed: u64) {
        self.pending.shuffle_seed = seed;
    }

    pub fn set_relaxation(&mut self, relaxation: Relaxation) {
        self.pending.relaxation = relaxation;
    }

    /// Search from the map's goal to its start after the next reset.
    pub fn set_endpoints_swapped(&mut self, swapped: bool) {
        self.pending.swap_endpoints = swapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{EightDirections, Heuristic, Octile, Topology};

    fn engine(text: &str) -> SearchEngine {
        SearchEngine::from_text(text, SearchConfig::default()).unwrap()
    }

    #[test]
    fn first_step_expands_the_start() {
        let mut search = engine("S..\n...\n..G");
        assert_eq!(search.status(), Status::Running);
        assert_eq!(search.open_set().len(), 1);
        assert!(search.cursor().is_none());

        assert_eq!(search.step(), Status::Running);
        assert_eq!(search.cursor().unwrap().coord, Coord::new(0, 0));
        assert_eq!(search.closed_set().len(), 1);
        assert!(search.is_closed(Coord::new(0, 0)));
        // east and south, each at g = 1 and h = 3
        assert_eq!(search.open_set().len(), 2);
        for p in search.open_set() {
            assert_eq!(p.from_cost, 1.0);
            assert_eq!(p.total_cost(), 4.0);
            assert_eq!(p.parent.map(|id| id.index()), Some(0));
        }
    }

    #[test]
    fn path_runs_from_goal_to_start() {
        let mut search = engine("S..\n...\n..G");
        assert_eq!(search.path().len(), 1);
        assert_eq!(search.solve(), Status::CompletedFound);

        let path = search.path();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0].coord, Coord::new(2, 2));
        assert_eq!(path[4].coord, Coord::new(0, 0));
        assert_eq!(path[0].total_cost(), 4.0);
        for pair in path.windows(2) {
            let [a, b] = pair else { unreachable!() };
            assert_eq!(a.from_cost, b.from_cost + 1.0);
        }
        assert_eq!(search.tail().coord, search.goal());
        assert_eq!(search.cursor().unwrap().coord, search.goal());
    }

    #[test]
    fn terminal_steps_change_nothing() {
        let mut search = engine("S#G");
        assert_eq!(search.solve(), Status::CompletedNotFound);
        let steps = search.steps();
        assert!(search.cursor().is_none());
        assert_eq!(search.step(), Status::CompletedNotFound);
        assert_eq!(search.steps(), steps);
    }

    #[test]
    fn solve_within_stops_early() {
        let mut search = engine("S....\n.....\n.....\n....G");
        assert_eq!(search.solve_within(2), Status::Running);
        assert_eq!(search.steps(), 2);
        assert_eq!(search.solve_within(1000), Status::CompletedFound);
        assert!(search.steps() < 1000);
    }

    #[test]
    fn settings_wait_for_reset() {
        let mut search = engine("S..\n...\n..G");
        search.step();
        search.set_dijkstra(true);
        search.set_heuristic(Octile);
        search.set_neighbors(EightDirections);
        assert!(!search.config().dijkstra);
        assert!(search.pending_config().dijkstra);
        assert_eq!(search.config().heuristic.label(), "Manhattan");
        assert_eq!(search.steps(), 1);

        search.reset();
        assert!(search.config().dijkstra);
        assert_eq!(search.config().neighbors.label(), "8-Directional");
        assert_eq!(search.steps(), 0);
        assert_eq!(search.solve(), Status::CompletedFound);
        // one diagonal move per step
        assert_eq!(search.path().len(), 3);
    }

    #[test]
    fn reset_with_replaces_map_and_strategies() {
        let mut search = engine("S.G");
        search.solve();
        let map = GridMap::parse("S...\n....\n...G").unwrap();
        search.reset_with(map, Heuristic::Chebyshev, Topology::EightDirections);
        assert_eq!(search.status(), Status::Running);
        assert_eq!(search.goal(), Coord::new(2, 3));
        assert_eq!(search.config().heuristic.label(), "Chebyshev");
        assert_eq!(search.solve(), Status::CompletedFound);
        assert_eq!(search.path()[0].from_cost, 3.0);
    }

    #[test]
    fn foreign_points_are_rejected() {
        let mut search = engine("S..\n...\n..G");
        search.solve();
        let mut stranger = Point::at(1, 1);
        stranger.parent = search.closed_set()[1].parent;
        assert_eq!(search.path_from(&stranger).unwrap().len(), 2);

        // the goal's parent here is the 29th expansion, far more than the 3x3 search made
        let mut other = engine("S............................G");
        other.solve();
        let far = other.path()[0];
        assert!(matches!(
            search.path_from(&far),
            Err(SearchError::UnknownNode(_))
        ));
    }

    #[test]
    fn open_entries_carry_costs_of_the_active_heuristic() {
        let config = SearchConfig::default().with_dijkstra(true);
        let mut search = SearchEngine::from_text("S..\n...\n..G", config).unwrap();
        search.step();
        assert!(search.open_set().iter().all(|p| p.to_cost == 0.0));
    }
}
