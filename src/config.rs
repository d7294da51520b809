use std::fmt;
use std::sync::Arc;

use crate::grid::{DistanceStrategy, FourDirections, Manhattan, NeighborStrategy};

/// How a search treats a cell that is rediscovered while it is still waiting in the open list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Relaxation {
    /// A cell is pushed only if no entry for it is currently in the open list. The first route
    /// found to a cell is the one it keeps, even if a cheaper one turns up before it is expanded.
    FirstSeen,
    /// A cell is pushed again whenever a strictly cheaper route to it is found. The dearer entry
    /// stays in the open list and is dropped when popped, because by then the cell is closed.
    ///
    /// Required for Dijkstra mode to return minimum-cost paths when moves have different costs.
    #[default]
    LazyDeletion,
}

/// Settings for a [`SearchEngine`](crate::SearchEngine).
#[derive(Clone)]
pub struct SearchConfig {
    /// Edge cost and goal estimate.
    pub heuristic: Arc<dyn DistanceStrategy>,
    /// Successor selection.
    pub neighbors: Arc<dyn NeighborStrategy>,
    /// Ignore the goal estimate (h = 0), turning the search into Dijkstra's algorithm.
    pub dijkstra: bool,
    /// Randomize candidate order before the cost sort, so equal-cost candidates are not always
    /// tried in direction order.
    pub shuffle: bool,
    /// Seed for the shuffle.
    pub shuffle_seed: u64,
    pub relaxation: Relaxation,
    /// Search from the map's goal to its start.
    pub swap_endpoints: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            heuristic: Arc::new(Manhattan),
            neighbors: Arc::new(FourDirections),
            dijkstra: false,
            shuffle: false,
            shuffle_seed: 0,
            relaxation: Relaxation::default(),
            swap_endpoints: false,
        }
    }
}

impl SearchConfig {
    pub fn with_heuristic<D: DistanceStrategy + 'static>(mut self, heuristic: D) -> Self {
        self.heuristic = Arc::new(heuristic);
        self
    }

    pub fn with_neighbors<N: NeighborStrategy + 'static>(mut self, neighbors: N) -> Self {
        self.neighbors = Arc::new(neighbors);
        self
    }

    pub fn with_dijkstra(mut self, dijkstra: bool) -> Self {
        self.dijkstra = dijkstra;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool, seed: u64) -> Self {
        self.shuffle = shuffle;
        self.shuffle_seed = seed;
        self
    }

    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_swapped_endpoints(mut self, swap: bool) -> Self {
        self.swap_endpoints = swap;
        self
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("heuristic", &self.heuristic.label())
            .field("neighbors", &self.neighbors.label())
            .field("dijkstra", &self.dijkstra)
            .field("shuffle", &self.shuffle)
            .field("shuffle_seed", &self.shuffle_seed)
            .field("relaxation", &self.relaxation)
            .field("swap_endpoints", &self.swap_endpoints)
            .finish()
    }
}
