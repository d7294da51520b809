//! Step-wise A* and Dijkstra search on 2D grids.
//!
//! A [`SearchEngine`] owns a [`grid::GridMap`] and advances one expansion per
//! [`step`](SearchEngine::step), exposing its open set, closed set and cursor between steps so
//! a front end can animate the search.

#![warn(missing_debug_implementations)]

mod config;
mod engine;
mod error;

pub use gridstar_core::*;
pub use gridstar_grid as grid;

pub use self::config::*;
pub use self::engine::*;
pub use self::error::*;
