#![warn(missing_debug_implementations)]
//! Core types and utilities for `gridstar`.
//!
//! This crate provides the search point type, the arena that stores expanded points, and the
//! binary heap used as an open list.

mod node;
mod node_pool;
mod pqueue;

pub use crate::node::*;
pub use crate::node_pool::*;
pub use crate::pqueue::*;
