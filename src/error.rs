use thiserror::Error;

use crate::grid::GridError;
use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A point's parent link refers to a node this engine never expanded, usually because the
    /// point came from another engine or from before a reset.
    #[error("point links to node {0}, which this search has not expanded")]
    UnknownNode(NodeId),

    #[error(transparent)]
    Grid(#[from] GridError),
}
