use ahash::AHashMap;

use crate::node::{Coord, NodeId, Point};

/// Arena of expanded points, indexed both by [`NodeId`] and by coordinate.
///
/// A search inserts each point it expands exactly once, so the pool doubles as the closed set.
/// Parent links of stored points are ids into the same pool, which keeps path reconstruction
/// free of references.
#[derive(Clone, Debug, Default)]
pub struct NodePool {
    nodes: Vec<Point>,
    map: AHashMap<Coord, NodeId>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
        self.map.clear();
    }

    /// Stores a point and returns its id.
    ///
    /// If a point with the same coordinate is already stored, the stored point is kept and its id
    /// is returned.
    #[track_caller]
    pub fn insert(&mut self, point: Point) -> NodeId {
        let next = NodeId(
            self.nodes
                .len()
                .try_into()
                .expect("number of nodes exceeds u32::MAX"),
        );
        let nodes = &mut self.nodes;
        *self.map.entry(point.coord).or_insert_with(|| {
            nodes.push(point);
            next
        })
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.map.contains_key(&coord)
    }

    pub fn id_of(&self, coord: Coord) -> Option<NodeId> {
        self.map.get(&coord).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&Point> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Stored points in insertion order.
    pub fn as_slice(&self) -> &[Point] {
        &self.nodes
    }

    /// Walks parent links starting at `point`.
    ///
    /// The returned path starts with `point` itself and ends with the first point that has no
    /// parent. If a link refers to an id this pool never handed out, that id is returned as the
    /// error.
    pub fn path_from(&self, point: &Point) -> Result<Vec<Point>, NodeId> {
        let mut path = vec![*point];
        let mut next = point.parent;
        while let Some(id) = next {
            let node = self.get(id).ok_or(id)?;
            path.push(*node);
            next = node.parent;
        }
        Ok(path)
    }
}
