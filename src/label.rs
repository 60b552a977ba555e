//! Labels, the partial-path records the search extends, and the arena that owns them.
//!
//! Labels are append-only: once created a label never mutates, and its predecessor link makes
//! the arena a forest. Reconstructing a path is a backward walk from a leaf label to a root.

use fixedbitset::FixedBitSet;

use crate::graph::{EdgeId, VertexId};
use crate::resources::ResourceVector;

pub type LabelId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A partial path ending (forward) or starting (backward) at `vertex`, with accumulated cost
/// and resource consumption.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub vertex: VertexId,
    pub cost: f64,
    pub resources: ResourceVector,
    pub direction: Direction,
    pub predecessor: Option<LabelId>,
    /// The edge traversed to reach this label from its predecessor; `None` for a root label.
    pub generating_edge: Option<EdgeId>,
    /// Visited-vertex mask, present only when elementarity enforcement is enabled.
    pub visited: Option<FixedBitSet>,
}

impl Label {
    pub(crate) fn root(vertex: VertexId, resources: ResourceVector, direction: Direction) -> Self {
        Self {
            vertex,
            cost: 0.0,
            resources,
            direction,
            predecessor: None,
            generating_edge: None,
            visited: None,
        }
    }
}

/// Append-only storage for labels, indexed by a plain integer id.
///
/// Grounded on the teacher's slab-style arenas: no removal is needed here (dominated labels are
/// simply never expanded further, not freed), so a flat `Vec` is simpler than a generational
/// slot map and just as fast to index.
#[derive(Default)]
pub(crate) struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub(crate) fn new() -> Self {
        Self { labels: Vec::new() }
    }

    pub(crate) fn push(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        self.labels.len() - 1
    }

    pub(crate) fn get(&self, id: LabelId) -> &Label {
        &self.labels[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Walks predecessor links from `leaf` back to its root, returning vertices in the order
    /// they were visited by *this label's own direction* (root first).
    pub(crate) fn vertex_chain(&self, leaf: LabelId) -> Vec<VertexId> {
        let mut chain = Vec::new();
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let label = self.get(id);
            chain.push(label.vertex);
            cursor = label.predecessor;
        }
        chain.reverse();
        chain
    }

    /// Walks predecessor links from `leaf` back to its root, returning the edges traversed in
    /// the order they were traversed by *this label's own direction* (root-to-leaf order).
    pub(crate) fn edge_chain(&self, leaf: LabelId) -> Vec<EdgeId> {
        let mut chain = Vec::new();
        let mut cursor = Some(leaf);
        while let Some(id) = cursor {
            let label = self.get(id);
            if let Some(edge) = label.generating_edge {
                chain.push(edge);
            }
            cursor = label.predecessor;
        }
        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Label, LabelArena};
    use crate::graph::EdgeId;
    use crate::resources::ResourceVector;

    #[test]
    fn chains_reconstruct_root_to_leaf() {
        let mut arena = LabelArena::new();
        let root = arena.push(Label::root(0, ResourceVector::zero(1), Direction::Forward));
        let mut child = Label::root(1, ResourceVector::zero(1), Direction::Forward);
        child.predecessor = Some(root);
        child.generating_edge = Some(EdgeId(7));
        let leaf = arena.push(child);

        assert_eq!(arena.vertex_chain(leaf), vec![0, 1]);
        assert_eq!(arena.edge_chain(leaf), vec![EdgeId(7)]);
    }
}
