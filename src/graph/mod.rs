//! The in-memory graph store.
//!
//! [`Graph`] owns the node table and two eagerly maintained adjacency
//! indexes: forward (`src -> type -> {dst}`) and reverse
//! (`dst -> type -> {src}`). Every mutation keeps the two indexes mirror
//! consistent, so per-step traversal stays proportional to the neighbors of
//! the requested type and the engine never scans the full edge set.
//!
//! Iteration over nodes and neighbors follows insertion order, which keeps
//! query results deterministic for a given mutation history.

mod algorithms;

pub use algorithms::{PathEnumeration, PathResult, SubgraphExpansion};

use indexmap::{IndexMap, IndexSet};

use crate::error::{GraphError, Result};
use crate::model::{Edge, EdgeDirection, Node, NodeId, NodeRecord};

type AdjacencyIndex = IndexMap<NodeId, IndexMap<String, IndexSet<NodeId>>>;

/// A labelled multigraph with typed directed edges and arbitrary-property
/// nodes.
///
/// The store is generic over its node payload; anything implementing
/// [`NodeRecord`] works, with [`Node`] as the canonical choice.
///
/// # Examples
///
/// ```rust
/// use tessera::{Graph, Node};
///
/// let mut graph = Graph::new();
/// graph.add_node(Node::new("a", "Package", "core"));
/// graph.add_node(Node::new("b", "Package", "app"));
/// graph.add_edge("b", "DEPENDS_ON", "a")?;
/// assert!(graph.has_edge("b", "DEPENDS_ON", "a"));
/// # Ok::<(), tessera::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Graph<N: NodeRecord = Node> {
    nodes: IndexMap<NodeId, N>,
    out: AdjacencyIndex,
    rev: AdjacencyIndex,
    edge_count: usize,
}

impl<N: NodeRecord> Default for Graph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeRecord> Graph<N> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            out: IndexMap::new(),
            rev: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Inserts a node, replacing any existing node with the same id.
    ///
    /// Replacement keeps incident edges: only the payload changes.
    pub fn add_node(&mut self, node: N) {
        self.nodes.insert(node.id().to_owned(), node);
    }

    /// Removes a node and every edge incident to it. No-op when absent.
    pub fn remove_node(&mut self, id: &str) {
        if self.nodes.shift_remove(id).is_none() {
            return;
        }
        if let Some(by_type) = self.out.shift_remove(id) {
            for (edge_type, dsts) in by_type {
                self.edge_count -= dsts.len();
                for dst in dsts {
                    Self::unindex(&mut self.rev, &dst, &edge_type, id);
                }
            }
        }
        if let Some(by_type) = self.rev.shift_remove(id) {
            for (edge_type, srcs) in by_type {
                self.edge_count -= srcs.len();
                for src in srcs {
                    Self::unindex(&mut self.out, &src, &edge_type, id);
                }
            }
        }
    }

    /// Adds a directed typed edge.
    ///
    /// Fails with [`GraphError::UnknownNode`] when either endpoint is
    /// missing; adding the same triple twice is a no-op.
    pub fn add_edge(&mut self, src: &str, edge_type: &str, dst: &str) -> Result<()> {
        if !self.nodes.contains_key(src) {
            return Err(GraphError::unknown_node(src));
        }
        if !self.nodes.contains_key(dst) {
            return Err(GraphError::unknown_node(dst));
        }
        let inserted = self
            .out
            .entry(src.to_owned())
            .or_default()
            .entry(edge_type.to_owned())
            .or_default()
            .insert(dst.to_owned());
        if inserted {
            self.rev
                .entry(dst.to_owned())
                .or_default()
                .entry(edge_type.to_owned())
                .or_default()
                .insert(src.to_owned());
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Removes an edge triple. No-op when absent.
    pub fn remove_edge(&mut self, src: &str, edge_type: &str, dst: &str) {
        if Self::unindex(&mut self.out, src, edge_type, dst) {
            Self::unindex(&mut self.rev, dst, edge_type, src);
            self.edge_count -= 1;
        }
    }

    /// Returns true when the exact triple exists.
    pub fn has_edge(&self, src: &str, edge_type: &str, dst: &str) -> bool {
        self.out
            .get(src)
            .and_then(|by_type| by_type.get(edge_type))
            .is_some_and(|dsts| dsts.contains(dst))
    }

    /// Destinations of outgoing edges from `src`.
    ///
    /// With `edge_type` set, only that type's destinations; otherwise the
    /// union over all types, in adjacency insertion order.
    pub fn out_neighbors(&self, src: &str, edge_type: Option<&str>) -> IndexSet<NodeId> {
        Self::neighbor_set(&self.out, src, edge_type)
    }

    /// Sources of incoming edges to `dst`; symmetric to [`Self::out_neighbors`].
    pub fn in_neighbors(&self, dst: &str, edge_type: Option<&str>) -> IndexSet<NodeId> {
        Self::neighbor_set(&self.rev, dst, edge_type)
    }

    /// Looks up a node payload by id.
    pub fn node(&self, id: &str) -> Option<&N> {
        self.nodes.get(id)
    }

    /// Returns true when the id names a stored node.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of stored nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edge triples.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Node payloads in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.values()
    }

    /// Nodes whose type name equals `type_name`, in insertion order.
    pub fn nodes_by_type(&self, type_name: &str) -> Vec<&N> {
        self.nodes
            .values()
            .filter(|node| node.type_name() == type_name)
            .collect()
    }

    /// Every edge triple, grouped by source in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (src, by_type) in &self.out {
            for (edge_type, dsts) in by_type {
                for dst in dsts {
                    edges.push(Edge::new(src.clone(), edge_type.clone(), dst.clone()));
                }
            }
        }
        edges
    }

    /// Edge count per type across the whole graph.
    pub fn edge_type_counts(&self) -> std::collections::BTreeMap<String, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for by_type in self.out.values() {
            for (edge_type, dsts) in by_type {
                *counts.entry(edge_type.clone()).or_insert(0) += dsts.len();
            }
        }
        counts
    }

    /// Degree of a node in the requested direction.
    pub fn degree(&self, id: &str, direction: EdgeDirection) -> usize {
        let count = |index: &AdjacencyIndex| {
            index
                .get(id)
                .map(|by_type| by_type.values().map(IndexSet::len).sum())
                .unwrap_or(0)
        };
        match direction {
            EdgeDirection::Outgoing => count(&self.out),
            EdgeDirection::Incoming => count(&self.rev),
            EdgeDirection::Both => count(&self.out) + count(&self.rev),
        }
    }

    /// Enumerates neighbor steps from `id` with the concrete edge traversed.
    ///
    /// An empty `types` slice means any edge type. For
    /// [`EdgeDirection::Both`] the forward index is consulted first and
    /// duplicate steps are collapsed.
    pub(crate) fn neighbor_steps(
        &self,
        id: &str,
        types: &[String],
        direction: EdgeDirection,
    ) -> Vec<(Edge, NodeId)> {
        let mut steps = Vec::new();
        if matches!(direction, EdgeDirection::Outgoing | EdgeDirection::Both) {
            self.collect_steps(&self.out, id, types, false, &mut steps);
        }
        if matches!(direction, EdgeDirection::Incoming | EdgeDirection::Both) {
            self.collect_steps(&self.rev, id, types, true, &mut steps);
        }
        if matches!(direction, EdgeDirection::Both) {
            let mut seen = IndexSet::new();
            steps.retain(|step| seen.insert(step.clone()));
        }
        steps
    }

    fn collect_steps(
        &self,
        index: &AdjacencyIndex,
        id: &str,
        types: &[String],
        reversed: bool,
        steps: &mut Vec<(Edge, NodeId)>,
    ) {
        let Some(by_type) = index.get(id) else {
            return;
        };
        let mut push = |edge_type: &str, others: &IndexSet<NodeId>| {
            for other in others {
                let edge = if reversed {
                    Edge::new(other.clone(), edge_type, id)
                } else {
                    Edge::new(id, edge_type, other.clone())
                };
                steps.push((edge, other.clone()));
            }
        };
        if types.is_empty() {
            for (edge_type, others) in by_type {
                push(edge_type, others);
            }
        } else {
            for edge_type in types {
                if let Some(others) = by_type.get(edge_type) {
                    push(edge_type, others);
                }
            }
        }
    }

    fn neighbor_set(index: &AdjacencyIndex, id: &str, edge_type: Option<&str>) -> IndexSet<NodeId> {
        let Some(by_type) = index.get(id) else {
            return IndexSet::new();
        };
        match edge_type {
            Some(edge_type) => by_type.get(edge_type).cloned().unwrap_or_default(),
            None => by_type.values().flatten().cloned().collect(),
        }
    }

    fn unindex(index: &mut AdjacencyIndex, from: &str, edge_type: &str, to: &str) -> bool {
        let Some(by_type) = index.get_mut(from) else {
            return false;
        };
        let Some(others) = by_type.get_mut(edge_type) else {
            return false;
        };
        let removed = others.shift_remove(to);
        if others.is_empty() {
            by_type.shift_remove(edge_type);
        }
        if by_type.is_empty() {
            index.shift_remove(from);
        }
        removed
    }
}
