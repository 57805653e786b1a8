//! Layered layout over matched paths.
//!
//! Treats the union of path edges as a DAG and assigns each node the length
//! of the longest chain from any root. Bound nodes that touch no edge at
//! all (a single-node pattern, for instance) are placed at the median layer
//! of their variable's other bindings so they line up with their siblings.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::model::{Edge, NodeId};
use crate::query::PathMatch;

/// Layer assignment computed from a set of matched paths.
///
/// # Examples
///
/// ```rust
/// use tessera::{Graph, Node, Query};
/// use tessera::layout::LayeredLayout;
///
/// let mut graph = Graph::new();
/// for id in ["a", "b", "c"] {
///     graph.add_node(Node::new(id, "Step", id));
/// }
/// graph.add_edge("a", "NEXT", "b")?;
/// graph.add_edge("b", "NEXT", "c")?;
///
/// let paths = Query::new(&graph).match_paths("x-[:NEXT*1..2]->y", Some("a"))?;
/// let layout = LayeredLayout::from_paths(&paths);
/// assert_eq!(layout.layer_for("a"), Some(0));
/// assert_eq!(layout.layer_for("c"), Some(2));
/// # Ok::<(), tessera::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LayeredLayout {
    layers: IndexMap<NodeId, usize>,
    variable_layers: BTreeMap<String, usize>,
    roots: Vec<NodeId>,
    edges: Vec<Edge>,
    max_depth: usize,
}

impl LayeredLayout {
    /// Builds the layout from the executor's paths form.
    pub fn from_paths(paths: &[PathMatch]) -> Self {
        let mut edges: IndexSet<Edge> = IndexSet::new();
        let mut bound: IndexMap<String, IndexSet<NodeId>> = IndexMap::new();
        for path in paths {
            for edge in &path.edges {
                edges.insert(edge.clone());
            }
            for (var, id) in &path.nodes {
                bound.entry(var.clone()).or_default().insert(id.clone());
            }
        }

        let mut in_degree: IndexMap<&str, usize> = IndexMap::new();
        let mut out: IndexMap<&str, Vec<&str>> = IndexMap::new();
        let mut linked: IndexSet<&str> = IndexSet::new();
        for edge in &edges {
            linked.insert(edge.src.as_str());
            linked.insert(edge.dst.as_str());
            out.entry(edge.src.as_str()).or_default().push(edge.dst.as_str());
            *in_degree.entry(edge.dst.as_str()).or_insert(0) += 1;
            in_degree.entry(edge.src.as_str()).or_insert(0);
        }

        // Longest path from any root, in Kahn order. Back-edges, should the
        // caller hand us a cycle, are left out of the ordering and their
        // targets settle on whatever their already-layered parents give.
        let mut layers: IndexMap<NodeId, usize> = IndexMap::new();
        let mut roots = Vec::new();
        let mut queue: std::collections::VecDeque<&str> = std::collections::VecDeque::new();
        for (&id, &degree) in &in_degree {
            if degree == 0 {
                roots.push(id.to_owned());
                layers.insert(id.to_owned(), 0);
                queue.push_back(id);
            }
        }
        let mut pending = in_degree.clone();
        while let Some(current) = queue.pop_front() {
            let layer = layers[current];
            for &next in out.get(current).map(Vec::as_slice).unwrap_or_default() {
                let proposed = layer + 1;
                let entry = layers.entry(next.to_owned()).or_insert(proposed);
                if *entry < proposed {
                    *entry = proposed;
                }
                let degree = pending.get_mut(next).expect("edge targets are tracked");
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }
        for &id in linked.iter() {
            layers.entry(id.to_owned()).or_insert(0);
        }

        // First pass of per-variable medians over edge-connected nodes only,
        // so orphans inherit a layer instead of defining one.
        let connected_medians: BTreeMap<String, usize> = bound
            .iter()
            .filter_map(|(var, ids)| {
                let known: Vec<usize> = ids
                    .iter()
                    .filter(|id| linked.contains(id.as_str()))
                    .filter_map(|id| layers.get(id).copied())
                    .collect();
                median(&known).map(|layer| (var.clone(), layer))
            })
            .collect();
        for (var, ids) in &bound {
            for id in ids {
                if !linked.contains(id.as_str()) {
                    let layer = connected_medians.get(var).copied().unwrap_or(0);
                    layers.entry(id.clone()).or_insert(layer);
                }
            }
        }

        let variable_layers: BTreeMap<String, usize> = bound
            .iter()
            .filter_map(|(var, ids)| {
                let known: Vec<usize> =
                    ids.iter().filter_map(|id| layers.get(id).copied()).collect();
                median(&known).map(|layer| (var.clone(), layer))
            })
            .collect();

        let max_depth = layers.values().copied().max().unwrap_or(0);
        Self {
            layers,
            variable_layers,
            roots,
            edges: edges.into_iter().collect(),
            max_depth,
        }
    }

    /// Layer assigned to a node id, when the node appeared in any path.
    pub fn layer_for(&self, id: &str) -> Option<usize> {
        self.layers.get(id).copied()
    }

    /// Every node placed on the given layer, in discovery order.
    pub fn nodes_in_layer(&self, layer: usize) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|(_, &assigned)| assigned == layer)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Median layer of every node the variable was bound to.
    pub fn variable_layer(&self, var: &str) -> Option<usize> {
        self.variable_layers.get(var).copied()
    }

    /// Deepest assigned layer; 0 for an empty layout.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Nodes with no incoming edge within the path-edge union.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The deduplicated union of all path edges.
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Lower median of an unsorted layer list.
fn median(values: &[usize]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[(sorted.len() - 1) / 2])
}
