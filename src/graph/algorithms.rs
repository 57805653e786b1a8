//! Traversal algorithms over the store.
//!
//! These run directly on the adjacency indexes and are total on empty or
//! missing inputs: a query about an absent node returns an empty result
//! rather than an error. The one exception is [`Graph::topological_sort`],
//! which fails on cyclic graphs.

use std::collections::{BTreeMap, VecDeque};

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use super::Graph;
use crate::error::{GraphError, Result};
use crate::model::{Edge, NodeId, NodeRecord};

/// Outcome of an unweighted shortest-path search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Whether a path from source to destination exists.
    pub found: bool,
    /// Node ids from source to destination inclusive; empty when not found.
    pub path: Vec<NodeId>,
    /// Number of edges along `path`; 0 when not found or source == destination.
    pub distance: usize,
}

impl PathResult {
    fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
            distance: 0,
        }
    }
}

/// Result of a two-sided bounded expansion around a seed set.
#[derive(Debug, Clone, Default)]
pub struct SubgraphExpansion {
    /// Every node reached by either sweep, seeds included.
    pub nodes: IndexSet<NodeId>,
    /// The edges actually traversed, deduplicated.
    pub edges: Vec<Edge>,
    /// Minimum hop count from any seed following rightward types.
    pub forward_dist: BTreeMap<NodeId, usize>,
    /// Minimum hop count from any seed following leftward types backwards.
    pub backward_dist: BTreeMap<NodeId, usize>,
}

/// Result of bounded simple-path enumeration.
#[derive(Debug, Clone, Default)]
pub struct PathEnumeration {
    /// Every simple path found, as node id sequences from source to
    /// destination.
    pub paths: Vec<Vec<NodeId>>,
    /// The shortest of `paths`, ties broken by discovery order.
    pub shortest_path: Option<Vec<NodeId>>,
    /// Distinct nodes touched during the search.
    pub nodes_explored: usize,
    /// Branches abandoned because the hop budget ran out with unexplored
    /// neighbors remaining.
    pub truncated_paths: usize,
}

impl<N: NodeRecord> Graph<N> {
    /// Breadth-first shortest path on the directed graph, ignoring edge
    /// types. Ties are broken by adjacency insertion order.
    pub fn shortest_path(&self, src: &str, dst: &str) -> PathResult {
        if !self.contains_node(src) || !self.contains_node(dst) {
            return PathResult::not_found();
        }
        if src == dst {
            return PathResult {
                found: true,
                path: vec![src.to_owned()],
                distance: 0,
            };
        }
        let mut parent: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut queue = VecDeque::new();
        parent.insert(src.to_owned(), src.to_owned());
        queue.push_back(src.to_owned());
        while let Some(current) = queue.pop_front() {
            for neighbor in self.out_neighbors(&current, None) {
                if parent.contains_key(&neighbor) {
                    continue;
                }
                parent.insert(neighbor.clone(), current.clone());
                if neighbor == dst {
                    let mut path = vec![neighbor];
                    while path.last().map(String::as_str) != Some(src) {
                        let prev = parent[path.last().expect("path is non-empty")].clone();
                        path.push(prev);
                    }
                    path.reverse();
                    let distance = path.len() - 1;
                    return PathResult {
                        found: true,
                        path,
                        distance,
                    };
                }
                queue.push_back(neighbor);
            }
        }
        PathResult::not_found()
    }

    /// Connected components ignoring edge direction, each as a sorted id set.
    pub fn connected_components(&self) -> Vec<std::collections::BTreeSet<NodeId>> {
        let mut components = Vec::new();
        let mut visited: IndexSet<NodeId> = IndexSet::new();
        for start in self.node_ids() {
            if visited.contains(start) {
                continue;
            }
            let mut component = std::collections::BTreeSet::new();
            let mut queue = VecDeque::new();
            visited.insert(start.to_owned());
            queue.push_back(start.to_owned());
            while let Some(current) = queue.pop_front() {
                component.insert(current.clone());
                for neighbor in self
                    .out_neighbors(&current, None)
                    .into_iter()
                    .chain(self.in_neighbors(&current, None))
                {
                    if visited.insert(neighbor.clone()) {
                        queue.push_back(neighbor);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Every node reachable from `src` along outgoing edges, `src` included.
    ///
    /// Returns an empty set when `src` is not in the graph.
    pub fn reachable_from(&self, src: &str) -> IndexSet<NodeId> {
        let mut reached = IndexSet::new();
        if !self.contains_node(src) {
            return reached;
        }
        let mut queue = VecDeque::new();
        reached.insert(src.to_owned());
        queue.push_back(src.to_owned());
        while let Some(current) = queue.pop_front() {
            for neighbor in self.out_neighbors(&current, None) {
                if reached.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }
        reached
    }

    /// Kahn's algorithm over the directed graph, ignoring edge types.
    ///
    /// Returns an order where for every edge `(src, dst)` the source
    /// precedes the destination, or [`GraphError::Cycle`] when no such
    /// order exists.
    pub fn topological_sort(&self) -> Result<Vec<NodeId>> {
        let mut in_degree: FxHashMap<&str, usize> = FxHashMap::default();
        for id in self.node_ids() {
            in_degree.insert(id, 0);
        }
        for edge in self.edges() {
            if let Some(count) = in_degree.get_mut(edge.dst.as_str()) {
                *count += 1;
            }
        }
        let mut queue: VecDeque<NodeId> = self
            .node_ids()
            .filter(|id| in_degree[id] == 0)
            .map(str::to_owned)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());
        while let Some(current) = queue.pop_front() {
            // parallel typed edges each contributed to the in-degree, so
            // walk the concrete steps rather than the neighbor union
            for (_, neighbor) in
                self.neighbor_steps(&current, &[], crate::model::EdgeDirection::Outgoing)
            {
                let count = in_degree
                    .get_mut(neighbor.as_str())
                    .expect("edge endpoints are stored nodes");
                *count -= 1;
                if *count == 0 {
                    queue.push_back(neighbor);
                }
            }
            order.push(current);
        }
        if order.len() != self.node_count() {
            return Err(GraphError::Cycle);
        }
        Ok(order)
    }

    /// Expands a bounded subgraph around `seeds`.
    ///
    /// Two independent sweeps: a forward BFS over `rightward_types` and a
    /// backward BFS over `leftward_types` (defaulting to the rightward set),
    /// each recording the minimum hop count at which a node was reached.
    /// Unknown seed ids are skipped.
    pub fn expand_subgraph(
        &self,
        seeds: &[&str],
        rightward_types: &[&str],
        leftward_types: Option<&[&str]>,
        forward_hops: usize,
        backward_hops: usize,
    ) -> SubgraphExpansion {
        let mut expansion = SubgraphExpansion::default();
        let mut edges: IndexSet<Edge> = IndexSet::new();

        self.sweep(
            seeds,
            rightward_types,
            forward_hops,
            false,
            &mut expansion.forward_dist,
            &mut edges,
        );
        self.sweep(
            seeds,
            leftward_types.unwrap_or(rightward_types),
            backward_hops,
            true,
            &mut expansion.backward_dist,
            &mut edges,
        );

        for id in expansion.forward_dist.keys().chain(expansion.backward_dist.keys()) {
            expansion.nodes.insert(id.clone());
        }
        expansion.edges = edges.into_iter().collect();
        expansion
    }

    fn sweep(
        &self,
        seeds: &[&str],
        types: &[&str],
        max_hops: usize,
        backward: bool,
        dist: &mut BTreeMap<NodeId, usize>,
        edges: &mut IndexSet<Edge>,
    ) {
        let mut frontier: Vec<NodeId> = Vec::new();
        for seed in seeds {
            if self.contains_node(seed) && !dist.contains_key(*seed) {
                dist.insert((*seed).to_owned(), 0);
                frontier.push((*seed).to_owned());
            }
        }
        for hop in 1..=max_hops {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for current in frontier.drain(..) {
                for &edge_type in types {
                    let neighbors = if backward {
                        self.in_neighbors(&current, Some(edge_type))
                    } else {
                        self.out_neighbors(&current, Some(edge_type))
                    };
                    for neighbor in neighbors {
                        let edge = if backward {
                            Edge::new(neighbor.clone(), edge_type, current.clone())
                        } else {
                            Edge::new(current.clone(), edge_type, neighbor.clone())
                        };
                        edges.insert(edge);
                        if !dist.contains_key(&neighbor) {
                            dist.insert(neighbor.clone(), hop);
                            next.push(neighbor);
                        }
                    }
                }
            }
            frontier = next;
        }
    }

    /// Enumerates all simple paths from `src` to `dst` of at most `max_hops`
    /// edges, optionally restricted to the given edge types.
    ///
    /// Depth-first with on-path visited tracking, so each returned path
    /// visits no node twice.
    pub fn enumerate_paths(
        &self,
        src: &str,
        dst: &str,
        max_hops: usize,
        edge_types: Option<&[&str]>,
    ) -> PathEnumeration {
        let mut result = PathEnumeration::default();
        if !self.contains_node(src) || !self.contains_node(dst) {
            return result;
        }
        let types: Vec<String> = edge_types
            .map(|types| types.iter().map(|t| (*t).to_owned()).collect())
            .unwrap_or_default();
        let mut explored: IndexSet<NodeId> = IndexSet::new();
        let mut on_path: IndexSet<NodeId> = IndexSet::new();
        let mut path = vec![src.to_owned()];
        on_path.insert(src.to_owned());
        explored.insert(src.to_owned());
        self.enumerate_from(src, dst, max_hops, &types, &mut path, &mut on_path, &mut explored, &mut result);
        result.nodes_explored = explored.len();
        result.shortest_path = result.paths.iter().min_by_key(|path| path.len()).cloned();
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn enumerate_from(
        &self,
        current: &str,
        dst: &str,
        hops_left: usize,
        types: &[String],
        path: &mut Vec<NodeId>,
        on_path: &mut IndexSet<NodeId>,
        explored: &mut IndexSet<NodeId>,
        result: &mut PathEnumeration,
    ) {
        if current == dst {
            result.paths.push(path.clone());
            return;
        }
        let candidates: Vec<NodeId> = self
            .neighbor_steps(current, types, crate::model::EdgeDirection::Outgoing)
            .into_iter()
            .map(|(_, neighbor)| neighbor)
            .filter(|neighbor| !on_path.contains(neighbor))
            .collect();
        if hops_left == 0 {
            if !candidates.is_empty() {
                result.truncated_paths += 1;
            }
            return;
        }
        for neighbor in candidates {
            if on_path.contains(&neighbor) {
                continue;
            }
            explored.insert(neighbor.clone());
            on_path.insert(neighbor.clone());
            path.push(neighbor.clone());
            self.enumerate_from(&neighbor, dst, hops_left - 1, types, path, on_path, explored, result);
            path.pop();
            on_path.shift_remove(&neighbor);
        }
    }
}
