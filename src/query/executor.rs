//! Pattern execution over the adjacency indexes.
//!
//! The executor extends a set of partial bindings segment by segment,
//! left to right. A binding maps variables to node ids (node variables) or
//! edge types (edge variables). Fixed segments take one step through the
//! adjacency index; variable-length segments expand every simple chain
//! whose length falls inside the quantifier bounds. Completed bindings are
//! filtered by the `WHERE` tree and shaped into one of three result forms.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::graph::Graph;
use crate::model::{Edge, NodeId, NodeRecord};
use crate::query::ast::{NodeSpec, Pattern, Segment};
use crate::query::predicate;

/// Value bound to a pattern variable during traversal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum BoundValue {
    /// A node variable bound to a node id.
    Node(NodeId),
    /// An edge variable bound to the traversed edge's type.
    EdgeType(String),
}

impl BoundValue {
    fn render(&self) -> &str {
        match self {
            BoundValue::Node(id) => id,
            BoundValue::EdgeType(edge_type) => edge_type,
        }
    }
}

/// A (partial or complete) assignment of pattern variables.
pub(crate) type Binding = BTreeMap<String, BoundValue>;

/// Grouped result: each node variable mapped to every id it was bound to.
pub type GroupedMatch = BTreeMap<String, BTreeSet<NodeId>>;

/// One surviving binding: variable name to node id (node variables) or edge
/// type (edge variables).
pub type Row = BTreeMap<String, String>;

/// One complete traversal with the concrete edges it walked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Node variables and the ids they were bound to.
    pub nodes: BTreeMap<String, NodeId>,
    /// The edges traversed, in pattern order; variable-length segments
    /// contribute the actually chosen chain.
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone)]
struct Partial {
    binding: Binding,
    frontier: NodeId,
    edges: Vec<Edge>,
}

pub(crate) struct Executor<'g, N: NodeRecord> {
    graph: &'g Graph<N>,
    max_chain_hops: usize,
}

impl<'g, N: NodeRecord> Executor<'g, N> {
    pub(crate) fn new(graph: &'g Graph<N>, max_chain_hops: usize) -> Self {
        Self {
            graph,
            max_chain_hops,
        }
    }

    pub(crate) fn grouped(&self, pattern: &Pattern, start: Option<&str>) -> GroupedMatch {
        let mut grouped = GroupedMatch::new();
        for partial in self.run(pattern, start) {
            for (var, value) in &partial.binding {
                if let BoundValue::Node(id) = value {
                    grouped.entry(var.clone()).or_default().insert(id.clone());
                }
            }
        }
        grouped
    }

    pub(crate) fn rows(&self, pattern: &Pattern, start: Option<&str>) -> Vec<Row> {
        let mut seen: FxHashSet<Binding> = FxHashSet::default();
        let mut rows = Vec::new();
        for partial in self.run(pattern, start) {
            if !seen.insert(partial.binding.clone()) {
                continue;
            }
            let row = partial
                .binding
                .iter()
                .map(|(var, value)| (var.clone(), value.render().to_owned()))
                .collect();
            rows.push(row);
        }
        rows
    }

    pub(crate) fn paths(&self, pattern: &Pattern, start: Option<&str>) -> Vec<PathMatch> {
        self.run(pattern, start)
            .into_iter()
            .map(|partial| PathMatch {
                nodes: partial
                    .binding
                    .into_iter()
                    .filter_map(|(var, value)| match value {
                        BoundValue::Node(id) => Some((var, id)),
                        BoundValue::EdgeType(_) => None,
                    })
                    .collect(),
                edges: partial.edges,
            })
            .collect()
    }

    fn run(&self, pattern: &Pattern, start: Option<&str>) -> Vec<Partial> {
        let mut partials = self.seed(&pattern.start, start);
        for segment in &pattern.segments {
            let mut next = Vec::new();
            for partial in &partials {
                if segment.edge.is_single_hop() {
                    self.step_single(partial, segment, &mut next);
                } else {
                    self.step_chain(partial, segment, &mut next);
                }
            }
            partials = next;
            if partials.is_empty() {
                break;
            }
        }
        if let Some(predicate) = &pattern.predicate {
            partials.retain(|partial| predicate::evaluate(predicate, self.graph, &partial.binding));
        }
        debug!(bindings = partials.len(), "query.match.complete");
        partials
    }

    fn seed(&self, spec: &NodeSpec, start: Option<&str>) -> Vec<Partial> {
        let mut seeds = Vec::new();
        let mut push = |id: &str| {
            let mut binding = Binding::new();
            if let Some(var) = &spec.var {
                binding.insert(var.clone(), BoundValue::Node(id.to_owned()));
            }
            seeds.push(Partial {
                binding,
                frontier: id.to_owned(),
                edges: Vec::new(),
            });
        };
        match start {
            Some(id) => {
                if let Some(node) = self.graph.node(id) {
                    if spec.admits(node.type_name(), node.label()) {
                        push(id);
                    }
                }
            }
            None => {
                for node in self.graph.nodes() {
                    if spec.admits(node.type_name(), node.label()) {
                        push(node.id());
                    }
                }
            }
        }
        seeds
    }

    fn admits(&self, spec: &NodeSpec, id: &str) -> bool {
        self.graph
            .node(id)
            .is_some_and(|node| spec.admits(node.type_name(), node.label()))
    }

    fn step_single(&self, partial: &Partial, segment: &Segment, out: &mut Vec<Partial>) {
        let direction = segment.edge.direction.as_edge_direction();
        for (edge, neighbor) in
            self.graph
                .neighbor_steps(&partial.frontier, &segment.edge.types, direction)
        {
            if !self.admits(&segment.node, &neighbor) {
                continue;
            }
            let mut binding = partial.binding.clone();
            if let Some(var) = &segment.edge.var {
                match binding.get(var) {
                    Some(BoundValue::EdgeType(bound)) if *bound == edge.type_name => {}
                    Some(_) => continue,
                    None => {
                        binding.insert(var.clone(), BoundValue::EdgeType(edge.type_name.clone()));
                    }
                }
            }
            if !bind_node(&mut binding, &segment.node, &neighbor) {
                continue;
            }
            let mut edges = partial.edges.clone();
            edges.push(edge);
            out.push(Partial {
                binding,
                frontier: neighbor,
                edges,
            });
        }
    }

    /// Expands a variable-length segment by enumerating every simple chain
    /// whose length lies inside the quantifier bounds. Edge variables stay
    /// unbound here; a chain has no single type to capture.
    fn step_chain(&self, partial: &Partial, segment: &Segment, out: &mut Vec<Partial>) {
        let quantifier = segment
            .edge
            .quantifier
            .expect("variable-length step requires a quantifier");
        let max = quantifier.max.unwrap_or(self.max_chain_hops);
        let mut chains = Vec::new();
        if quantifier.min == 0 && self.admits(&segment.node, &partial.frontier) {
            chains.push((partial.frontier.clone(), Vec::new()));
        }
        let mut on_path: FxHashSet<NodeId> = FxHashSet::default();
        on_path.insert(partial.frontier.clone());
        self.chain_dfs(
            segment,
            quantifier.min,
            max,
            &partial.frontier,
            0,
            &mut on_path,
            &mut Vec::new(),
            &mut chains,
        );
        for (endpoint, chain) in chains {
            let mut binding = partial.binding.clone();
            if !bind_node(&mut binding, &segment.node, &endpoint) {
                continue;
            }
            let mut edges = partial.edges.clone();
            edges.extend(chain);
            out.push(Partial {
                binding,
                frontier: endpoint,
                edges,
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn chain_dfs(
        &self,
        segment: &Segment,
        min: usize,
        max: usize,
        current: &str,
        depth: usize,
        on_path: &mut FxHashSet<NodeId>,
        chain: &mut Vec<Edge>,
        chains: &mut Vec<(NodeId, Vec<Edge>)>,
    ) {
        if depth == max {
            return;
        }
        let direction = segment.edge.direction.as_edge_direction();
        for (edge, neighbor) in self
            .graph
            .neighbor_steps(current, &segment.edge.types, direction)
        {
            if on_path.contains(&neighbor) {
                continue;
            }
            chain.push(edge);
            if depth + 1 >= min && self.admits(&segment.node, &neighbor) {
                chains.push((neighbor.clone(), chain.clone()));
            }
            on_path.insert(neighbor.clone());
            self.chain_dfs(segment, min, max, &neighbor, depth + 1, on_path, chain, chains);
            on_path.remove(&neighbor);
            chain.pop();
        }
    }
}

fn bind_node(binding: &mut Binding, spec: &NodeSpec, id: &str) -> bool {
    let Some(var) = &spec.var else {
        return true;
    };
    match binding.get(var) {
        Some(BoundValue::Node(bound)) => bound == id,
        Some(BoundValue::EdgeType(_)) => false,
        None => {
            binding.insert(var.clone(), BoundValue::Node(id.to_owned()));
            true
        }
    }
}
