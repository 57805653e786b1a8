//! Graph snapshot serialization.
//!
//! The textual format is the round-trippable JSON object described in the
//! crate docs: a `nodes` array of full node payloads and an `edges` array
//! of `{src, type, dst}` triples. Duplicate edges collapse on load; a
//! triple naming an unknown node id fails the whole load.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{Edge, Node};

/// Plain-data snapshot of a graph, the unit of (de)serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Every node payload, in store insertion order.
    pub nodes: Vec<Node>,
    /// Every edge triple, grouped by source.
    pub edges: Vec<Edge>,
}

impl Graph<Node> {
    /// Captures the graph as a value snapshot.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            edges: self.edges(),
        }
    }

    /// Rebuilds a graph from a snapshot.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when an edge references an id missing
    /// from `nodes`; nothing of the partial graph escapes.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Result<Self> {
        let mut graph = Graph::new();
        for node in snapshot.nodes {
            graph.add_node(node);
        }
        for edge in snapshot.edges {
            if graph.has_edge(&edge.src, &edge.type_name, &edge.dst) {
                warn!(src = %edge.src, dst = %edge.dst, edge_type = %edge.type_name, "graph.load.duplicate_edge");
                continue;
            }
            graph.add_edge(&edge.src, &edge.type_name, &edge.dst)?;
        }
        Ok(graph)
    }

    /// Serializes the graph to the JSON snapshot format.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| GraphError::Serialization(err.to_string()))
    }

    /// Parses a JSON snapshot back into a graph.
    ///
    /// # Errors
    ///
    /// [`GraphError::Serialization`] for malformed JSON and
    /// [`GraphError::UnknownNode`] for dangling edge references.
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: GraphSnapshot =
            serde_json::from_str(text).map_err(|err| GraphError::Serialization(err.to_string()))?;
        Self::from_snapshot(snapshot)
    }
}
