#![forbid(unsafe_code)]

//! Pattern parsing and execution.
//!
//! This module provides the textual pattern language and its engine: the
//! tokenizer, the recursive-descent parser producing the pattern and
//! predicate ASTs, the predicate evaluator, and the segment-by-segment
//! executor with its three result shapes.
//!
//! # Pattern surface
//!
//! ```text
//! person:User{label~Admin}-[:MEMBER_OF]->g:Group
//! a-[r:CALLS|INVOKES]->b WHERE type(r) = "CALLS" AND b.public = true
//! x-[:DEPENDS_ON*1..3]->y
//! ```
//!
//! # Examples
//!
//! ```rust
//! use tessera::{Graph, Node, Query};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("core", "Package", "core"));
//! graph.add_node(Node::new("app", "Package", "app"));
//! graph.add_edge("app", "DEPENDS_ON", "core")?;
//!
//! let query = Query::new(&graph);
//! let grouped = query.match_pattern("u:Package-[:DEPENDS_ON]->v:Package", None)?;
//! assert!(grouped["v"].contains("core"));
//! # Ok::<(), tessera::GraphError>(())
//! ```

/// Abstract syntax tree for patterns and predicates.
pub mod ast;

mod executor;
mod parser;
mod predicate;
mod token;
pub(crate) mod value;

pub use ast::Pattern;
pub use executor::{GroupedMatch, PathMatch, Row};

use crate::error::Result;
use crate::graph::Graph;
use crate::model::{Node, NodeRecord};
use executor::Executor;

/// Tuning knobs for pattern execution.
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Cap applied to variable-length quantifiers with no explicit upper
    /// bound (`*`, `*2..`). Defaults to 10.
    pub max_chain_hops: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { max_chain_hops: 10 }
    }
}

/// A query handle over a graph.
///
/// The handle borrows the store read-only; build the graph first, then
/// query it. Behavior under concurrent mutation is undefined, so keep
/// mutations and queries on the same thread or synchronize externally.
pub struct Query<'g, N: NodeRecord = Node> {
    graph: &'g Graph<N>,
    options: QueryOptions,
}

impl<'g, N: NodeRecord> Query<'g, N> {
    /// Creates a query handle with default [`QueryOptions`].
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self::with_options(graph, QueryOptions::default())
    }

    /// Creates a query handle with explicit options.
    pub fn with_options(graph: &'g Graph<N>, options: QueryOptions) -> Self {
        Self { graph, options }
    }

    /// Parses and runs a pattern, returning each node variable mapped to
    /// the set of ids it was bound to across all surviving bindings.
    ///
    /// With `start` supplied, the first node spec seeds from that id alone
    /// (the empty result when it fails the spec's filters); otherwise every
    /// matching node seeds the traversal.
    pub fn match_pattern(&self, pattern: &str, start: Option<&str>) -> Result<GroupedMatch> {
        let parsed = Pattern::parse(pattern)?;
        Ok(self.run_grouped(&parsed, start))
    }

    /// Parses and runs a pattern, returning one row per distinct binding.
    pub fn match_rows(&self, pattern: &str, start: Option<&str>) -> Result<Vec<Row>> {
        let parsed = Pattern::parse(pattern)?;
        Ok(self.run_rows(&parsed, start))
    }

    /// Parses and runs a pattern, returning every traversal with the
    /// concrete edge sequence it walked. Unlike [`Self::match_rows`],
    /// duplicate bindings reached along different chains stay distinct.
    pub fn match_paths(&self, pattern: &str, start: Option<&str>) -> Result<Vec<PathMatch>> {
        let parsed = Pattern::parse(pattern)?;
        Ok(self.run_paths(&parsed, start))
    }

    /// Runs an already-parsed pattern in the grouped shape.
    pub fn run_grouped(&self, pattern: &Pattern, start: Option<&str>) -> GroupedMatch {
        Executor::new(self.graph, self.options.max_chain_hops).grouped(pattern, start)
    }

    /// Runs an already-parsed pattern in the rows shape.
    pub fn run_rows(&self, pattern: &Pattern, start: Option<&str>) -> Vec<Row> {
        Executor::new(self.graph, self.options.max_chain_hops).rows(pattern, start)
    }

    /// Runs an already-parsed pattern in the paths shape.
    pub fn run_paths(&self, pattern: &Pattern, start: Option<&str>) -> Vec<PathMatch> {
        Executor::new(self.graph, self.options.max_chain_hops).paths(pattern, start)
    }
}
