//! # Tessera - In-Memory Property Graph with Pattern Queries
//!
//! Tessera is a typed property-graph library whose centerpiece is a
//! Cypher-style pattern engine: compact textual patterns with direction
//! changes, edge-type alternation, variable-length repetition, label and
//! property filters, edge-variable unification, and a `WHERE` predicate
//! sub-language.
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera::{Graph, Node, Query};
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("alice", "User", "Alice Admin"));
//! graph.add_node(Node::new("bob", "User", "Bob"));
//! graph.add_node(Node::new("ops", "Group", "Operations"));
//! graph.add_edge("alice", "MEMBER_OF", "ops")?;
//! graph.add_edge("bob", "MEMBER_OF", "ops")?;
//!
//! let query = Query::new(&graph);
//! let grouped = query.match_pattern(
//!     "u:User{label~Admin}-[:MEMBER_OF]->g:Group",
//!     None,
//! )?;
//! assert!(grouped["u"].contains("alice"));
//! assert!(!grouped["u"].contains("bob"));
//! # Ok::<(), tessera::GraphError>(())
//! ```
//!
//! ## Features
//!
//! - **Indexed store**: forward and reverse adjacency per edge type, kept
//!   mirror consistent across every mutation
//! - **Pattern engine**: multi-segment traversal with backtracking and
//!   three result shapes (grouped sets, rows, full paths)
//! - **Graph algorithms**: shortest path, components, reachability,
//!   topological sort, subgraph expansion, bounded path enumeration
//! - **Layered layout**: longest-path layering over matched paths
//! - **Snapshots**: round-trippable JSON serialization
//!
//! The engine is read-only over the store and fully synchronous; build the
//! graph, then query it. Concurrent mutation during a query is undefined.

pub mod error;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod model;
pub mod query;
pub mod serialize;

// Re-export the main public API
pub use crate::error::{GraphError, Result};
pub use crate::graph::{Graph, PathEnumeration, PathResult, SubgraphExpansion};
pub use crate::layout::LayeredLayout;
pub use crate::model::{Edge, EdgeDirection, Node, NodeId, NodeRecord, PropertyValue};
pub use crate::query::{GroupedMatch, PathMatch, Pattern, Query, QueryOptions, Row};
pub use crate::serialize::GraphSnapshot;
