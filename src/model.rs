//! Data models for graph entities.
//!
//! This module defines the core data structures used to represent nodes,
//! edges, and their properties in the Tessera graph library.
//!
//! # Key Types
//!
//! - [`Node`] - Canonical node payload with a type, a label, and properties
//! - [`Edge`] - A directed `(src, type, dst)` triple
//! - [`PropertyValue`] - Enum for the scalar property types
//! - [`NodeRecord`] - Capability trait the engine reads nodes through
//!
//! # Examples
//!
//! ```rust
//! use tessera::model::{Node, PropertyValue};
//!
//! let node = Node::new("alice", "Person", "Alice Admin")
//!     .with_property("age", PropertyValue::Int(30))
//!     .with_property("active", PropertyValue::Bool(true));
//! assert_eq!(node.id, "alice");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unique identifier for nodes in the graph.
///
/// Two nodes with the same id are the same node; [`crate::Graph::add_node`]
/// replaces by id.
pub type NodeId = String;

/// Represents a scalar property value stored on nodes.
///
/// The same type doubles as the literal type of the predicate sub-language,
/// so comparison semantics (see [`crate::query`]) dispatch on this tag.
///
/// The untagged serde representation keeps the snapshot format plain JSON:
/// integers stay integers, floats stay floats, and `Null` maps to JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Null literal (also the result of reading a missing property).
    Null,
    /// Boolean value (true/false).
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
}

impl PropertyValue {
    /// Returns true when the value is [`PropertyValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

/// Capability set the query engine reads node payloads through.
///
/// The store is generic over its payload type, so callers can attach richer
/// records while the engine only ever sees these four accessors.
pub trait NodeRecord {
    /// Identity key of the node.
    fn id(&self) -> &str;
    /// Type name used by `:Type` filters in patterns.
    fn type_name(&self) -> &str;
    /// Human-readable label matched by `{label~substring}` filters.
    fn label(&self) -> &str;
    /// Reads a property by key; `None` when the key is absent.
    fn property(&self, key: &str) -> Option<&PropertyValue>;
}

/// Canonical node payload.
///
/// # Examples
///
/// ```rust
/// use tessera::model::{Node, NodeRecord, PropertyValue};
///
/// let node = Node::new("core", "Package", "core library")
///     .with_property("version", PropertyValue::String("1.2.0".into()));
/// assert_eq!(node.type_name(), "Package");
/// assert_eq!(
///     node.property("version"),
///     Some(&PropertyValue::String("1.2.0".into()))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identity key; two nodes with the same id are the same node.
    pub id: NodeId,
    /// Type name, e.g. `"Person"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Display label, matched by substring filters.
    pub label: String,
    /// Properties as key-value pairs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Node {
    /// Creates a node with the given identity, type, and label and no
    /// properties.
    pub fn new(
        id: impl Into<String>,
        type_name: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            type_name: type_name.into(),
            label: label.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds a property, consuming and returning the node for chaining.
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl NodeRecord for Node {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// A directed labelled edge triple.
///
/// Edges carry no properties of their own; their data is the type string.
/// Parallel edges of different types are allowed between the same pair,
/// duplicates of the same triple are idempotent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub src: NodeId,
    /// Edge type, e.g. `"DEPENDS_ON"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Destination node id.
    pub dst: NodeId,
}

impl Edge {
    /// Creates an edge triple.
    pub fn new(
        src: impl Into<String>,
        type_name: impl Into<String>,
        dst: impl Into<String>,
    ) -> Self {
        Self {
            src: src.into(),
            type_name: type_name.into(),
            dst: dst.into(),
        }
    }
}

/// Direction selector for edge traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Follow outgoing edges from the source node.
    Outgoing,
    /// Follow incoming edges to the target node.
    Incoming,
    /// Follow edges in both directions.
    Both,
}
