#![allow(missing_docs)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

/// Structured errors surfaced by the store, the pattern parser, and the
/// auxiliary algorithms.
///
/// The executor itself never fails on missing data: an unresolved property
/// evaluates to null and the binding simply fails the predicate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Malformed pattern or predicate text.
    #[error("parse error at position {position}: {message}")]
    Parse {
        /// Byte offset into the pattern string where parsing failed.
        position: usize,
        /// Description of what was expected or found.
        message: String,
    },
    /// An edge referenced a node id absent from the store.
    #[error("unknown node '{id}'")]
    UnknownNode { id: String },
    /// Topological sort was asked for on a cyclic graph.
    #[error("graph contains a cycle")]
    Cycle,
    /// A predicate used a token combination outside the grammar.
    #[error("unsupported operator '{token}'")]
    UnsupportedOperator { token: String },
    /// A variable-length quantifier with min > max.
    #[error("quantifier range invalid: min {min} > max {max}")]
    QuantifierRange { min: usize, max: usize },
    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GraphError {
    /// Builds a [`GraphError::Parse`] at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        GraphError::Parse {
            position,
            message: message.into(),
        }
    }

    /// Builds an [`GraphError::UnknownNode`] for the given id.
    pub fn unknown_node(id: impl Into<String>) -> Self {
        GraphError::UnknownNode { id: id.into() }
    }
}
