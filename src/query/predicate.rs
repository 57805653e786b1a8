//! `WHERE` clause evaluation over complete bindings.
//!
//! Resolution never fails: an unbound variable or missing property reads as
//! null, and the comparison rules in [`super::value`] take it from there.

use crate::graph::Graph;
use crate::model::{NodeRecord, PropertyValue};
use crate::query::ast::{BoolExpr, Expr};
use crate::query::executor::{Binding, BoundValue};
use crate::query::value::{apply_string_op, compare};

pub(crate) fn evaluate<N: NodeRecord>(
    predicate: &BoolExpr,
    graph: &Graph<N>,
    binding: &Binding,
) -> bool {
    match predicate {
        BoolExpr::And(terms) => terms.iter().all(|term| evaluate(term, graph, binding)),
        BoolExpr::Or(terms) => terms.iter().any(|term| evaluate(term, graph, binding)),
        BoolExpr::Not(inner) => !evaluate(inner, graph, binding),
        BoolExpr::Cmp { lhs, op, rhs } => compare(
            *op,
            &resolve(lhs, graph, binding),
            &resolve(rhs, graph, binding),
        ),
        BoolExpr::StringOp { lhs, op, rhs } => {
            apply_string_op(*op, &resolve(lhs, graph, binding), rhs)
        }
    }
}

fn resolve<N: NodeRecord>(expr: &Expr, graph: &Graph<N>, binding: &Binding) -> PropertyValue {
    match expr {
        Expr::Literal(value) => value.clone(),
        Expr::Property { var, key } => match binding.get(var) {
            Some(BoundValue::Node(id)) => graph
                .node(id)
                .and_then(|node| node.property(key))
                .cloned()
                .unwrap_or(PropertyValue::Null),
            _ => PropertyValue::Null,
        },
        Expr::EdgeType(var) => match binding.get(var) {
            Some(BoundValue::EdgeType(edge_type)) => PropertyValue::String(edge_type.clone()),
            _ => PropertyValue::Null,
        },
    }
}
