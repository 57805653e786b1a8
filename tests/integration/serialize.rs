#![allow(missing_docs)]

use proptest::prelude::*;
use tessera::{Graph, GraphError, Node, PropertyValue, Result};

fn sample() -> Result<Graph> {
    let mut graph = Graph::new();
    graph.add_node(
        Node::new("alice", "Person", "Alice Admin")
            .with_property("age", 34i64)
            .with_property("score", 9.25)
            .with_property("active", true)
            .with_property("nickname", PropertyValue::Null),
    );
    graph.add_node(Node::new("acme", "Company", "Acme Corp"));
    graph.add_node(Node::new("ops", "Group", "Operations"));
    graph.add_edge("alice", "WORKS_AT", "acme")?;
    graph.add_edge("alice", "MEMBER_OF", "ops")?;
    Ok(graph)
}

#[test]
fn round_trip_preserves_nodes_edges_and_properties() -> Result<()> {
    let graph = sample()?;
    let restored = Graph::from_json(&graph.to_json()?)?;
    assert_eq!(restored.snapshot(), graph.snapshot());
    assert_eq!(restored.node_count(), 3);
    assert_eq!(restored.edge_count(), 2);
    assert!(restored.has_edge("alice", "WORKS_AT", "acme"));
    Ok(())
}

#[test]
fn snapshot_uses_the_documented_shape() -> Result<()> {
    let graph = sample()?;
    let value: serde_json::Value = serde_json::from_str(&graph.to_json()?)
        .map_err(|err| GraphError::Serialization(err.to_string()))?;
    let nodes = value["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["id"], "alice");
    assert_eq!(nodes[0]["type"], "Person");
    assert_eq!(nodes[0]["label"], "Alice Admin");
    assert_eq!(nodes[0]["properties"]["age"], 34);
    let edges = value["edges"].as_array().expect("edges array");
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["src"], "alice");
    assert_eq!(edges[0]["type"], "WORKS_AT");
    assert_eq!(edges[0]["dst"], "acme");
    Ok(())
}

#[test]
fn load_rejects_dangling_edges_and_collapses_duplicates() {
    let dangling = r#"{
        "nodes": [{"id": "a", "type": "T", "label": "a"}],
        "edges": [{"src": "a", "type": "E", "dst": "missing"}]
    }"#;
    assert_eq!(
        Graph::from_json(dangling).unwrap_err(),
        GraphError::UnknownNode {
            id: "missing".into()
        }
    );

    let duplicated = r#"{
        "nodes": [
            {"id": "a", "type": "T", "label": "a"},
            {"id": "b", "type": "T", "label": "b"}
        ],
        "edges": [
            {"src": "a", "type": "E", "dst": "b"},
            {"src": "a", "type": "E", "dst": "b"},
            {"src": "a", "type": "F", "dst": "b"}
        ]
    }"#;
    let graph = Graph::from_json(duplicated).unwrap();
    assert_eq!(graph.edge_count(), 2, "same-type duplicate collapsed");
}

#[test]
fn nodes_without_properties_omit_the_field() -> Result<()> {
    let graph = sample()?;
    let text = graph.to_json()?;
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|err| GraphError::Serialization(err.to_string()))?;
    assert!(value["nodes"][1].get("properties").is_none());
    Ok(())
}

fn property_value() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        Just(PropertyValue::Null),
        any::<bool>().prop_map(PropertyValue::Bool),
        any::<i64>().prop_map(PropertyValue::Int),
        (-1.0e9f64..1.0e9).prop_map(PropertyValue::Float),
        "[a-zA-Z0-9 _-]{0,12}".prop_map(PropertyValue::String),
    ]
}

proptest! {
    /// Serialize-then-deserialize is the identity on graphs.
    #[test]
    fn round_trip_is_identity(
        props in proptest::collection::btree_map("[a-z]{1,6}", property_value(), 0..6),
        edges in proptest::collection::btree_set((0usize..4, 0usize..4), 0..10),
    ) {
        let mut graph = Graph::new();
        for i in 0..4 {
            let mut node = Node::new(format!("n{i}"), "N", format!("node {i}"));
            if i == 0 {
                node.properties = props.clone();
            }
            graph.add_node(node);
        }
        for (src, dst) in &edges {
            graph.add_edge(&format!("n{src}"), "E", &format!("n{dst}")).unwrap();
        }
        let restored = Graph::from_json(&graph.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.snapshot(), graph.snapshot());
    }
}
