#![allow(missing_docs)]

use tessera::{Graph, GraphError, Node, PropertyValue, Query, Result};

fn people() -> Graph {
    let mut graph = Graph::new();
    graph.add_node(
        Node::new("alice", "Person", "Alice Admin")
            .with_property("age", 34i64)
            .with_property("score", 9.5)
            .with_property("name", "Alice"),
    );
    graph.add_node(
        Node::new("bob", "Person", "Bob")
            .with_property("age", 28i64)
            .with_property("name", "Bob")
            .with_property("active", false),
    );
    graph.add_node(
        Node::new("carol", "Person", "Carol")
            .with_property("age", 34.0)
            .with_property("name", "Carol"),
    );
    graph
}

fn matched(graph: &Graph, pattern: &str) -> Result<Vec<String>> {
    let grouped = Query::new(graph).match_pattern(pattern, None)?;
    Ok(grouped
        .get("u")
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default())
}

#[test]
fn comparisons_coerce_across_the_numeric_family() -> Result<()> {
    let graph = people();
    // carol stores age as a float; the integer literal still matches
    assert_eq!(matched(&graph, "u:Person WHERE u.age = 34")?, ["alice", "carol"]);
    assert_eq!(matched(&graph, "u:Person WHERE u.age < 30.5")?, ["bob"]);
    assert_eq!(matched(&graph, "u:Person WHERE u.score >= 9")?, ["alice"]);
    Ok(())
}

#[test]
fn strings_never_compare_to_numbers() -> Result<()> {
    let graph = people();
    assert!(matched(&graph, "u:Person WHERE u.name = 34")?.is_empty());
    assert!(matched(&graph, "u:Person WHERE u.name < 34")?.is_empty());
    Ok(())
}

#[test]
fn missing_properties_behave_as_null() -> Result<()> {
    let graph = people();
    // only bob carries `active` at all
    assert_eq!(matched(&graph, "u:Person WHERE u.active = null")?, ["alice", "carol"]);
    assert_eq!(matched(&graph, "u:Person WHERE u.active != null")?, ["bob"]);
    // null operands never order, so only bob's stored false participates
    assert_eq!(matched(&graph, "u:Person WHERE u.active < true")?, ["bob"]);
    Ok(())
}

#[test]
fn string_operators_filter_on_properties() -> Result<()> {
    let graph = people();
    assert_eq!(
        matched(&graph, "u:Person WHERE u.name STARTS WITH \"A\"")?,
        ["alice"]
    );
    assert_eq!(
        matched(&graph, "u:Person WHERE u.name ENDS WITH \"ob\"")?,
        ["bob"]
    );
    assert_eq!(
        matched(&graph, "u:Person WHERE u.name CONTAINS \"aro\"")?,
        ["carol"]
    );
    // numbers are never subject to string operators
    assert!(matched(&graph, "u:Person WHERE u.age CONTAINS \"3\"")?.is_empty());
    Ok(())
}

#[test]
fn boolean_composition_and_parentheses() -> Result<()> {
    let graph = people();
    assert_eq!(
        matched(&graph, "u:Person WHERE u.age > 30 AND u.name CONTAINS \"A\"")?,
        ["alice"]
    );
    assert_eq!(
        matched(
            &graph,
            "u:Person WHERE NOT (u.age > 30 OR u.name = \"Bob\")"
        )?,
        Vec::<String>::new()
    );
    assert_eq!(
        matched(
            &graph,
            "u:Person WHERE u.name = \"Bob\" OR (u.age >= 34 AND u.score != null)"
        )?,
        ["alice", "bob"]
    );
    Ok(())
}

#[test]
fn cross_type_equality_is_false() -> Result<()> {
    let graph = people();
    assert!(matched(&graph, "u:Person WHERE u.active = 0")?.is_empty());
    assert!(matched(&graph, "u:Person WHERE u.name = true")?.is_empty());
    Ok(())
}

#[test]
fn type_function_is_null_over_variable_length_segments() -> Result<()> {
    let mut graph = Graph::new();
    for id in ["a", "b", "c"] {
        graph.add_node(Node::new(id, "N", id));
    }
    graph.add_edge("a", "E", "b")?;
    graph.add_edge("b", "E", "c")?;

    let query = Query::new(&graph);
    // multi-hop: the edge variable never binds, so only `= null` survives
    let grouped = query.match_pattern("x-[r:E*1..2]->y WHERE type(r) = null", Some("a"))?;
    assert_eq!(grouped["y"].len(), 2);
    let empty = query.match_pattern("x-[r:E*1..2]->y WHERE type(r) = \"E\"", Some("a"))?;
    assert!(empty.is_empty());
    // a fixed-length-1 quantifier still binds the variable
    let single = query.match_pattern("x-[r:E*1..1]->y WHERE type(r) = \"E\"", Some("a"))?;
    assert_eq!(single["y"].len(), 1);
    Ok(())
}

#[test]
fn unsupported_operator_is_its_own_error() {
    let graph = people();
    let err = Query::new(&graph)
        .match_pattern("u:Person WHERE u.name LIKE \"A\"", None)
        .unwrap_err();
    assert!(matches!(err, GraphError::UnsupportedOperator { .. }), "got {err:?}");
}

#[test]
fn unquoted_string_after_string_op_is_a_parse_error() {
    let graph = people();
    let err = Query::new(&graph)
        .match_pattern("u:Person WHERE u.name CONTAINS Admin", None)
        .unwrap_err();
    let GraphError::Parse { message, .. } = err else {
        panic!("expected parse error, got {err:?}");
    };
    assert!(message.contains("double-quoted"), "message: {message}");
}

#[test]
fn literal_only_comparisons_are_allowed() -> Result<()> {
    let graph = people();
    assert_eq!(matched(&graph, "u:Person WHERE 1 < 2")?.len(), 3);
    assert!(matched(&graph, "u:Person WHERE \"a\" = \"b\"")?.is_empty());
    Ok(())
}

#[test]
fn float_property_round_trip_comparison() -> Result<()> {
    let mut graph = Graph::new();
    graph.add_node(Node::new("n", "N", "n").with_property("v", PropertyValue::Float(2.0)));
    let grouped = Query::new(&graph).match_pattern("u:N WHERE u.v = 2", None)?;
    assert_eq!(grouped["u"].len(), 1);
    Ok(())
}
