#![allow(missing_docs)]

use proptest::prelude::*;
use tessera::{EdgeDirection, Graph, GraphError, Node, Result};

fn package_graph() -> Result<Graph> {
    // The classic dependency shape: app -> {web, data} -> core -> util
    let mut graph = Graph::new();
    for id in ["app", "web", "data", "core", "util"] {
        graph.add_node(Node::new(id, "Package", id));
    }
    graph.add_edge("app", "DEPENDS_ON", "web")?;
    graph.add_edge("app", "DEPENDS_ON", "data")?;
    graph.add_edge("web", "DEPENDS_ON", "core")?;
    graph.add_edge("data", "DEPENDS_ON", "core")?;
    graph.add_edge("core", "DEPENDS_ON", "util")?;
    Ok(graph)
}

#[test]
fn topological_sort_orders_dependencies() -> Result<()> {
    let graph = package_graph()?;
    let order = graph.topological_sort()?;
    let position = |id: &str| order.iter().position(|o| o == id).expect("id in order");
    assert_eq!(position("app"), 0, "app depends on everything");
    assert!(position("core") > position("web"));
    assert!(position("core") > position("data"));
    assert_eq!(position("util"), order.len() - 1, "util is depended on by all");
    for edge in graph.edges() {
        assert!(
            position(&edge.src) < position(&edge.dst),
            "{} must precede {}",
            edge.src,
            edge.dst
        );
    }
    Ok(())
}

#[test]
fn topological_sort_fails_on_cycles() -> Result<()> {
    let mut graph = package_graph()?;
    graph.add_edge("util", "DEPENDS_ON", "app")?;
    assert_eq!(graph.topological_sort(), Err(GraphError::Cycle));
    Ok(())
}

#[test]
fn shortest_path_ignores_edge_types() -> Result<()> {
    let mut graph = package_graph()?;
    graph.add_edge("app", "BUNDLES", "util")?;
    let result = graph.shortest_path("app", "util");
    assert!(result.found);
    assert_eq!(result.distance, 1, "the BUNDLES shortcut counts");
    assert_eq!(result.path, vec!["app", "util"]);
    Ok(())
}

#[test]
fn shortest_path_agrees_with_path_enumeration() -> Result<()> {
    let graph = package_graph()?;
    let shortest = graph.shortest_path("app", "util");
    let enumeration = graph.enumerate_paths("app", "util", usize::MAX, None);
    let min_len = enumeration
        .paths
        .iter()
        .map(|path| path.len() - 1)
        .min()
        .expect("app reaches util");
    assert_eq!(shortest.distance, min_len);
    assert_eq!(
        enumeration.shortest_path.expect("non-empty").len() - 1,
        min_len
    );
    Ok(())
}

#[test]
fn enumeration_counts_nodes_and_truncations() -> Result<()> {
    let graph = package_graph()?;
    let full = graph.enumerate_paths("app", "util", 10, None);
    assert_eq!(full.paths.len(), 2, "via web and via data");
    assert_eq!(full.truncated_paths, 0);
    assert_eq!(full.nodes_explored, 5);

    let capped = graph.enumerate_paths("app", "util", 2, None);
    assert!(capped.paths.is_empty());
    assert_eq!(capped.truncated_paths, 2, "both branches hit the cap");
    Ok(())
}

#[test]
fn enumeration_restricted_to_edge_types() -> Result<()> {
    let mut graph = package_graph()?;
    graph.add_edge("app", "BUNDLES", "util")?;
    let only_deps = graph.enumerate_paths("app", "util", 10, Some(&["DEPENDS_ON"]));
    assert_eq!(only_deps.paths.len(), 2);
    assert!(only_deps.paths.iter().all(|path| path.len() == 4));
    Ok(())
}

#[test]
fn reachability_follows_outgoing_edges_only() -> Result<()> {
    let graph = package_graph()?;
    let from_core = graph.reachable_from("core");
    assert_eq!(from_core.len(), 2);
    assert!(from_core.contains("core"));
    assert!(from_core.contains("util"));
    Ok(())
}

#[test]
fn components_join_across_direction() -> Result<()> {
    let mut graph = package_graph()?;
    graph.add_node(Node::new("island", "Package", "island"));
    let components = graph.connected_components();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0].len(), 5);
    assert!(components[1].contains("island"));
    Ok(())
}

#[test]
fn subgraph_expansion_walks_both_sides() -> Result<()> {
    let graph = package_graph()?;
    let expansion = graph.expand_subgraph(&["core"], &["DEPENDS_ON"], None, 1, 1);
    assert_eq!(expansion.forward_dist.get("core"), Some(&0));
    assert_eq!(expansion.forward_dist.get("util"), Some(&1));
    assert_eq!(expansion.backward_dist.get("web"), Some(&1));
    assert_eq!(expansion.backward_dist.get("data"), Some(&1));
    assert!(!expansion.forward_dist.contains_key("app"), "two hops away");
    assert!(expansion.nodes.contains("core"));
    assert!(expansion.nodes.contains("util"));
    assert_eq!(expansion.edges.len(), 3);
    Ok(())
}

#[test]
fn subgraph_expansion_with_distinct_leftward_types() -> Result<()> {
    let mut graph = package_graph()?;
    graph.add_node(Node::new("docs", "Package", "docs"));
    graph.add_edge("docs", "DOCUMENTS", "core")?;
    let expansion =
        graph.expand_subgraph(&["core"], &["DEPENDS_ON"], Some(&["DOCUMENTS"]), 2, 2);
    assert!(expansion.backward_dist.contains_key("docs"));
    assert!(
        !expansion.backward_dist.contains_key("web"),
        "leftward sweep only follows DOCUMENTS"
    );
    Ok(())
}

#[test]
fn algorithms_are_total_on_empty_graphs() {
    let graph: Graph = Graph::new();
    assert!(!graph.shortest_path("a", "b").found);
    assert!(graph.connected_components().is_empty());
    assert!(graph.reachable_from("a").is_empty());
    assert_eq!(graph.topological_sort(), Ok(Vec::new()));
    assert!(graph.enumerate_paths("a", "b", 3, None).paths.is_empty());
    let expansion = graph.expand_subgraph(&[], &["T"], None, 3, 3);
    assert!(expansion.nodes.is_empty());
}

#[test]
fn degree_accessors_match_the_indexes() -> Result<()> {
    let graph = package_graph()?;
    assert_eq!(graph.degree("core", EdgeDirection::Incoming), 2);
    assert_eq!(graph.degree("core", EdgeDirection::Outgoing), 1);
    assert_eq!(graph.degree("core", EdgeDirection::Both), 3);
    assert_eq!(graph.edge_type_counts().get("DEPENDS_ON"), Some(&5));
    Ok(())
}

proptest! {
    /// Shortest-path distance always equals the minimum over enumerated
    /// simple paths, whenever any path exists.
    #[test]
    fn shortest_distance_is_minimal(edges in proptest::collection::btree_set((0usize..6, 0usize..6), 0..15)) {
        let mut graph = Graph::new();
        for i in 0..6 {
            graph.add_node(Node::new(format!("n{i}"), "N", format!("n{i}")));
        }
        for (src, dst) in &edges {
            graph.add_edge(&format!("n{src}"), "E", &format!("n{dst}")).unwrap();
        }
        let shortest = graph.shortest_path("n0", "n5");
        let enumeration = graph.enumerate_paths("n0", "n5", 6, None);
        let min_len = enumeration.paths.iter().map(|path| path.len() - 1).min();
        match min_len {
            Some(min_len) => {
                prop_assert!(shortest.found);
                prop_assert_eq!(shortest.distance, min_len);
            }
            None => prop_assert!(!shortest.found),
        }
    }

    /// Mirror consistency: every forward index entry has its reverse twin.
    #[test]
    fn adjacency_indexes_mirror(edges in proptest::collection::btree_set((0usize..6, 0usize..6), 0..15)) {
        let mut graph = Graph::new();
        for i in 0..6 {
            graph.add_node(Node::new(format!("n{i}"), "N", format!("n{i}")));
        }
        for (src, dst) in &edges {
            graph.add_edge(&format!("n{src}"), "E", &format!("n{dst}")).unwrap();
        }
        // and removal keeps the mirror intact
        graph.remove_node("n3");
        for edge in graph.edges() {
            prop_assert!(graph.in_neighbors(&edge.dst, Some(&edge.type_name)).contains(&edge.src));
            prop_assert!(edge.src != "n3" && edge.dst != "n3");
        }
    }
}
