#![allow(missing_docs)]

use tessera::layout::LayeredLayout;
use tessera::{Graph, Node, Query, Result};

fn dependency_graph() -> Result<Graph> {
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
fn matched_paths_layer_by_longest_chain() -> Result<()> {
    let graph = dependency_graph()?;
    let paths = Query::new(&graph).match_paths("x-[:DEPENDS_ON*1..4]->y", Some("app"))?;
    let layout = LayeredLayout::from_paths(&paths);

    assert_eq!(layout.layer_for("app"), Some(0));
    assert_eq!(layout.layer_for("web"), Some(1));
    assert_eq!(layout.layer_for("data"), Some(1));
    assert_eq!(layout.layer_for("core"), Some(2));
    assert_eq!(layout.layer_for("util"), Some(3));
    assert_eq!(layout.max_depth(), 3);
    assert_eq!(layout.roots(), ["app".to_owned()]);
    Ok(())
}

#[test]
fn shortcut_edges_do_not_flatten_layers() -> Result<()> {
    let mut graph = dependency_graph()?;
    graph.add_edge("app", "DEPENDS_ON", "util")?;
    let paths = Query::new(&graph).match_paths("x-[:DEPENDS_ON*1..4]->y", Some("app"))?;
    let layout = LayeredLayout::from_paths(&paths);
    // util is one hop from app but four layers down the longest chain
    assert_eq!(layout.layer_for("util"), Some(3));
    Ok(())
}

#[test]
fn layer_listing_groups_siblings() -> Result<()> {
    let graph = dependency_graph()?;
    let paths = Query::new(&graph).match_paths("x-[:DEPENDS_ON*1..4]->y", Some("app"))?;
    let layout = LayeredLayout::from_paths(&paths);
    let mut middle = layout.nodes_in_layer(1);
    middle.sort_unstable();
    assert_eq!(middle, ["data", "web"]);
    Ok(())
}

#[test]
fn variable_layers_take_the_median() -> Result<()> {
    let graph = dependency_graph()?;
    let paths = Query::new(&graph).match_paths("x:Package-[:DEPENDS_ON]->y:Package", None)?;
    let layout = LayeredLayout::from_paths(&paths);
    // x binds app(0), web(1), data(1), core(2); lower median = 1
    assert_eq!(layout.variable_layer("x"), Some(1));
    // y binds web(1), data(1), core(2), util(3); lower median = 1
    assert_eq!(layout.variable_layer("y"), Some(1));
    Ok(())
}

#[test]
fn single_node_matches_are_placed_with_their_variable() -> Result<()> {
    let mut graph = dependency_graph()?;
    graph.add_node(Node::new("island", "Package", "island"));
    let query = Query::new(&graph);
    // edge-bearing paths set up the scale, the island binds with no edges
    let mut paths = query.match_paths("x:Package-[:DEPENDS_ON]->y:Package", None)?;
    paths.extend(query.match_paths("y:Package", Some("island"))?);
    let layout = LayeredLayout::from_paths(&paths);
    assert_eq!(
        layout.layer_for("island"),
        layout.variable_layer("y"),
        "orphan lands on its variable's median"
    );
    Ok(())
}

#[test]
fn all_edges_dedupes_across_paths() -> Result<()> {
    let graph = dependency_graph()?;
    let paths = Query::new(&graph).match_paths("x-[:DEPENDS_ON*1..4]->y", Some("app"))?;
    let layout = LayeredLayout::from_paths(&paths);
    // every dependency edge appears exactly once despite many chains
    assert_eq!(layout.all_edges().len(), graph.edge_count());
    Ok(())
}
