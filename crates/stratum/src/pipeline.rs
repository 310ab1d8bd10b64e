//! The full layout pipeline.

use crate::error::{Error, Result, Stage};
use crate::normalize::Normalized;
use crate::order::OrderOptions;
use crate::{
    CoordinateMap, Layout, LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, RankList, acyclic,
    normalize, order, position, rank, undo, util,
};
use stratum_graph::Graph;

/// Lays out `graph`. Node and edge labels of the input are ignored; node sizes come from
/// `opts`.
///
/// The input is never modified. Dummy nodes never appear in the result: `ranks` and
/// `coordinates` hold the caller's nodes only, and every caller edge is keyed in its original
/// orientation in `edges`.
pub fn layout<N, E, G>(graph: &Graph<N, E, G>, opts: &LayoutOptions) -> Result<Layout> {
    opts.validate()?;
    if let Some(&id) = opts.node_sizes.keys().find(|&&id| !graph.has_node(id)) {
        return Err(Error::UnknownNode { id });
    }

    let mut g = build_working_graph(graph, opts)?;
    tracing::debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "layout started"
    );

    let reversed = acyclic::run(&mut g)?;
    let layering = rank::longest_path(&g)?;
    let Normalized {
        graph: mut unit,
        layering,
        control_points,
    } = normalize::run(&g, &layering)?;

    let layering = order::order(&unit, &layering, &OrderOptions::from(opts));
    util::check_layering(&unit, &layering, Stage::Order)?;
    let positioned = position::position(&mut unit, &layering)?;
    let edges = undo::undo(&control_points, &positioned.coordinates, &reversed)?;

    let ranks: RankList = layering
        .iter()
        .map(|layer| {
            layer
                .iter()
                .copied()
                .filter(|&v| graph.has_node(v))
                .collect()
        })
        .collect();
    let coordinates: CoordinateMap = positioned
        .coordinates
        .into_iter()
        .filter(|(v, _)| graph.has_node(*v))
        .collect();

    Ok(Layout {
        ranks,
        coordinates,
        edges,
        width: positioned.width,
        height: positioned.height,
    })
}

/// Copies nodes and edges in insertion order, so working edge indices match the caller's.
fn build_working_graph<N, E, G>(graph: &Graph<N, E, G>, opts: &LayoutOptions) -> Result<LayoutGraph> {
    let mut g: LayoutGraph = Graph::new();
    g.set_graph(opts.clone());
    for v in graph.nodes() {
        let size = opts.node_size(v);
        g.set_node(v, LayoutNode::new(size.width, size.height));
    }
    for e in graph.edges() {
        g.add_edge(
            e.v,
            e.w,
            LayoutEdge {
                origin: e.index,
                reversed: false,
            },
        )?;
    }
    Ok(g)
}
