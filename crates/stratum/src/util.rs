//! Layering and geometry helpers shared by the stages.

use crate::error::{Error, Result, Stage};
use crate::{Layer, LayoutGraph, RankList};
use rustc_hash::FxHashSet as HashSet;
use stratum_graph::{Graph, NodeId};

/// Builds the layering described by the `rank` / `order` fields of the node labels. Nodes
/// without a rank are skipped.
pub fn build_layer_matrix(g: &LayoutGraph) -> RankList {
    let mut layers: Vec<Vec<(usize, NodeId)>> = Vec::new();
    for v in g.nodes() {
        let Some(node) = g.node(v) else {
            continue;
        };
        let Some(rank) = node.rank else {
            continue;
        };
        if layers.len() <= rank {
            layers.resize_with(rank + 1, Vec::new);
        }
        layers[rank].push((node.order.unwrap_or(usize::MAX), v));
    }
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|&(order, v)| (order, v));
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}

/// Checks that `layering` holds every node of `g` exactly once and nothing else.
pub fn check_layering<N, E, G>(g: &Graph<N, E, G>, layering: &[Layer], stage: Stage) -> Result<()> {
    let mut seen: HashSet<NodeId> = HashSet::default();
    for &v in layering.iter().flatten() {
        if !g.has_node(v) {
            return Err(Error::invariant(
                stage,
                format!("layering names node {v}, which is not in the graph"),
            ));
        }
        if !seen.insert(v) {
            return Err(Error::invariant(
                stage,
                format!("node {v} appears more than once in the layering"),
            ));
        }
    }
    if let Some(v) = g.nodes().find(|v| !seen.contains(v)) {
        return Err(Error::invariant(
            stage,
            format!("node {v} is missing from the layering"),
        ));
    }
    Ok(())
}

/// Moves the drawing so its bounding box (node extents included) starts at
/// `(marginx, marginy)`, and returns the drawing's `(width, height)` including both margins.
///
/// A graph without positioned nodes yields a box made of the margins alone.
pub fn translate(g: &mut LayoutGraph) -> (f64, f64) {
    let marginx = g.graph().marginx;
    let marginy = g.graph().marginy;

    let mut min_x: f64 = f64::INFINITY;
    let mut max_x: f64 = f64::NEG_INFINITY;
    let mut min_y: f64 = f64::INFINITY;
    let mut max_y: f64 = f64::NEG_INFINITY;
    for v in g.nodes() {
        let Some(n) = g.node(v) else {
            continue;
        };
        let (Some(x), Some(y)) = (n.x, n.y) else {
            continue;
        };
        min_x = min_x.min(x - n.width / 2.0);
        max_x = max_x.max(x + n.width / 2.0);
        min_y = min_y.min(y - n.height / 2.0);
        max_y = max_y.max(y + n.height / 2.0);
    }

    if !min_x.is_finite() || !min_y.is_finite() {
        return (2.0 * marginx, 2.0 * marginy);
    }

    let dx = marginx - min_x;
    let dy = marginy - min_y;
    g.for_each_node_mut(|_id, n| {
        if let Some(x) = n.x {
            n.x = Some(x + dx);
        }
        if let Some(y) = n.y {
            n.y = Some(y + dy);
        }
    });

    (
        max_x - min_x + 2.0 * marginx,
        max_y - min_y + 2.0 * marginy,
    )
}
