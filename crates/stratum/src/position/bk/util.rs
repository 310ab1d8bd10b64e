use crate::LayoutGraph;
use stratum_graph::NodeId;

/// Minimum center distance between horizontally adjacent nodes `v` and `w`: half of each width
/// plus half of each node's separation (`edgesep` for dummies, `nodesep` otherwise).
pub(super) fn sep(g: &LayoutGraph, v: NodeId, w: NodeId) -> f64 {
    let opts = g.graph();
    let half = |id: NodeId| -> f64 {
        let Some(label) = g.node(id) else {
            return opts.nodesep / 2.0;
        };
        let spacing = if label.is_dummy() {
            opts.edgesep
        } else {
            opts.nodesep
        };
        (label.width + spacing) / 2.0
    };
    half(v) + half(w)
}

pub(super) fn width(g: &LayoutGraph, v: NodeId) -> f64 {
    g.node(v).map(|n| n.width).unwrap_or(0.0)
}
