//! Split long edges into unit-span chains through dummy nodes.

use crate::error::{Error, Result, Stage};
use crate::rank::rank_of;
use crate::{ControlPoints, Layer, LayoutGraph, LayoutNode, RankList};
use stratum_graph::Graph;

#[derive(Debug, Clone)]
pub struct Normalized {
    /// Real nodes plus dummies; every edge spans exactly one rank. Self-loops are dropped.
    pub graph: LayoutGraph,
    /// Input layering with each dummy appended to its rank.
    pub layering: RankList,
    pub control_points: ControlPoints,
}

/// Normalizes the acyclic working graph `g` against `layering`.
///
/// Dummy ids start at `max_node_id + 1`, so they never collide with real nodes. Every
/// real node keeps its label with the rank filled in.
pub fn run(g: &LayoutGraph, layering: &[Layer]) -> Result<Normalized> {
    let ranks = rank_of(layering);
    let mut layering: RankList = layering.to_vec();

    let mut out: LayoutGraph = Graph::new();
    out.set_graph(g.graph().clone());
    for v in g.nodes() {
        let Some(&rank) = ranks.get(&v) else {
            return Err(Error::invariant(
                Stage::Normalize,
                format!("node {v} is missing from the layering"),
            ));
        };
        let mut label = g.node(v).cloned().unwrap_or_default();
        label.rank = Some(rank);
        out.set_node(v, label);
    }

    let mut next_id = g.max_node_id().map_or(0, |m| m + 1);
    let mut control_points = ControlPoints::new();
    let mut dummy_count: usize = 0;

    for e in g.edges() {
        let label = g.edge(e.index).copied().unwrap_or_default();
        if e.is_self_loop() {
            control_points.insert(e, Vec::new());
            continue;
        }

        let (Some(&v_rank), Some(&w_rank)) = (ranks.get(&e.v), ranks.get(&e.w)) else {
            return Err(Error::invariant(
                Stage::Normalize,
                format!("edge {} -> {} has an unranked endpoint", e.v, e.w),
            ));
        };
        if w_rank <= v_rank {
            return Err(Error::invariant(
                Stage::Normalize,
                format!(
                    "edge {} -> {} points from rank {v_rank} to rank {w_rank}",
                    e.v, e.w
                ),
            ));
        }

        let mut dummies = Vec::with_capacity(w_rank - v_rank - 1);
        let mut prev = e.v;
        for rank in v_rank + 1..w_rank {
            let dummy = next_id;
            next_id += 1;
            out.set_node(
                dummy,
                LayoutNode {
                    dummy: Some(e),
                    rank: Some(rank),
                    ..Default::default()
                },
            );
            layering[rank].push(dummy);
            out.add_edge(prev, dummy, label)?;
            dummies.push(dummy);
            prev = dummy;
        }
        out.add_edge(prev, e.w, label)?;

        dummy_count += dummies.len();
        control_points.insert(e, dummies);
    }

    tracing::debug!(
        dummies = dummy_count,
        edges = out.edge_count(),
        "normalization done"
    );
    Ok(Normalized {
        graph: out,
        layering,
        control_points,
    })
}
