//! Rank assignment by repeated topological peeling.
//!
//! Every source lands on rank 0; a node lands on the rank after the one where its last
//! predecessor was peeled, which is its longest-path distance from a source.

use crate::RankList;
use crate::error::{Error, Result, Stage};
use rustc_hash::FxHashMap as HashMap;
use stratum_graph::{Graph, NodeId};

pub fn longest_path<N, E, G>(g: &Graph<N, E, G>) -> Result<RankList> {
    let mut in_degree: HashMap<NodeId, usize> = HashMap::default();
    for v in g.nodes() {
        let mut deg: usize = 0;
        g.for_each_predecessor(v, |u| {
            if u != v {
                deg += 1;
            }
        });
        in_degree.insert(v, deg);
    }

    let mut current: Vec<NodeId> = g.nodes().filter(|v| in_degree.get(v) == Some(&0)).collect();
    let mut layering: RankList = Vec::new();
    let mut placed: usize = 0;

    while !current.is_empty() {
        current.sort_unstable();
        let mut next: Vec<NodeId> = Vec::new();
        for &v in &current {
            g.for_each_successor(v, |w| {
                if w == v {
                    return;
                }
                if let Some(deg) = in_degree.get_mut(&w) {
                    *deg -= 1;
                    if *deg == 0 {
                        next.push(w);
                    }
                }
            });
        }
        placed += current.len();
        layering.push(std::mem::replace(&mut current, next));
    }

    if placed != g.node_count() {
        return Err(Error::invariant(
            Stage::Rank,
            format!(
                "{} of {} nodes sit on a cycle",
                g.node_count() - placed,
                g.node_count()
            ),
        ));
    }

    tracing::debug!(ranks = layering.len(), nodes = placed, "ranking done");
    Ok(layering)
}

/// Node to rank index.
pub fn rank_of(layering: &[Vec<NodeId>]) -> HashMap<NodeId, usize> {
    let mut out: HashMap<NodeId, usize> = HashMap::default();
    for (rank, layer) in layering.iter().enumerate() {
        for &v in layer {
            out.insert(v, rank);
        }
    }
    out
}

/// Node to position within its layer.
pub fn order_of(layering: &[Vec<NodeId>]) -> HashMap<NodeId, usize> {
    let mut out: HashMap<NodeId, usize> = HashMap::default();
    for layer in layering {
        for (order, &v) in layer.iter().enumerate() {
            out.insert(v, order);
        }
    }
    out
}
