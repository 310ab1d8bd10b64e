use rustc_hash::FxHashMap as HashMap;
use stratum_graph::{Graph, NodeId};

/// Swaps adjacent nodes while doing so strictly lowers the crossings around their layer.
///
/// A swap of `u` and `v` only changes crossings between edges of `u` and edges of `v`, so each
/// candidate is decided from `c(u, v)` against `c(v, u)` over the two neighbouring layers.
/// Passes over all layers repeat until one makes no swap. Returns the number of swaps kept.
pub fn transpose<N, E, G>(g: &Graph<N, E, G>, layering: &mut [Vec<NodeId>]) -> usize {
    let mut pos: Vec<HashMap<NodeId, usize>> = layering
        .iter()
        .map(|layer| layer.iter().enumerate().map(|(i, &v)| (v, i)).collect())
        .collect();

    let mut swaps: usize = 0;
    loop {
        let mut improved = false;
        for r in 0..layering.len() {
            for i in 0..layering[r].len().saturating_sub(1) {
                let u = layering[r][i];
                let v = layering[r][i + 1];
                let north = r.checked_sub(1).and_then(|n| pos.get(n));
                let south = pos.get(r + 1);

                let up_u = neighbour_positions(g, u, north, Side::Predecessors);
                let up_v = neighbour_positions(g, v, north, Side::Predecessors);
                let down_u = neighbour_positions(g, u, south, Side::Successors);
                let down_v = neighbour_positions(g, v, south, Side::Successors);

                let kept = pair_crossings(&up_u, &up_v) + pair_crossings(&down_u, &down_v);
                let swapped = pair_crossings(&up_v, &up_u) + pair_crossings(&down_v, &down_u);
                if swapped < kept {
                    layering[r].swap(i, i + 1);
                    pos[r].insert(u, i + 1);
                    pos[r].insert(v, i);
                    improved = true;
                    swaps += 1;
                }
            }
        }
        if !improved {
            return swaps;
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Predecessors,
    Successors,
}

/// Sorted positions of `v`'s neighbours within `layer`, one entry per edge.
fn neighbour_positions<N, E, G>(
    g: &Graph<N, E, G>,
    v: NodeId,
    layer: Option<&HashMap<NodeId, usize>>,
    side: Side,
) -> Vec<usize> {
    let Some(layer) = layer else {
        return Vec::new();
    };
    let mut out: Vec<usize> = Vec::new();
    let mut push = |w: NodeId| {
        if let Some(&p) = layer.get(&w) {
            out.push(p);
        }
    };
    match side {
        Side::Predecessors => g.for_each_predecessor(v, &mut push),
        Side::Successors => g.for_each_successor(v, &mut push),
    }
    out.sort_unstable();
    out
}

/// Crossings between the edges of a left node and a right node: pairs where the left node's
/// neighbour sits strictly right of the right node's neighbour. Both inputs must be sorted.
fn pair_crossings(left: &[usize], right: &[usize]) -> usize {
    let mut below: usize = 0;
    let mut total: usize = 0;
    for &p in left {
        while below < right.len() && right[below] < p {
            below += 1;
        }
        total += below;
    }
    total
}
