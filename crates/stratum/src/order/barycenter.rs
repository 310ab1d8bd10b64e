use rustc_hash::FxHashMap as HashMap;
use stratum_graph::{Graph, NodeId};

/// Barycenter of a node with no neighbour in the fixed layer. It sorts ahead of every real
/// barycenter.
pub const NO_NEIGHBOURS: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Reorder ranks `1..` against the rank above (predecessors).
    Down,
    /// Reorder ranks `..len-1` against the rank below (successors).
    Up,
}

/// Average position of `v`'s neighbours in the fixed layer, counting parallel edges once each.
pub fn barycenter<N, E, G>(
    g: &Graph<N, E, G>,
    v: NodeId,
    fixed_pos: &HashMap<NodeId, usize>,
    sweep: Sweep,
) -> f64 {
    let mut sum: usize = 0;
    let mut count: usize = 0;
    let mut visit = |u: NodeId| {
        if let Some(&pos) = fixed_pos.get(&u) {
            sum += pos;
            count += 1;
        }
    };
    match sweep {
        Sweep::Down => g.for_each_predecessor(v, &mut visit),
        Sweep::Up => g.for_each_successor(v, &mut visit),
    }

    if count == 0 {
        NO_NEIGHBOURS
    } else {
        sum as f64 / count as f64
    }
}

/// One sweep over all layers. Each layer is stably sorted by barycenter against the layer
/// that was reordered just before it.
pub fn barycenter_sweep<N, E, G>(g: &Graph<N, E, G>, layering: &mut [Vec<NodeId>], sweep: Sweep) {
    let len = layering.len();
    match sweep {
        Sweep::Down => {
            for r in 1..len {
                let (fixed, rest) = layering.split_at_mut(r);
                reorder(g, &mut rest[0], &fixed[r - 1], sweep);
            }
        }
        Sweep::Up => {
            for r in (0..len.saturating_sub(1)).rev() {
                let (head, tail) = layering.split_at_mut(r + 1);
                reorder(g, &mut head[r], &tail[0], sweep);
            }
        }
    }
}

fn reorder<N, E, G>(g: &Graph<N, E, G>, layer: &mut Vec<NodeId>, fixed: &[NodeId], sweep: Sweep) {
    let fixed_pos: HashMap<NodeId, usize> =
        fixed.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut entries: Vec<(f64, NodeId)> = layer
        .iter()
        .map(|&v| (barycenter(g, v, &fixed_pos, sweep), v))
        .collect();
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));

    *layer = entries.into_iter().map(|(_, v)| v).collect();
}
