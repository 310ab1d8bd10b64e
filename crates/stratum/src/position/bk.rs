//! Brandes & Köpf (BK) horizontal coordinate assignment.
//!
//! Four passes (up/down × left/right) each align nodes into vertical blocks and compact the
//! blocks horizontally; the narrowest pass anchors the others and the final x is the median of
//! the four.

use crate::error::Result;
use crate::rank::order_of;
use crate::{Alignment, EdgeKind, Layer, LayoutGraph};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::{BTreeMap, BTreeSet};
use stratum_graph::{Graph, NodeId};

mod util;
use util::{sep, width};

/// Type-1 conflicts, stored as `(min, max)` node pairs.
pub type Conflicts = BTreeSet<(NodeId, NodeId)>;

/// x coordinates of every pass, keyed by alignment.
pub type AlignmentXs = BTreeMap<Alignment, HashMap<NodeId, f64>>;

pub fn add_conflict(conflicts: &mut Conflicts, v: NodeId, w: NodeId) {
    conflicts.insert((v.min(w), v.max(w)));
}

pub fn has_conflict(conflicts: &Conflicts, v: NodeId, w: NodeId) -> bool {
    conflicts.contains(&(v.min(w), v.max(w)))
}

pub fn edge_kind(g: &LayoutGraph, v: NodeId, w: NodeId) -> EdgeKind {
    let is_dummy = |n: NodeId| g.node(n).is_some_and(|l| l.is_dummy());
    if is_dummy(v) && is_dummy(w) {
        EdgeKind::Inner
    } else {
        EdgeKind::NonInner
    }
}

/// Marks non-inner edges that cross an inner segment.
///
/// Scanning each lower layer left to right, the inner segments split the upper layer into
/// intervals `[k0, k1]`; a non-inner edge whose upper end lies outside the interval of its lower
/// end crosses a segment.
pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Layer]) -> Conflicts {
    let mut conflicts = Conflicts::new();
    let pos = order_of(layering);

    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);

        let mut k0: usize = 0;
        let mut scan_pos: usize = 0;
        let prev_layer_len = prev_layer.len();
        let last_node = layer.last().copied();

        for (idx, &v) in layer.iter().enumerate() {
            let w = find_other_inner_segment_node(g, v);
            let k1 = w
                .and_then(|w| pos.get(&w).copied())
                .unwrap_or(prev_layer_len);

            if w.is_some() || last_node == Some(v) {
                for &scan_node in &layer[scan_pos..=idx] {
                    for u in g.predecessors(scan_node) {
                        let Some(&u_pos) = pos.get(&u) else {
                            continue;
                        };
                        if (u_pos < k0 || k1 < u_pos)
                            && edge_kind(g, u, scan_node) == EdgeKind::NonInner
                        {
                            add_conflict(&mut conflicts, u, scan_node);
                        }
                    }
                }
                scan_pos = idx + 1;
                k0 = k1;
            }
        }
    }

    conflicts
}

fn find_other_inner_segment_node(g: &LayoutGraph, v: NodeId) -> Option<NodeId> {
    if !g.node(v).is_some_and(|n| n.is_dummy()) {
        return None;
    }
    g.predecessors(v)
        .into_iter()
        .find(|&u| g.node(u).is_some_and(|n| n.is_dummy()))
}

/// Blocks produced by [`vertical_alignment`]: `root` maps each node to its block root, `align`
/// links each node to the next node of its block (cyclically).
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalAlignment {
    pub root: HashMap<NodeId, NodeId>,
    pub align: HashMap<NodeId, NodeId>,
}

/// Aligns every node with a median neighbour from the previous layer of `layering`.
///
/// `neighbours` yields the candidates (predecessors for upward passes, successors for downward
/// ones). A candidate is taken only if it lies right of the last alignment in this layer and
/// is not conflict-marked against the node.
pub fn vertical_alignment<F>(
    layering: &[Layer],
    conflicts: &Conflicts,
    neighbours: F,
) -> VerticalAlignment
where
    F: Fn(NodeId) -> Vec<NodeId>,
{
    let mut root: HashMap<NodeId, NodeId> = HashMap::default();
    let mut align: HashMap<NodeId, NodeId> = HashMap::default();
    let pos = order_of(layering);

    for &v in layering.iter().flatten() {
        root.insert(v, v);
        align.insert(v, v);
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws = neighbours(v);
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|w| pos.get(w).copied().unwrap_or(usize::MAX));

            let mp = (ws.len() - 1) as f64 / 2.0;
            let i0 = mp.floor() as usize;
            let i1 = mp.ceil() as usize;

            for &w in &ws[i0..=i1] {
                let Some(&w_pos) = pos.get(&w) else {
                    continue;
                };
                let unaligned = align.get(&v) == Some(&v);
                if unaligned
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = root.get(&w).copied().unwrap_or(w);
                    align.insert(w, v);
                    align.insert(v, w_root);
                    root.insert(v, w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }

    VerticalAlignment { root, align }
}

/// Places every block as far left as its separation constraints allow, then pulls blocks
/// without a left constraint toward their right neighbours.
///
/// This replaces the per-node `sink`/`shift` bookkeeping of Brandes & Köpf's class compaction.
/// Each block becomes one node of a block graph, with an edge to the block on its right weighted
/// by the required separation. The first pass is a longest path from the left, which is the
/// in-class placement. The second pass takes the tightest slack to the right, which is the
/// class shift, so a class with no left constraint ends up against its right neighbour. Both
/// passes walk the block graph with an explicit stack instead of recursion.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Layer],
    root: &HashMap<NodeId, NodeId>,
    align: &HashMap<NodeId, NodeId>,
) -> Result<HashMap<NodeId, f64>> {
    let mut xs: HashMap<NodeId, f64> = HashMap::default();
    let block_g = build_block_graph(g, layering, root)?;

    fn iterate<F, X>(block_g: &Graph<(), f64>, mut set_xs: F, next_nodes: X)
    where
        F: FnMut(NodeId),
        X: Fn(NodeId) -> Vec<NodeId>,
    {
        let mut stack: Vec<NodeId> = block_g.node_ids();
        let mut visited: HashSet<NodeId> = HashSet::default();

        while let Some(elem) = stack.pop() {
            if visited.contains(&elem) {
                set_xs(elem);
                continue;
            }
            visited.insert(elem);
            stack.push(elem);
            stack.extend(next_nodes(elem));
        }
    }

    // First pass: smallest coordinates.
    iterate(
        &block_g,
        |elem| {
            let mut best: f64 = 0.0;
            for e in block_g.in_edges(elem) {
                let w = block_g.edge(e.index).copied().unwrap_or(0.0);
                let x_v = xs.get(&e.v).copied().unwrap_or(0.0);
                best = best.max(x_v + w);
            }
            xs.insert(elem, best);
        },
        |elem| block_g.predecessors(elem),
    );

    // Second pass: greatest coordinates.
    iterate(
        &block_g,
        |elem| {
            let mut min: f64 = f64::INFINITY;
            for e in block_g.out_edges(elem) {
                let w = block_g.edge(e.index).copied().unwrap_or(0.0);
                let x_w = xs.get(&e.w).copied().unwrap_or(0.0);
                min = min.min(x_w - w);
            }
            if min.is_finite() {
                let cur = xs.get(&elem).copied().unwrap_or(0.0);
                xs.insert(elem, cur.max(min));
            }
        },
        |elem| block_g.successors(elem),
    );

    let mut out: HashMap<NodeId, f64> = HashMap::default();
    for &v in align.keys() {
        let r = root.get(&v).copied().unwrap_or(v);
        out.insert(v, xs.get(&r).copied().unwrap_or(0.0));
    }
    Ok(out)
}

/// One node per block root; an edge `u -> v` for horizontally adjacent blocks, weighted by the
/// largest separation any pair of their members needs.
fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Layer],
    root: &HashMap<NodeId, NodeId>,
) -> Result<Graph<(), f64>> {
    let mut block_g: Graph<(), f64> = Graph::new();
    for layer in layering {
        let mut u: Option<NodeId> = None;
        for &v in layer {
            let v_root = root.get(&v).copied().unwrap_or(v);
            block_g.ensure_node(v_root);

            if let Some(u) = u {
                let u_root = root.get(&u).copied().unwrap_or(u);
                let s = sep(g, v, u);
                match block_g.find_edge(u_root, v_root) {
                    Some(e) => {
                        if let Some(weight) = block_g.edge_mut(e.index) {
                            *weight = weight.max(s);
                        }
                    }
                    None => {
                        block_g.add_edge(u_root, v_root, s)?;
                    }
                }
            }

            u = Some(v);
        }
    }
    Ok(block_g)
}

/// The pass whose drawing (node extents included) is narrowest. Ties keep the earliest pass
/// in [`Alignment::ALL`] order.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &AlignmentXs) -> HashMap<NodeId, f64> {
    let mut best_width: f64 = f64::INFINITY;
    let mut best: HashMap<NodeId, f64> = HashMap::default();

    for alignment in Alignment::ALL {
        let Some(xs) = xss.get(&alignment) else {
            continue;
        };
        let mut max: f64 = f64::NEG_INFINITY;
        let mut min: f64 = f64::INFINITY;
        for (&v, &x) in xs {
            let half_w = width(g, v) / 2.0;
            max = max.max(x + half_w);
            min = min.min(x - half_w);
        }
        let w = max - min;
        if w < best_width {
            best_width = w;
            best = xs.clone();
        }
    }

    best
}

/// Shifts every pass onto `align_to`: left-biased passes share its minimum, right-biased ones
/// its maximum.
pub fn align_coordinates(xss: &mut AlignmentXs, align_to: &HashMap<NodeId, f64>) {
    let align_to_min = align_to.values().copied().fold(f64::INFINITY, f64::min);
    let align_to_max = align_to.values().copied().fold(f64::NEG_INFINITY, f64::max);

    for (alignment, xs) in xss.iter_mut() {
        let delta = if alignment.is_left() {
            align_to_min - xs.values().copied().fold(f64::INFINITY, f64::min)
        } else {
            align_to_max - xs.values().copied().fold(f64::NEG_INFINITY, f64::max)
        };

        if delta.is_finite() && delta != 0.0 {
            for x in xs.values_mut() {
                *x += delta;
            }
        }
    }
}

/// Final x per node: the forced pass when `align` is set, otherwise the median of all passes
/// (the mean of the two middle values when there are four).
pub fn balance(xss: &AlignmentXs, align: Option<Alignment>) -> HashMap<NodeId, f64> {
    let Some(xs_ul) = xss.get(&Alignment::UL) else {
        return HashMap::default();
    };

    let mut out: HashMap<NodeId, f64> = HashMap::default();
    for &v in xs_ul.keys() {
        if let Some(alignment) = align {
            let x = xss
                .get(&alignment)
                .and_then(|xs| xs.get(&v))
                .copied()
                .unwrap_or(0.0);
            out.insert(v, x);
            continue;
        }

        let mut vals: Vec<f64> = xss.values().filter_map(|xs| xs.get(&v).copied()).collect();
        vals.sort_by(|a, b| a.total_cmp(b));
        let mid = vals.len() / 2;
        let x = if vals.len() % 2 == 0 {
            (vals[mid - 1] + vals[mid]) / 2.0
        } else {
            vals[mid]
        };
        out.insert(v, x);
    }
    out
}

/// Runs all four passes over `layering` and balances them.
pub fn position_x(g: &LayoutGraph, layering: &[Layer]) -> Result<HashMap<NodeId, f64>> {
    let conflicts = find_type1_conflicts(g, layering);
    let mut xss: AlignmentXs = BTreeMap::new();

    for alignment in Alignment::ALL {
        let mut adjusted: Vec<Layer> = if alignment.is_up() {
            layering.to_vec()
        } else {
            layering.iter().rev().cloned().collect()
        };
        if !alignment.is_left() {
            for layer in &mut adjusted {
                layer.reverse();
            }
        }

        let neighbours = |v: NodeId| {
            if alignment.is_up() {
                g.predecessors(v)
            } else {
                g.successors(v)
            }
        };

        let blocks = vertical_alignment(&adjusted, &conflicts, neighbours);
        let mut xs = horizontal_compaction(g, &adjusted, &blocks.root, &blocks.align)?;
        if !alignment.is_left() {
            for x in xs.values_mut() {
                *x = -*x;
            }
        }
        xss.insert(alignment, xs);
    }

    let smallest = find_smallest_width_alignment(g, &xss);
    align_coordinates(&mut xss, &smallest);
    Ok(balance(&xss, g.graph().align))
}
