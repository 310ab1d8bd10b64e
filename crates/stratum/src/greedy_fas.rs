//! Greedy feedback arc set (Eades, Lin & Smyth).
//!
//! Nodes are bucketed by `out - in` degree. Sinks and sources are peeled first; otherwise the
//! node with the largest degree delta is removed and its remaining incoming edges join the arc
//! set. Parallel edges are aggregated, so every returned key of a `(v, w)` pair is reversed
//! together.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::{VecDeque, hash_map::Entry};
use stratum_graph::{EdgeKey, Graph, NodeId};

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey> {
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let node_ids = g.node_ids();
    let mut in_w: HashMap<NodeId, i64> = HashMap::default();
    let mut out_w: HashMap<NodeId, i64> = HashMap::default();
    for &v in &node_ids {
        in_w.insert(v, 0);
        out_w.insert(v, 0);
    }

    let mut edge_w: HashMap<(NodeId, NodeId), i64> = HashMap::default();
    let mut edge_order: Vec<(NodeId, NodeId)> = Vec::new();
    let mut max_in: i64 = 0;
    let mut max_out: i64 = 0;

    for e in g.edges().filter(|e| !e.is_self_loop()) {
        match edge_w.entry((e.v, e.w)) {
            Entry::Vacant(slot) => {
                slot.insert(1);
                edge_order.push((e.v, e.w));
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += 1,
        }
        let o = out_w.entry(e.v).or_insert(0);
        *o += 1;
        max_out = max_out.max(*o);
        let i = in_w.entry(e.w).or_insert(0);
        *i += 1;
        max_in = max_in.max(*i);
    }

    let mut in_edges: HashMap<NodeId, Vec<(NodeId, i64)>> = HashMap::default();
    let mut out_edges: HashMap<NodeId, Vec<(NodeId, i64)>> = HashMap::default();
    for &(v, w) in &edge_order {
        let weight = edge_w.get(&(v, w)).copied().unwrap_or(0);
        out_edges.entry(v).or_default().push((w, weight));
        in_edges.entry(w).or_default().push((v, weight));
    }

    let bucket_len: usize = (max_out + max_in + 3).max(3) as usize;
    let mut peel = Peeler {
        alive: node_ids.iter().copied().collect(),
        buckets: (0..bucket_len).map(|_| VecDeque::new()).collect(),
        zero_idx: max_in + 1,
        bucket_of: HashMap::default(),
        in_w,
        out_w,
        in_edges,
        out_edges,
    };
    for &v in &node_ids {
        peel.assign_bucket(v);
    }

    let results = peel.run(&node_ids);

    let mut out: Vec<EdgeKey> = Vec::new();
    for (v, w) in results {
        out.extend(g.out_edges(v).into_iter().filter(|e| e.w == w));
    }
    out
}

/// Bucket queue over the aggregated graph. Bucket 0 holds sinks, the last bucket holds sources,
/// and the rest are indexed by `out - in + zero_idx`.
struct Peeler {
    alive: HashSet<NodeId>,
    buckets: Vec<VecDeque<NodeId>>,
    zero_idx: i64,
    bucket_of: HashMap<NodeId, usize>,
    in_w: HashMap<NodeId, i64>,
    out_w: HashMap<NodeId, i64>,
    in_edges: HashMap<NodeId, Vec<(NodeId, i64)>>,
    out_edges: HashMap<NodeId, Vec<(NodeId, i64)>>,
}

impl Peeler {
    /// Removes every node and returns the `(v, w)` pairs that form the arc set.
    fn run(&mut self, node_ids: &[NodeId]) -> Vec<(NodeId, NodeId)> {
        let mut results: Vec<(NodeId, NodeId)> = Vec::new();
        let last = self.buckets.len() - 1;

        while !self.alive.is_empty() {
            while let Some(v) = self.pop_bucket(0) {
                self.remove_node(v, None);
            }
            while let Some(v) = self.pop_bucket(last) {
                self.remove_node(v, None);
            }
            if self.alive.is_empty() {
                break;
            }

            match (1..last).rev().find_map(|i| self.pop_bucket(i)) {
                Some(v) => self.remove_node(v, Some(&mut results)),
                None => {
                    // Only sinks and sources are left.
                    let Some(v) = node_ids.iter().copied().find(|id| self.alive.contains(id))
                    else {
                        break;
                    };
                    self.remove_node(v, None);
                }
            }
        }
        results
    }

    fn assign_bucket(&mut self, v: NodeId) {
        if let Some(prev) = self.bucket_of.get(&v).copied() {
            if let Some(pos) = self.buckets[prev].iter().position(|&x| x == v) {
                self.buckets[prev].remove(pos);
            }
        }

        let last = self.buckets.len() - 1;
        let in_v = self.in_w.get(&v).copied().unwrap_or(0);
        let out_v = self.out_w.get(&v).copied().unwrap_or(0);
        let idx: usize = if out_v == 0 {
            0
        } else if in_v == 0 {
            last
        } else {
            (out_v - in_v + self.zero_idx).clamp(0, last as i64) as usize
        };

        self.buckets[idx].push_front(v);
        self.bucket_of.insert(v, idx);
    }

    fn pop_bucket(&mut self, idx: usize) -> Option<NodeId> {
        while let Some(v) = self.buckets[idx].pop_back() {
            if self.alive.contains(&v) {
                self.bucket_of.remove(&v);
                return Some(v);
            }
        }
        None
    }

    /// Drops `v` and rebuckets its live neighbours. With `arcs`, the live incoming edges of `v`
    /// are recorded first.
    fn remove_node(&mut self, v: NodeId, arcs: Option<&mut Vec<(NodeId, NodeId)>>) {
        if !self.alive.remove(&v) {
            return;
        }
        let ins = self.in_edges.remove(&v).unwrap_or_default();
        let outs = self.out_edges.remove(&v).unwrap_or_default();

        if let Some(arcs) = arcs {
            arcs.extend(
                ins.iter()
                    .filter(|(u, _)| self.alive.contains(u))
                    .map(|&(u, _)| (u, v)),
            );
        }

        for (u, weight) in ins {
            if !self.alive.contains(&u) {
                continue;
            }
            if let Some(o) = self.out_w.get_mut(&u) {
                *o -= weight;
            }
            self.assign_bucket(u);
        }
        for (w, weight) in outs {
            if !self.alive.contains(&w) {
                continue;
            }
            if let Some(i) = self.in_w.get_mut(&w) {
                *i -= weight;
            }
            self.assign_bucket(w);
        }

        self.in_w.remove(&v);
        self.out_w.remove(&v);
        self.bucket_of.remove(&v);
    }
}
