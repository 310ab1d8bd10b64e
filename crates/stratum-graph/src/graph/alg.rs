//! Helper algorithms over [`Graph`].

use super::{Graph, NodeId};
use rustc_hash::FxHashMap as HashMap;
use std::collections::{BTreeMap, BTreeSet};

/// Depth-first preorder from `roots`, visiting successors in edge insertion order.
///
/// Roots that are missing from `g` or already reached are skipped.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeId]) -> Vec<NodeId> {
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut out: Vec<NodeId> = Vec::new();

    for &r in roots {
        if !g.has_node(r) || !visited.insert(r) {
            continue;
        }
        out.push(r);
        let mut stack: Vec<(Vec<NodeId>, usize)> = vec![(g.successors(r), 0)];

        while let Some((succs, next)) = stack.last_mut() {
            let Some(&w) = succs.get(*next) else {
                stack.pop();
                continue;
            };
            *next += 1;
            if visited.insert(w) {
                out.push(w);
                stack.push((g.successors(w), 0));
            }
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

/// Depth-first cycle check. Self-loops are not considered cycles here, because the layout
/// pipeline never reverses them.
pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool {
    let mut ids = g.node_ids();
    ids.sort_unstable();

    let mut marks: HashMap<NodeId, Mark> = HashMap::default();
    for start in ids {
        if marks.contains_key(&start) {
            continue;
        }
        marks.insert(start, Mark::Active);
        let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> = vec![(start, g.successors(start), 0)];

        while let Some((v, succs, next)) = stack.last_mut() {
            let Some(&w) = succs.get(*next) else {
                let v = *v;
                marks.insert(v, Mark::Done);
                stack.pop();
                continue;
            };
            *next += 1;
            if w == *v {
                continue;
            }
            match marks.get(&w) {
                Some(Mark::Active) => return false,
                Some(Mark::Done) => {}
                None => {
                    marks.insert(w, Mark::Active);
                    stack.push((w, g.successors(w), 0));
                }
            }
        }
    }
    true
}

/// Strongly connected components with more than one node, plus self-looped singletons.
///
/// Tarjan's algorithm with an explicit call stack.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeId>> {
    let mut next_index: usize = 0;
    let mut indices: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut lowlink: BTreeMap<NodeId, usize> = BTreeMap::new();
    let mut scc_stack: Vec<NodeId> = Vec::new();
    let mut on_stack: BTreeSet<NodeId> = BTreeSet::new();
    let mut sccs: Vec<Vec<NodeId>> = Vec::new();

    for start in g.nodes() {
        if indices.contains_key(&start) {
            continue;
        }

        let mut calls: Vec<(NodeId, Vec<NodeId>, usize)> = Vec::new();
        let mut enter = Some(start);
        loop {
            if let Some(v) = enter.take() {
                indices.insert(v, next_index);
                lowlink.insert(v, next_index);
                next_index += 1;
                scc_stack.push(v);
                on_stack.insert(v);
                calls.push((v, g.successors(v), 0));
            }

            let Some((v, succs, next)) = calls.last_mut() else {
                break;
            };
            let v = *v;

            if let Some(&w) = succs.get(*next) {
                *next += 1;
                match indices.get(&w) {
                    None => enter = Some(w),
                    Some(&w_idx) if on_stack.contains(&w) => {
                        if let Some(low) = lowlink.get_mut(&v) {
                            *low = (*low).min(w_idx);
                        }
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            let v_low = lowlink.get(&v).copied().unwrap_or(usize::MAX);
            if let Some((parent, _, _)) = calls.last() {
                if let Some(low) = lowlink.get_mut(parent) {
                    *low = (*low).min(v_low);
                }
            }

            if Some(&v_low) == indices.get(&v) {
                let mut scc: Vec<NodeId> = Vec::new();
                while let Some(w) = scc_stack.pop() {
                    on_stack.remove(&w);
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    let mut cycles: Vec<Vec<NodeId>> = Vec::new();
    for mut scc in sccs {
        if scc.len() > 1 {
            scc.sort_unstable();
            cycles.push(scc);
        } else if g.has_edge(scc[0], scc[0]) {
            cycles.push(scc);
        }
    }

    cycles.sort();
    cycles
}
