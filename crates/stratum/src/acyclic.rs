//! Break cycles by reversing back edges.
//!
//! The default strategy runs a DFS in ascending node-id order, reverses the first back edge it
//! finds and starts over, until a full pass finds none. `Acyclicer::Greedy` reverses a greedy
//! feedback arc set in one step instead.

use crate::error::{Error, Result, Stage};
use crate::{Acyclicer, LayoutGraph};
use rustc_hash::FxHashSet as HashSet;
use stratum_graph::{EdgeKey, Graph, NodeId, alg};

/// Makes `g` acyclic and returns the reversed edges in their original orientation.
///
/// Reversed edges keep their index and label; their label is flagged `reversed`. Self-loops are
/// never reversed.
pub fn run(g: &mut LayoutGraph) -> Result<Vec<EdgeKey>> {
    match g.graph().acyclicer {
        Acyclicer::Dfs => {
            let limit = g.edge_count();
            reverse_back_edges(g, limit)?;
        }
        Acyclicer::Greedy => {
            let fas = crate::greedy_fas::greedy_fas(g);
            for e in fas.into_iter().filter(|e| !e.is_self_loop()) {
                reverse(g, e)?;
            }
        }
    }

    if !alg::is_acyclic(g) {
        let cycles = alg::find_cycles(g);
        return Err(Error::invariant(
            Stage::Acyclic,
            format!("cycles left after reversing back edges: {cycles:?}"),
        ));
    }

    let reversed: Vec<EdgeKey> = g
        .edges()
        .filter(|e| g.edge(e.index).is_some_and(|l| l.reversed))
        .map(EdgeKey::reversed)
        .collect();
    tracing::debug!(reversed = reversed.len(), "acyclic transform done");
    Ok(reversed)
}

/// One DFS pass: every edge whose target is still on the DFS stack.
///
/// Roots and successors are visited in ascending id / edge insertion order, so the result is
/// deterministic.
pub fn find_back_edges<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey> {
    let mut ids = g.node_ids();
    ids.sort_unstable();

    let mut visited: HashSet<NodeId> = HashSet::default();
    let mut on_stack: HashSet<NodeId> = HashSet::default();
    let mut back: Vec<EdgeKey> = Vec::new();

    for start in ids {
        if !visited.insert(start) {
            continue;
        }
        on_stack.insert(start);
        let mut stack: Vec<(NodeId, Vec<EdgeKey>, usize)> = vec![(start, g.out_edges(start), 0)];

        while let Some((v, out, next)) = stack.last_mut() {
            let Some(&e) = out.get(*next) else {
                let v = *v;
                on_stack.remove(&v);
                stack.pop();
                continue;
            };
            *next += 1;

            if e.is_self_loop() {
                continue;
            }
            if on_stack.contains(&e.w) {
                back.push(e);
            } else if visited.insert(e.w) {
                on_stack.insert(e.w);
                stack.push((e.w, g.out_edges(e.w), 0));
            }
        }
    }
    back
}

/// Reverses the first back edge of each DFS pass until none is left.
///
/// After `max_passes` single reversals, all back edges of the next pass are reversed together,
/// which always leaves `g` acyclic. [`run`] passes the edge count.
pub fn reverse_back_edges(g: &mut LayoutGraph, max_passes: usize) -> Result<()> {
    let mut passes: usize = 0;

    loop {
        let back = find_back_edges(g);
        let Some(&first) = back.first() else {
            return Ok(());
        };

        passes += 1;
        if passes > max_passes {
            // All back edges of a single DFS pass form a feedback arc set.
            tracing::warn!(
                passes,
                remaining = back.len(),
                "acyclic pass limit reached, reversing remaining back edges together"
            );
            for e in back {
                reverse(g, e)?;
            }
            return Ok(());
        }

        reverse(g, first)?;
    }
}

fn reverse(g: &mut LayoutGraph, e: EdgeKey) -> Result<()> {
    g.reverse_edge(e.index)?;
    if let Some(label) = g.edge_mut(e.index) {
        label.reversed = !label.reversed;
    }
    Ok(())
}
