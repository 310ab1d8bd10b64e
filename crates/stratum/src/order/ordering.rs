use super::{Sweep, barycenter_sweep, cross_count, init_order, transpose};
use crate::{InitOrder, LayoutOptions, RankList};
use stratum_graph::{Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    pub init_order: InitOrder,
    /// Consecutive non-improving iterations before giving up.
    pub max_stalls: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            init_order: InitOrder::Ascending,
            max_stalls: 4,
        }
    }
}

impl From<&LayoutOptions> for OrderOptions {
    fn from(opts: &LayoutOptions) -> Self {
        Self {
            init_order: opts.init_order,
            max_stalls: opts.max_stalls,
        }
    }
}

/// Reorders every layer of `layering` to reduce crossings in the unit-span graph `g`.
///
/// Layer membership never changes. The result is the best layering seen, counting the initial
/// order, so it never has more crossings than the initial order.
pub fn order<N, E, G>(g: &Graph<N, E, G>, layering: &[Vec<NodeId>], opts: &OrderOptions) -> RankList {
    let mut current = init_order(g, layering, opts.init_order);
    let mut best = current.clone();
    let mut best_cc = cross_count(g, &best);

    let mut iteration: usize = 0;
    let mut stalls: usize = 0;
    while stalls < opts.max_stalls && best_cc > 0 {
        let sweep = if iteration % 2 == 0 {
            Sweep::Down
        } else {
            Sweep::Up
        };
        barycenter_sweep(g, &mut current, sweep);
        let swaps = transpose(g, &mut current);

        let cc = cross_count(g, &current);
        tracing::trace!(
            iteration,
            ?sweep,
            swaps,
            crossings = cc,
            best = best_cc,
            "ordering iteration"
        );
        if cc < best_cc {
            best_cc = cc;
            best = current.clone();
            stalls = 0;
        } else {
            stalls += 1;
        }
        iteration += 1;
    }

    tracing::debug!(crossings = best_cc, iterations = iteration, "ordering done");
    best
}
