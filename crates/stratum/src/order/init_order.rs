use crate::InitOrder;
use crate::rank::rank_of;
use stratum_graph::{Graph, NodeId, alg};

/// Initial left-to-right order of every layer.
///
/// `Ascending` sorts each layer by id. `Dfs` walks successors depth-first from every node in
/// (rank, id) order and appends nodes to their layer as they are first reached.
pub fn init_order<N, E, G>(
    g: &Graph<N, E, G>,
    layering: &[Vec<NodeId>],
    strategy: InitOrder,
) -> Vec<Vec<NodeId>> {
    match strategy {
        InitOrder::Ascending => layering
            .iter()
            .map(|layer| {
                let mut layer = layer.clone();
                layer.sort_unstable();
                layer
            })
            .collect(),
        InitOrder::Dfs => {
            let ranks = rank_of(layering);
            let mut roots: Vec<NodeId> = layering.iter().flatten().copied().collect();
            roots.sort_unstable_by_key(|v| (ranks.get(v).copied(), *v));

            let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); layering.len()];
            for v in alg::preorder(g, &roots) {
                if let Some(&rank) = ranks.get(&v) {
                    layers[rank].push(v);
                }
            }
            layers
        }
    }
}
