use rustc_hash::FxHashMap as HashMap;
use stratum_graph::{Graph, NodeId};

/// Total crossings between every pair of adjacent layers.
pub fn cross_count<N, E, G>(g: &Graph<N, E, G>, layering: &[Vec<NodeId>]) -> usize {
    layering
        .windows(2)
        .map(|pair| two_layer_cross_count(g, &pair[0], &pair[1]))
        .sum()
}

/// Bilayer crossing count (Barth, Jünger & Mutzel) using an accumulator tree.
///
/// Only edges from `north` into `south` count. Parallel edges count once each; edges sharing an
/// endpoint never cross.
pub fn two_layer_cross_count<N, E, G>(
    g: &Graph<N, E, G>,
    north: &[NodeId],
    south: &[NodeId],
) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos: HashMap<NodeId, usize> = HashMap::default();
    for (i, &v) in south.iter().enumerate() {
        south_pos.insert(v, i);
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = Vec::new();
        g.for_each_successor(v, |w| {
            if let Some(&pos) = south_pos.get(&w) {
                entries.push(pos);
            }
        });
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc: usize = 0;
    for pos in south_entries {
        let mut index = pos + first_index;
        tree[index] += 1;
        let mut weight_sum: usize = 0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += weight_sum;
    }

    cc
}
