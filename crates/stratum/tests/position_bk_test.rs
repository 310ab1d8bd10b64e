use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use stratum::graph::{EdgeKey, Graph, NodeId};
use stratum::position::bk;
use stratum::util;
use stratum::{Alignment, LayoutGraph, LayoutNode};

fn new_graph() -> LayoutGraph {
    Graph::new()
}

fn set_node_rank_order(g: &mut LayoutGraph, id: NodeId, rank: usize, order: usize) {
    g.set_node(
        id,
        LayoutNode {
            rank: Some(rank),
            order: Some(order),
            ..Default::default()
        },
    );
}

fn set_node_with(
    g: &mut LayoutGraph,
    id: NodeId,
    rank: usize,
    order: usize,
    width: f64,
    dummy: bool,
) {
    g.set_node(
        id,
        LayoutNode {
            rank: Some(rank),
            order: Some(order),
            width,
            dummy: dummy.then(|| EdgeKey::new(0, 0, 0)),
            ..Default::default()
        },
    );
}

fn mark_dummy(g: &mut LayoutGraph, id: NodeId) {
    if let Some(n) = g.node_mut(id) {
        n.dummy = Some(EdgeKey::new(0, 0, 0));
    }
}

fn hm(pairs: &[(NodeId, NodeId)]) -> FxHashMap<NodeId, NodeId> {
    pairs.iter().copied().collect()
}

fn xs(pairs: &[(NodeId, f64)]) -> FxHashMap<NodeId, f64> {
    pairs.iter().copied().collect()
}

fn xss(ul: &[(NodeId, f64)], ur: &[(NodeId, f64)], dl: &[(NodeId, f64)], dr: &[(NodeId, f64)]) -> bk::AlignmentXs {
    BTreeMap::from([
        (Alignment::UL, xs(ul)),
        (Alignment::UR, xs(ur)),
        (Alignment::DL, xs(dl)),
        (Alignment::DR, xs(dr)),
    ])
}

// a=0 b=1 on rank 0, c=2 d=3 on rank 1, with edges a -> d and b -> c.
fn crossed_graph() -> LayoutGraph {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    set_node_rank_order(&mut g, 3, 1, 1);
    g.set_edge(0, 3).unwrap();
    g.set_edge(1, 2).unwrap();
    g
}

#[test]
fn find_type1_conflicts_does_not_mark_edges_that_have_no_conflict() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    set_node_rank_order(&mut g, 3, 1, 1);
    g.set_edge(0, 2).unwrap();
    g.set_edge(1, 3).unwrap();
    for v in 1..4 {
        mark_dummy(&mut g, v);
    }
    let layering = util::build_layer_matrix(&g);

    let conflicts = bk::find_type1_conflicts(&g, &layering);
    assert!(conflicts.is_empty());
}

#[test]
fn find_type1_conflicts_does_not_mark_type_0_conflicts() {
    let g = crossed_graph();
    let layering = util::build_layer_matrix(&g);
    let conflicts = bk::find_type1_conflicts(&g, &layering);
    assert!(!bk::has_conflict(&conflicts, 0, 3));
    assert!(!bk::has_conflict(&conflicts, 1, 2));

    for dummy in 0..4 {
        let mut g = crossed_graph();
        mark_dummy(&mut g, dummy);
        let conflicts = bk::find_type1_conflicts(&g, &layering);
        assert!(conflicts.is_empty(), "dummy {dummy}");
    }
}

#[test]
fn find_type1_conflicts_marks_the_non_inner_edge_crossing_an_inner_segment() {
    for (non_dummy, expected) in [(0, (0, 3)), (1, (1, 2)), (2, (1, 2)), (3, (0, 3))] {
        let mut g = crossed_graph();
        let layering = util::build_layer_matrix(&g);
        for v in (0..4).filter(|&v| v != non_dummy) {
            mark_dummy(&mut g, v);
        }

        let conflicts = bk::find_type1_conflicts(&g, &layering);
        let other = if expected == (0, 3) { (1, 2) } else { (0, 3) };
        assert!(bk::has_conflict(&conflicts, expected.0, expected.1), "{non_dummy}");
        assert!(!bk::has_conflict(&conflicts, other.0, other.1), "{non_dummy}");
    }
}

#[test]
fn find_type1_conflicts_does_not_mark_type_2_conflicts() {
    let mut g = crossed_graph();
    let layering = util::build_layer_matrix(&g);
    for v in 0..4 {
        mark_dummy(&mut g, v);
    }
    let conflicts = bk::find_type1_conflicts(&g, &layering);
    assert!(conflicts.is_empty());
}

#[test]
fn has_conflict_ignores_edge_orientation() {
    let mut conflicts = bk::Conflicts::new();
    bk::add_conflict(&mut conflicts, 7, 2);
    assert!(bk::has_conflict(&conflicts, 7, 2));
    assert!(bk::has_conflict(&conflicts, 2, 7));
}

#[test]
fn has_conflict_works_for_multiple_conflicts_with_the_same_node() {
    let mut conflicts = bk::Conflicts::new();
    bk::add_conflict(&mut conflicts, 0, 1);
    bk::add_conflict(&mut conflicts, 0, 2);
    assert!(bk::has_conflict(&conflicts, 0, 1));
    assert!(bk::has_conflict(&conflicts, 0, 2));
    assert!(!bk::has_conflict(&conflicts, 1, 2));
}

fn align_up(g: &LayoutGraph, conflicts: &bk::Conflicts) -> bk::VerticalAlignment {
    let layering = util::build_layer_matrix(g);
    bk::vertical_alignment(&layering, conflicts, |v| g.predecessors(v))
}

#[test]
fn vertical_alignment_aligns_with_itself_if_the_node_has_no_adjacencies() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 1, 0);

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 1)]),
            align: hm(&[(0, 0), (1, 1)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_with_its_sole_adjacency() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 1, 0);
    g.set_edge(0, 1).unwrap();

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 0)]),
            align: hm(&[(0, 1), (1, 0)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_with_its_left_median_when_possible() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    g.set_edge(0, 2).unwrap();
    g.set_edge(1, 2).unwrap();

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 1), (2, 0)]),
            align: hm(&[(0, 2), (1, 1), (2, 0)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_correctly_regardless_of_node_id_or_insertion_order() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    set_node_rank_order(&mut g, 9, 0, 0);
    g.set_edge(1, 2).unwrap();
    g.set_edge(9, 2).unwrap();

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(9, 9), (1, 1), (2, 9)]),
            align: hm(&[(9, 2), (1, 1), (2, 9)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_with_its_right_median_when_left_is_unavailable() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    g.set_edge(0, 2).unwrap();
    g.set_edge(1, 2).unwrap();
    let mut conflicts = bk::Conflicts::new();
    bk::add_conflict(&mut conflicts, 0, 2);

    let result = align_up(&g, &conflicts);
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 1), (2, 1)]),
            align: hm(&[(0, 0), (1, 2), (2, 1)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_with_neither_median_if_both_are_unavailable() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 1, 0);
    set_node_rank_order(&mut g, 3, 1, 1);
    g.set_edge(0, 3).unwrap();
    g.set_edge(1, 2).unwrap();
    g.set_edge(1, 3).unwrap();

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 1), (2, 1), (3, 3)]),
            align: hm(&[(0, 0), (1, 2), (2, 1), (3, 3)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_with_the_single_median_for_an_odd_number_of_adjacencies() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 0, 1);
    set_node_rank_order(&mut g, 2, 0, 2);
    set_node_rank_order(&mut g, 3, 1, 0);
    g.set_edge(0, 3).unwrap();
    g.set_edge(1, 3).unwrap();
    g.set_edge(2, 3).unwrap();

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 1), (2, 2), (3, 1)]),
            align: hm(&[(0, 0), (1, 3), (2, 2), (3, 1)]),
        }
    );
}

#[test]
fn vertical_alignment_aligns_blocks_across_multiple_layers() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    set_node_rank_order(&mut g, 1, 1, 0);
    set_node_rank_order(&mut g, 2, 1, 1);
    set_node_rank_order(&mut g, 3, 2, 0);
    g.set_path(&[0, 1, 3]);
    g.set_path(&[0, 2, 3]);

    let result = align_up(&g, &bk::Conflicts::new());
    assert_eq!(
        result,
        bk::VerticalAlignment {
            root: hm(&[(0, 0), (1, 0), (2, 2), (3, 0)]),
            align: hm(&[(0, 1), (1, 3), (2, 2), (3, 0)]),
        }
    );
}

fn compact(
    g: &LayoutGraph,
    root: &[(NodeId, NodeId)],
    align: &[(NodeId, NodeId)],
) -> FxHashMap<NodeId, f64> {
    let layering = util::build_layer_matrix(g);
    bk::horizontal_compaction(g, &layering, &hm(root), &hm(align)).unwrap()
}

#[test]
fn horizontal_compaction_places_the_center_of_a_single_node_graph_at_origin() {
    let mut g = new_graph();
    set_node_rank_order(&mut g, 0, 0, 0);
    let xs = compact(&g, &[(0, 0)], &[(0, 0)]);
    assert_eq!(xs[&0], 0.0);
}

#[test]
fn horizontal_compaction_separates_adjacent_nodes_by_node_separation() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 100.0;
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 0, 1, 200.0, false);

    let xs = compact(&g, &[(0, 0), (1, 1)], &[(0, 0), (1, 1)]);
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 100.0 / 2.0 + 100.0 + 200.0 / 2.0);
}

#[test]
fn horizontal_compaction_separates_adjacent_dummies_by_edge_separation() {
    let mut g = new_graph();
    g.graph_mut().edgesep = 20.0;
    set_node_with(&mut g, 0, 0, 0, 100.0, true);
    set_node_with(&mut g, 1, 0, 1, 200.0, true);

    let xs = compact(&g, &[(0, 0), (1, 1)], &[(0, 0), (1, 1)]);
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 100.0 / 2.0 + 20.0 + 200.0 / 2.0);
}

#[test]
fn horizontal_compaction_mixes_node_and_edge_separation() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 100.0;
    g.graph_mut().edgesep = 20.0;
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 0, 1, 200.0, true);

    let xs = compact(&g, &[(0, 0), (1, 1)], &[(0, 0), (1, 1)]);
    assert_eq!(xs[&1], (100.0 + 100.0) / 2.0 + (200.0 + 20.0) / 2.0);
}

#[test]
fn horizontal_compaction_aligns_the_centers_of_nodes_in_the_same_block() {
    let mut g = new_graph();
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 1, 0, 200.0, false);

    let xs = compact(&g, &[(0, 0), (1, 0)], &[(0, 1), (1, 0)]);
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 0.0);
}

#[test]
fn horizontal_compaction_separates_blocks_with_the_appropriate_separation() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 1, 1, 200.0, false);
    set_node_with(&mut g, 2, 1, 0, 50.0, false);

    let xs = compact(&g, &[(0, 0), (1, 0), (2, 2)], &[(0, 1), (1, 0), (2, 2)]);
    assert_eq!(xs[&0], 50.0 / 2.0 + 75.0 + 200.0 / 2.0);
    assert_eq!(xs[&1], 50.0 / 2.0 + 75.0 + 200.0 / 2.0);
    assert_eq!(xs[&2], 0.0);
}

#[test]
fn horizontal_compaction_separates_classes_with_the_appropriate_separation() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 0, 1, 200.0, false);
    set_node_with(&mut g, 2, 1, 0, 50.0, false);
    set_node_with(&mut g, 3, 1, 1, 80.0, false);

    let xs = compact(
        &g,
        &[(0, 0), (1, 1), (2, 2), (3, 1)],
        &[(0, 0), (1, 3), (2, 2), (3, 1)],
    );
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 100.0 / 2.0 + 75.0 + 200.0 / 2.0);
    assert_eq!(
        xs[&2],
        100.0 / 2.0 + 75.0 + 200.0 / 2.0 - 80.0 / 2.0 - 75.0 - 50.0 / 2.0
    );
    assert_eq!(xs[&3], 100.0 / 2.0 + 75.0 + 200.0 / 2.0);
}

#[test]
fn horizontal_compaction_shifts_classes_by_max_sep_from_the_adjacent_block() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    set_node_with(&mut g, 0, 0, 0, 50.0, false);
    set_node_with(&mut g, 1, 0, 1, 150.0, false);
    set_node_with(&mut g, 2, 1, 0, 60.0, false);
    set_node_with(&mut g, 3, 1, 1, 70.0, false);
    let root = [(0, 0), (1, 1), (2, 0), (3, 1)];
    let align = [(0, 2), (1, 3), (2, 0), (3, 1)];

    let xs = compact(&g, &root, &align);
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 50.0 / 2.0 + 75.0 + 150.0 / 2.0);
    assert_eq!(xs[&2], 0.0);
    assert_eq!(xs[&3], 50.0 / 2.0 + 75.0 + 150.0 / 2.0);

    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    set_node_with(&mut g, 0, 0, 0, 50.0, false);
    set_node_with(&mut g, 1, 0, 1, 70.0, false);
    set_node_with(&mut g, 2, 1, 0, 60.0, false);
    set_node_with(&mut g, 3, 1, 1, 150.0, false);

    let xs = compact(&g, &root, &align);
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], 60.0 / 2.0 + 75.0 + 150.0 / 2.0);
    assert_eq!(xs[&2], 0.0);
    assert_eq!(xs[&3], 60.0 / 2.0 + 75.0 + 150.0 / 2.0);
}

#[test]
fn horizontal_compaction_cascades_class_shift() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    // a=0 b=1 c=2 d=3 e=4 f=5 g=6
    for (id, rank, order) in [
        (0, 0, 0),
        (1, 0, 1),
        (2, 1, 0),
        (3, 1, 1),
        (4, 1, 2),
        (5, 2, 0),
        (6, 2, 1),
    ] {
        set_node_with(&mut g, id, rank, order, 50.0, false);
    }

    let xs = compact(
        &g,
        &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 1), (5, 5), (6, 3)],
        &[(0, 0), (1, 4), (2, 2), (3, 6), (4, 1), (5, 5), (6, 3)],
    );
    let step = 50.0 / 2.0 + 75.0 + 50.0 / 2.0;
    assert_eq!(xs[&0], xs[&1] - step);
    assert_eq!(xs[&1], xs[&4]);
    assert_eq!(xs[&2], xs[&5]);
    assert_eq!(xs[&3], xs[&2] + step);
    assert_eq!(xs[&4], xs[&3] + step);
    assert_eq!(xs[&6], xs[&5] + step);
    assert_eq!(xs[&2], 0.0);
}

#[test]
fn align_coordinates_aligns_a_single_node() {
    let mut all = xss(&[(0, 50.0)], &[(0, 100.0)], &[(0, 50.0)], &[(0, 200.0)]);
    let align_to = all[&Alignment::UL].clone();
    bk::align_coordinates(&mut all, &align_to);

    for alignment in Alignment::ALL {
        assert_eq!(all[&alignment][&0], 50.0, "{alignment:?}");
    }
}

#[test]
fn align_coordinates_aligns_multiple_nodes() {
    let mut all = xss(
        &[(0, 50.0), (1, 1000.0)],
        &[(0, 100.0), (1, 900.0)],
        &[(0, 150.0), (1, 800.0)],
        &[(0, 200.0), (1, 700.0)],
    );
    let align_to = all[&Alignment::UL].clone();
    bk::align_coordinates(&mut all, &align_to);

    assert_eq!(all[&Alignment::UL], xs(&[(0, 50.0), (1, 1000.0)]));
    assert_eq!(all[&Alignment::UR], xs(&[(0, 200.0), (1, 1000.0)]));
    assert_eq!(all[&Alignment::DL], xs(&[(0, 50.0), (1, 700.0)]));
    assert_eq!(all[&Alignment::DR], xs(&[(0, 500.0), (1, 1000.0)]));
}

#[test]
fn find_smallest_width_alignment_finds_the_alignment_with_the_smallest_width() {
    let mut g = new_graph();
    g.set_node(0, LayoutNode::new(50.0, 0.0));
    g.set_node(1, LayoutNode::new(50.0, 0.0));

    let all = xss(
        &[(0, 0.0), (1, 1000.0)],
        &[(0, -5.0), (1, 1000.0)],
        &[(0, 5.0), (1, 2000.0)],
        &[(0, 0.0), (1, 200.0)],
    );
    assert_eq!(bk::find_smallest_width_alignment(&g, &all), all[&Alignment::DR]);
}

#[test]
fn find_smallest_width_alignment_takes_node_width_into_account() {
    let mut g = new_graph();
    g.set_node(0, LayoutNode::new(50.0, 0.0));
    g.set_node(1, LayoutNode::new(50.0, 0.0));
    g.set_node(2, LayoutNode::new(200.0, 0.0));

    let all = xss(
        &[(0, 0.0), (1, 100.0), (2, 75.0)],
        &[(0, 0.0), (1, 100.0), (2, 80.0)],
        &[(0, 0.0), (1, 100.0), (2, 85.0)],
        &[(0, 0.0), (1, 100.0), (2, 90.0)],
    );
    assert_eq!(bk::find_smallest_width_alignment(&g, &all), all[&Alignment::UL]);
}

#[test]
fn find_smallest_width_alignment_prefers_the_earliest_pass_on_ties() {
    let mut g = new_graph();
    g.set_node(0, LayoutNode::new(10.0, 0.0));

    let all = xss(&[(0, 3.0)], &[(0, 4.0)], &[(0, 5.0)], &[(0, 6.0)]);
    assert_eq!(bk::find_smallest_width_alignment(&g, &all), all[&Alignment::UL]);
}

#[test]
fn balance_aligns_a_single_node_to_the_shared_median_value() {
    let all = xss(&[(0, 0.0)], &[(0, 100.0)], &[(0, 100.0)], &[(0, 200.0)]);
    assert_eq!(bk::balance(&all, None), xs(&[(0, 100.0)]));
}

#[test]
fn balance_aligns_a_single_node_to_the_average_of_different_median_values() {
    let all = xss(&[(0, 0.0)], &[(0, 75.0)], &[(0, 125.0)], &[(0, 200.0)]);
    assert_eq!(bk::balance(&all, None), xs(&[(0, 100.0)]));
}

#[test]
fn balance_balances_multiple_nodes() {
    let all = xss(
        &[(0, 0.0), (1, 50.0)],
        &[(0, 75.0), (1, 0.0)],
        &[(0, 125.0), (1, 60.0)],
        &[(0, 200.0), (1, 75.0)],
    );
    assert_eq!(bk::balance(&all, None), xs(&[(0, 100.0), (1, 55.0)]));
}

#[test]
fn balance_uses_the_forced_alignment() {
    let all = xss(&[(0, 0.0)], &[(0, 75.0)], &[(0, 125.0)], &[(0, 200.0)]);
    assert_eq!(bk::balance(&all, Some(Alignment::DL)), xs(&[(0, 125.0)]));
    assert_eq!(bk::balance(&all, Some(Alignment::UR)), xs(&[(0, 75.0)]));
}

fn position_x(g: &LayoutGraph) -> FxHashMap<NodeId, f64> {
    let layering = util::build_layer_matrix(g);
    bk::position_x(g, &layering).unwrap()
}

#[test]
fn position_x_positions_a_single_node_at_origin() {
    let mut g = new_graph();
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    assert_eq!(position_x(&g), xs(&[(0, 0.0)]));
}

#[test]
fn position_x_positions_a_single_node_block_at_origin() {
    let mut g = new_graph();
    set_node_with(&mut g, 0, 0, 0, 100.0, false);
    set_node_with(&mut g, 1, 1, 0, 100.0, false);
    g.set_edge(0, 1).unwrap();
    assert_eq!(position_x(&g), xs(&[(0, 0.0), (1, 0.0)]));
}

#[test]
fn position_x_positions_a_single_node_block_at_origin_even_when_sizes_differ() {
    let mut g = new_graph();
    set_node_with(&mut g, 0, 0, 0, 40.0, false);
    set_node_with(&mut g, 1, 1, 0, 500.0, false);
    set_node_with(&mut g, 2, 2, 0, 20.0, false);
    g.set_path(&[0, 1, 2]);
    assert_eq!(position_x(&g), xs(&[(0, 0.0), (1, 0.0), (2, 0.0)]));
}

#[test]
fn position_x_centers_a_node_if_it_is_a_predecessor_of_two_same_sized_nodes() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 10.0;
    set_node_with(&mut g, 0, 0, 0, 20.0, false);
    set_node_with(&mut g, 1, 1, 0, 50.0, false);
    set_node_with(&mut g, 2, 1, 1, 50.0, false);
    g.set_edge(0, 1).unwrap();
    g.set_edge(0, 2).unwrap();

    let pos = position_x(&g);
    let a = pos[&0];
    assert_eq!(pos[&1], a - (25.0 + 5.0));
    assert_eq!(pos[&2], a + (25.0 + 5.0));
}

#[test]
fn position_x_shifts_blocks_on_both_sides_of_aligned_block() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 10.0;
    set_node_with(&mut g, 0, 0, 0, 50.0, false);
    set_node_with(&mut g, 1, 0, 1, 60.0, false);
    set_node_with(&mut g, 2, 1, 0, 70.0, false);
    set_node_with(&mut g, 3, 1, 1, 80.0, false);
    g.set_edge(1, 2).unwrap();

    let pos = position_x(&g);
    let b = pos[&1];
    let c = b;
    assert_eq!(pos[&0], b - 60.0 / 2.0 - 10.0 - 50.0 / 2.0);
    assert_eq!(pos[&2], c);
    assert_eq!(pos[&3], c + 70.0 / 2.0 + 10.0 + 80.0 / 2.0);
}

#[test]
fn position_x_aligns_inner_segments() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 10.0;
    g.graph_mut().edgesep = 10.0;
    set_node_with(&mut g, 0, 0, 0, 50.0, true);
    set_node_with(&mut g, 1, 0, 1, 60.0, false);
    set_node_with(&mut g, 2, 1, 0, 70.0, false);
    set_node_with(&mut g, 3, 1, 1, 80.0, true);
    g.set_edge(1, 2).unwrap();
    g.set_edge(0, 3).unwrap();

    let pos = position_x(&g);
    let a = pos[&0];
    let d = a;
    assert_eq!(pos[&1], a + 50.0 / 2.0 + 10.0 + 60.0 / 2.0);
    assert_eq!(pos[&2], d - 70.0 / 2.0 - 10.0 - 80.0 / 2.0);
    assert_eq!(pos[&3], d);
}

#[test]
fn horizontal_compaction_pulls_a_free_block_against_its_right_neighbour() {
    let mut g = new_graph();
    g.graph_mut().nodesep = 75.0;
    for (id, rank, order) in [(0, 0, 0), (1, 0, 1), (2, 0, 2), (3, 1, 0), (4, 1, 1)] {
        set_node_with(&mut g, id, rank, order, 50.0, false);
    }

    // 2 and 4 share a block; 3 has nothing on its left.
    let xs = compact(
        &g,
        &[(0, 0), (1, 1), (2, 2), (3, 3), (4, 2)],
        &[(0, 0), (1, 1), (2, 4), (3, 3), (4, 2)],
    );
    let step = 50.0 / 2.0 + 75.0 + 50.0 / 2.0;
    assert_eq!(xs[&0], 0.0);
    assert_eq!(xs[&1], step);
    assert_eq!(xs[&2], 2.0 * step);
    assert_eq!(xs[&4], 2.0 * step);
    assert_eq!(xs[&3], step);
}
