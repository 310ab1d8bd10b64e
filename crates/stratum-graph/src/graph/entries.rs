//! Internal storage entries for [`Graph`](super::Graph).

use super::{EdgeIndex, EdgeKey, NodeId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<N> {
    pub(in crate::graph) id: NodeId,
    pub(in crate::graph) label: N,
    pub(in crate::graph) out: Vec<EdgeIndex>,
    pub(in crate::graph) in_: Vec<EdgeIndex>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) v_ix: usize,
    pub(in crate::graph) w_ix: usize,
    pub(in crate::graph) label: E,
}
