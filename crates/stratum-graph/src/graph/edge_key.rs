//! Edge key types.
//!
//! An edge is addressed by its endpoints plus the index it was inserted at. The index never
//! changes, so it stays valid across [`Graph::reverse_edge`](super::Graph::reverse_edge) and
//! tells parallel edges apart.

use super::{EdgeIndex, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: NodeId,
    pub w: NodeId,
    pub index: EdgeIndex,
}

impl EdgeKey {
    pub fn new(v: NodeId, w: NodeId, index: EdgeIndex) -> Self {
        Self { v, w, index }
    }

    /// The same edge seen from the other end.
    pub fn reversed(self) -> Self {
        Self {
            v: self.w,
            w: self.v,
            index: self.index,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }
}
