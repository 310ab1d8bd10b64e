use crate::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("edge {v} -> {w} references a node that is not in the graph")]
    MissingEndpoint { v: NodeId, w: NodeId },

    #[error("edge index {index} is out of bounds")]
    MissingEdge { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
