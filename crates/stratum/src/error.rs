use std::fmt;
use stratum_graph::NodeId;

/// Pipeline stage that detected an internal invariant violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Acyclic,
    Rank,
    Normalize,
    Order,
    Position,
    Undo,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Acyclic => "acyclic",
            Stage::Rank => "rank",
            Stage::Normalize => "normalize",
            Stage::Order => "order",
            Stage::Position => "position",
            Stage::Undo => "undo",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] stratum_graph::Error),

    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node {id} is not in the graph")]
    UnknownNode { id: NodeId },

    #[error("{stage} stage invariant violated: {detail}")]
    Invariant { stage: Stage, detail: String },
}

impl Error {
    pub(crate) fn invariant(stage: Stage, detail: impl Into<String>) -> Self {
        Error::Invariant {
            stage,
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
