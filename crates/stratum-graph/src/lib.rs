#![forbid(unsafe_code)]

//! Graph container APIs used by `stratum`.
//!
//! Nodes are keyed by caller-chosen integer ids. The graph is always directed and always a
//! multigraph: parallel edges and self-loops are stored as distinct entries, each identified by
//! a stable insertion index.

pub mod error;
mod graph;

pub use error::{Error, Result};
pub use graph::{EdgeIndex, EdgeKey, Graph, NodeId, alg};
