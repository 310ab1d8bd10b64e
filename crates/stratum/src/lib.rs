#![forbid(unsafe_code)]

//! Layered ("Sugiyama-style") layout of directed graphs.
//!
//! [`layout`] runs the whole pipeline: cycle removal ([`acyclic`]), longest-path ranking
//! ([`rank`]), long-edge splitting ([`normalize`]), crossing reduction ([`order`]),
//! Brandes & Köpf coordinates ([`position`]) and bend-point recovery ([`undo`]). Every stage is
//! public so it can be driven on its own.

pub use stratum_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
mod model;
mod pipeline;

pub mod acyclic;
pub mod coordinate_system;
pub mod greedy_fas;
pub mod normalize;
pub mod order;
pub mod position;
pub mod rank;
pub mod undo;
pub mod util;

pub use error::{Error, Result, Stage};
pub use model::{
    Acyclicer, Alignment, ControlPoints, CoordinateMap, EdgeKind, InitOrder, Layer, Layout,
    LayoutEdge, LayoutGraph, LayoutNode, LayoutOptions, Point, RankDir, RankList, Size,
};
pub use pipeline::layout;
