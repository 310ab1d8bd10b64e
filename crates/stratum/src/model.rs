//! Layout options, working labels and result types.
//!
//! The working graph carries [`LayoutNode`] / [`LayoutEdge`] labels and stores the active
//! [`LayoutOptions`] as its graph label, so every stage reads configuration from `g.graph()`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stratum_graph::{EdgeIndex, EdgeKey, Graph, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

/// One of the four Brandes-Köpf passes: vertical direction (up/down) × horizontal bias
/// (left/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Alignment {
    UL,
    UR,
    DL,
    DR,
}

impl Alignment {
    /// Canonical pass order. Ties between equally narrow passes resolve to the earliest entry.
    pub const ALL: [Alignment; 4] = [Alignment::UL, Alignment::UR, Alignment::DL, Alignment::DR];

    pub fn is_up(self) -> bool {
        matches!(self, Alignment::UL | Alignment::UR)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Alignment::UL | Alignment::DL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acyclicer {
    /// Reverse one DFS back edge per pass until none remain.
    #[default]
    Dfs,
    /// Eades-Lin-Smyth greedy feedback arc set.
    Greedy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitOrder {
    #[default]
    Ascending,
    Dfs,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub node_width: f64,
    pub node_height: f64,
    pub node_sizes: BTreeMap<NodeId, Size>,
    pub align: Option<Alignment>,
    pub acyclicer: Acyclicer,
    pub init_order: InitOrder,
    pub max_stalls: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            edgesep: 10.0,
            ranksep: 75.0,
            marginx: 20.0,
            marginy: 20.0,
            node_width: 32.0,
            node_height: 32.0,
            node_sizes: BTreeMap::new(),
            align: None,
            acyclicer: Acyclicer::Dfs,
            init_order: InitOrder::Ascending,
            max_stalls: 4,
        }
    }
}

impl LayoutOptions {
    /// Parses options from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("nodesep", self.nodesep),
            ("edgesep", self.edgesep),
            ("ranksep", self.ranksep),
            ("marginx", self.marginx),
            ("marginy", self.marginy),
            ("nodeWidth", self.node_width),
            ("nodeHeight", self.node_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_option(
                    name,
                    format!("expected a positive finite number, got {value}"),
                ));
            }
        }

        for (id, size) in &self.node_sizes {
            if !size.width.is_finite() || size.width < 0.0 {
                return Err(Error::invalid_option(
                    "nodeSizes",
                    format!("node {id} has width {}", size.width),
                ));
            }
            if !size.height.is_finite() || size.height < 0.0 {
                return Err(Error::invalid_option(
                    "nodeSizes",
                    format!("node {id} has height {}", size.height),
                ));
            }
        }

        if self.max_stalls == 0 {
            return Err(Error::invalid_option(
                "maxStalls",
                "ordering needs at least one stall before stopping",
            ));
        }
        Ok(())
    }

    pub fn node_size(&self, id: NodeId) -> Size {
        self.node_sizes.get(&id).copied().unwrap_or(Size {
            width: self.node_width,
            height: self.node_height,
        })
    }
}

/// Working node label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutNode {
    pub width: f64,
    pub height: f64,
    /// Set on dummy nodes: the (working orientation) edge the dummy was inserted for.
    pub dummy: Option<EdgeKey>,
    pub rank: Option<usize>,
    pub order: Option<usize>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl LayoutNode {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

/// Working edge label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutEdge {
    /// Index of the caller's edge this edge (or edge segment) stands for.
    pub origin: EdgeIndex,
    pub reversed: bool,
}

pub type LayoutGraph = Graph<LayoutNode, LayoutEdge, LayoutOptions>;

pub type Layer = Vec<NodeId>;
pub type RankList = Vec<Layer>;

/// Dummy node ids per working edge, in rank order. Unit-span edges and self-loops map to an
/// empty list.
pub type ControlPoints = BTreeMap<EdgeKey, Vec<NodeId>>;

pub type CoordinateMap = BTreeMap<NodeId, Point>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Both endpoints are dummies: an interior segment of a long edge.
    Inner,
    NonInner,
}

/// Result of [`crate::layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Final left-to-right order of the caller's nodes, per rank.
    pub ranks: RankList,
    /// Node centers.
    pub coordinates: CoordinateMap,
    /// Bend points per caller edge, ordered from source to target.
    #[serde(with = "edge_list")]
    pub edges: BTreeMap<EdgeKey, Vec<Point>>,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.coordinates.get(&id).copied()
    }

    /// Bend points of the first edge `from -> to`.
    pub fn bend_points(&self, from: NodeId, to: NodeId) -> Option<&[Point]> {
        self.edges
            .iter()
            .find(|(k, _)| k.v == from && k.w == to)
            .map(|(_, points)| points.as_slice())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

mod edge_list {
    use super::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;
    use stratum_graph::{EdgeIndex, EdgeKey, NodeId};

    #[derive(Serialize)]
    struct EdgeRef<'a> {
        from: NodeId,
        to: NodeId,
        index: EdgeIndex,
        points: &'a [Point],
    }

    #[derive(Deserialize)]
    struct EdgeOwned {
        from: NodeId,
        to: NodeId,
        index: EdgeIndex,
        points: Vec<Point>,
    }

    pub fn serialize<S>(edges: &BTreeMap<EdgeKey, Vec<Point>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_seq(edges.iter().map(|(k, points)| EdgeRef {
            from: k.v,
            to: k.w,
            index: k.index,
            points,
        }))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<BTreeMap<EdgeKey, Vec<Point>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<EdgeOwned>::deserialize(d)?;
        Ok(list
            .into_iter()
            .map(|e| (EdgeKey::new(e.from, e.to, e.index), e.points))
            .collect())
    }
}
