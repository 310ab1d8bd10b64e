//! Coordinate assignment.
//!
//! y comes from cumulative rank heights, x from Brandes & Köpf ([`bk`]). Rank direction is
//! applied around both, and the drawing is finally translated to start at the margins.

use crate::error::{Error, Result, Stage};
use crate::{CoordinateMap, Layer, LayoutGraph, Point, coordinate_system, util};

pub mod bk;

#[derive(Debug, Clone, PartialEq)]
pub struct Positioned {
    /// Centers of every node in the layering, dummies included.
    pub coordinates: CoordinateMap,
    pub width: f64,
    pub height: f64,
}

/// Positions every node of the unit-span graph `g`, whose graph label holds the layout options.
///
/// `layering` must contain every node of `g` exactly once. Rank, order and coordinates are also
/// written back onto the node labels.
pub fn position(g: &mut LayoutGraph, layering: &[Layer]) -> Result<Positioned> {
    util::check_layering(g, layering, Stage::Position)?;
    for (rank, layer) in layering.iter().enumerate() {
        for (order, &v) in layer.iter().enumerate() {
            if let Some(n) = g.node_mut(v) {
                n.rank = Some(rank);
                n.order = Some(order);
            }
        }
    }

    coordinate_system::adjust(g);
    position_y(g, layering);
    for (v, x) in bk::position_x(g, layering)? {
        if let Some(n) = g.node_mut(v) {
            n.x = Some(x);
        }
    }
    coordinate_system::undo(g);
    let (width, height) = util::translate(g);

    let mut coordinates = CoordinateMap::new();
    for v in g.nodes() {
        let (Some(x), Some(y)) = g.node(v).map_or((None, None), |n| (n.x, n.y)) else {
            return Err(Error::invariant(
                Stage::Position,
                format!("node {v} was not assigned a coordinate"),
            ));
        };
        coordinates.insert(v, Point { x, y });
    }

    tracing::debug!(nodes = coordinates.len(), width, height, "positioning done");
    Ok(Positioned {
        coordinates,
        width,
        height,
    })
}

/// Every node of a rank shares the rank's center line; ranks are `ranksep` apart.
pub fn position_y(g: &mut LayoutGraph, layering: &[Layer]) {
    let rank_sep = g.graph().ranksep;
    let mut prev_y: f64 = 0.0;
    for layer in layering {
        let max_h = layer
            .iter()
            .filter_map(|&v| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        for &v in layer {
            if let Some(n) = g.node_mut(v) {
                n.y = Some(prev_y + max_h / 2.0);
            }
        }
        prev_y += max_h + rank_sep;
    }
}
