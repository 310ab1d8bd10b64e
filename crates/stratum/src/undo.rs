//! Turn dummy coordinates into bend points and restore reversed edges.

use crate::error::{Error, Result, Stage};
use crate::{ControlPoints, CoordinateMap, Point};
use std::collections::{BTreeMap, BTreeSet};
use stratum_graph::{EdgeIndex, EdgeKey};

/// Maps every working edge in `control_points` to its bend points.
///
/// `reversed` lists edges in their original orientation, as returned by [`crate::acyclic::run`].
/// Those edges are re-keyed in that orientation and their points reversed, so each list reads
/// from the true source to the true target. Self-loops and unit-span edges map to an empty list.
pub fn undo(
    control_points: &ControlPoints,
    coordinates: &CoordinateMap,
    reversed: &[EdgeKey],
) -> Result<BTreeMap<EdgeKey, Vec<Point>>> {
    let reversed: BTreeSet<EdgeIndex> = reversed.iter().map(|e| e.index).collect();

    let mut out: BTreeMap<EdgeKey, Vec<Point>> = BTreeMap::new();
    for (&key, dummies) in control_points {
        let mut points = dummies
            .iter()
            .map(|d| {
                coordinates.get(d).copied().ok_or_else(|| {
                    Error::invariant(
                        Stage::Undo,
                        format!(
                            "dummy node {d} of edge {} -> {} has no coordinate",
                            key.v, key.w
                        ),
                    )
                })
            })
            .collect::<Result<Vec<Point>>>()?;

        let key = if reversed.contains(&key.index) {
            points.reverse();
            key.reversed()
        } else {
            key
        };
        out.insert(key, points);
    }
    Ok(out)
}
