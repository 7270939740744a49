//! Walkable area builder
//!
//! Combines a room's walkable-area sources into the final navigable
//! polygon set: union the active source, then subtract its hole polygons
//! and every non-walkable region. Stateless; the room calls this whenever
//! the active area or any cut polygon changes and hands the result to the
//! [`Pathfinder`](crate::pathfinder::Pathfinder).

use log::{debug, warn};

use quest_clip::{difference, union, PolygonSet};
use quest_math::Polygon;

use crate::error::{NavError, Result};

/// One configured walkable-area entry: a source polygon plus the hole
/// polygons nested under it.
#[derive(Clone, Debug, Default)]
pub struct WalkableSource {
    pub polygon: Polygon,
    pub holes: Vec<Polygon>,
}

impl WalkableSource {
    pub fn new(polygon: Polygon) -> Self {
        Self {
            polygon,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<Polygon>) -> Self {
        self.holes = holes;
        self
    }
}

/// Policy knobs for the build.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkablePolicy {
    /// When set, hole polygons belonging to INACTIVE walkable areas are
    /// still subtracted from the active one. Off by default: an inactive
    /// area's holes normally have no effect on the active area.
    pub inactive_holes_block: bool,
}

/// Build the navigable polygon set for the active walkable area.
///
/// Only the source at `active_index` contributes walkable geometry; the
/// others are ignored (one area is active at a time). `region_cuts` are the
/// polygons of every non-walkable region, subtracted regardless of the
/// region's enabled flag.
///
/// An empty result after subtraction is a legal outcome (the cuts may cover
/// the whole area) and is distinct from the error cases: no sources at all,
/// or an active index out of range.
pub fn build_navigable_set(
    sources: &[WalkableSource],
    active_index: usize,
    region_cuts: &[Polygon],
    policy: WalkablePolicy,
) -> Result<PolygonSet> {
    if sources.is_empty() {
        return Err(NavError::NoWalkableSource);
    }
    let Some(active) = sources.get(active_index) else {
        return Err(NavError::InvalidWalkableIndex {
            index: active_index,
            count: sources.len(),
        });
    };

    let merged = union(std::slice::from_ref(&active.polygon))?;

    let mut cuts: Vec<Polygon> = active.holes.clone();
    if policy.inactive_holes_block {
        for (index, source) in sources.iter().enumerate() {
            if index != active_index {
                cuts.extend(source.holes.iter().cloned());
            }
        }
    }
    cuts.extend(region_cuts.iter().cloned());

    let result = difference(&merged, &cuts);
    if result.is_empty() {
        warn!(
            "walkable area {} fully covered by {} cut polygon(s)",
            active_index,
            cuts.len()
        );
    } else {
        debug!(
            "walkable area {} built: {} island(s), {} cut(s), area {:.3}",
            active_index,
            result.shapes.len(),
            cuts.len(),
            result.area()
        );
    }
    Ok(result)
}
