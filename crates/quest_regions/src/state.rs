//! Runtime region occupancy state
//!
//! Tracks which characters are inside a region across two independent
//! per-frame update passes. "Current" bits are written on every
//! containment check; each pass keeps its own "old" snapshot so the
//! blocking and background sweeps derive transitions without stepping on
//! each other.

use log::trace;

use quest_math::{clamp01, inverse_lerp, lerp, Polygon};

use crate::mask::OccupancyMask;
use crate::region::Region;

/// Which per-frame update sweep is polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Foreground sweep, runs during blocked input/cutscenes too
    Blocking,
    /// Normal gameplay sweep
    Background,
}

/// Edge-detected occupancy change for one character in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionTransition {
    /// Outside before and now
    None,
    /// Outside, now inside
    Enter,
    /// Inside, now outside
    Exit,
    /// Inside before and now
    Stay,
}

/// One region's runtime state within a loaded room.
///
/// Geometry is bound separately from construction: the definition exists
/// from room init, the polygon arrives when the room's scene representation
/// loads. Every spatial query against an unbound region returns its
/// no-effect default instead of erroring.
#[derive(Debug, Clone)]
pub struct RegionState {
    pub region: Region,
    geometry: Option<Polygon>,
    current: OccupancyMask,
    old_blocking: OccupancyMask,
    old_background: OccupancyMask,
}

impl RegionState {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            geometry: None,
            current: OccupancyMask::default(),
            old_blocking: OccupancyMask::default(),
            old_background: OccupancyMask::default(),
        }
    }

    /// Attach the region's polygon once the scene geometry exists.
    pub fn bind_geometry(&mut self, polygon: Polygon) {
        trace!("region '{}' geometry bound ({} vertices)", self.region.name, polygon.len());
        self.geometry = Some(polygon);
    }

    pub fn unbind_geometry(&mut self) {
        self.geometry = None;
    }

    pub fn geometry(&self) -> Option<&Polygon> {
        self.geometry.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.geometry.is_some()
    }

    /// Size all three masks to the character roster, clearing them.
    pub fn resize_roster(&mut self, character_count: usize) {
        self.current.resize(character_count);
        self.old_blocking.resize(character_count);
        self.old_background.resize(character_count);
    }

    /// Adopt the current containment as the baseline for both passes, so
    /// characters already standing inside when the room loads do not fire
    /// an Enter on the first frame.
    pub fn on_room_loaded(&mut self) {
        self.old_blocking.copy_from(&self.current);
        self.old_background.copy_from(&self.current);
    }

    /// Whether the character's current bit is set.
    pub fn is_inside(&self, character_index: usize) -> bool {
        self.current.get(character_index)
    }

    /// Any character currently inside.
    pub fn is_occupied(&self) -> bool {
        self.current.any()
    }

    /// Geometry containment, independent of tracked state. `false` when
    /// unbound.
    pub fn contains_point(&self, point: quest_math::Vec2) -> bool {
        match &self.geometry {
            Some(polygon) => polygon.contains(point).is_inside(),
            None => false,
        }
    }

    /// Run the containment test for one character and record the result in
    /// the current mask. An inactive character is always outside, whatever
    /// the geometry says.
    pub fn update_containment(
        &mut self,
        character_index: usize,
        position: quest_math::Vec2,
        active: bool,
    ) -> bool {
        let inside = active && self.contains_point(position);
        self.current.set(character_index, inside);
        inside
    }

    /// Derive the transition for one character in one pass, snapshotting
    /// the current bit into that pass's old bit. The other pass's snapshot
    /// is untouched.
    pub fn poll(&mut self, character_index: usize, pass: Pass) -> RegionTransition {
        let now = self.current.get(character_index);
        let old = match pass {
            Pass::Blocking => &mut self.old_blocking,
            Pass::Background => &mut self.old_background,
        };
        let before = old.get(character_index);
        old.set(character_index, now);

        match (before, now) {
            (false, false) => RegionTransition::None,
            (false, true) => RegionTransition::Enter,
            (true, false) => RegionTransition::Exit,
            (true, true) => RegionTransition::Stay,
        }
    }

    /// Distance from a point (assumed inside) to the nearest boundary
    /// edge. `0` when unbound.
    pub fn distance_into_region(&self, point: quest_math::Vec2) -> f32 {
        match &self.geometry {
            Some(polygon) => polygon.distance_to_boundary(point),
            None => 0.0,
        }
    }

    /// Tint strength at a point: penetration depth over fade distance,
    /// clamped to 0..1. A non-positive fade distance always yields full
    /// strength, as does an unbound region.
    pub fn fade_ratio(&self, point: quest_math::Vec2) -> f32 {
        if self.region.fade_distance <= 0.0 || self.geometry.is_none() {
            return 1.0;
        }
        clamp01(self.distance_into_region(point) / self.region.fade_distance)
    }

    /// Forced-perspective scale at a height, interpolated between the
    /// bottom and top scale over the polygon's Y extent. `1` when the
    /// region scales nothing or is unbound.
    pub fn scale_at(&self, y: f32) -> f32 {
        if !self.region.has_scaling() {
            return 1.0;
        }
        let Some(polygon) = &self.geometry else {
            return 1.0;
        };
        let (min_y, max_y) = polygon.y_extent();
        let t = inverse_lerp(min_y, max_y, y);
        lerp(self.region.scale_bottom, self.region.scale_top, t)
    }
}
