//! Room simulation context
//!
//! Owns the walkable-area sources, the pathfinder built from them, and
//! every region's runtime state. The scene layer feeds it character
//! snapshots each frame; it hands back region notices for the dispatcher
//! and per-character appearance values for the render layer.

use std::collections::HashMap;

use log::{debug, warn};

use quest_math::{Polygon, Vec2};
use quest_nav::{
    build_navigable_set, LegalPoint, ObstacleId, Pathfinder, WalkablePolicy, WalkableSource,
};
use quest_regions::{Color, Pass, Region, RegionState, RegionTransition};

use crate::character::{CharacterId, CharacterInfo};
use crate::dispatch::{RegionEvent, RegionHook};
use crate::error::{Result, RoomError};

/// An occupancy edge worth reporting to script handlers. Stay and None
/// transitions are tracked but never reported.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNotice {
    pub region: String,
    pub character: CharacterId,
    pub hook: RegionHook,
}

impl RegionNotice {
    /// The dispatcher payload for this notice.
    pub fn to_event(&self) -> RegionEvent {
        RegionEvent {
            region: self.region.clone(),
            character: self.character,
            hook: self.hook,
        }
    }
}

/// Per-character values the render layer applies after a background pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterAppearance {
    pub character: CharacterId,
    /// Strongest region tint at the character's position, alpha already
    /// scaled by the fade ratio. `None` when no tinted region applies.
    pub tint: Option<Color>,
    /// Forced-perspective scale, `1.0` when no scaling region applies.
    pub scale: f32,
}

/// Everything produced by one background update.
#[derive(Debug, Default)]
pub struct BackgroundUpdate {
    pub notices: Vec<RegionNotice>,
    pub appearances: Vec<CharacterAppearance>,
}

/// One loaded room's geometry and region state.
#[derive(Debug, Default)]
pub struct Room {
    name: String,
    sources: Vec<WalkableSource>,
    active_walkable: usize,
    policy: WalkablePolicy,
    pathfinder: Pathfinder,
    regions: Vec<RegionState>,
    /// Obstacles registered by external colliders, re-applied after every
    /// walkable rebuild
    dynamic_obstacles: HashMap<ObstacleId, Polygon>,
    next_obstacle: u64,
    roster_size: usize,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_walkable_source(mut self, source: WalkableSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn with_active_walkable(mut self, index: usize) -> Self {
        self.active_walkable = index;
        self
    }

    pub fn with_policy(mut self, policy: WalkablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_region(mut self, region: Region, geometry: Option<Polygon>) -> Self {
        let mut state = RegionState::new(region);
        if let Some(polygon) = geometry {
            state.bind_geometry(polygon);
        }
        self.regions.push(state);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    pub fn region(&self, name: &str) -> Option<&RegionState> {
        self.regions.iter().find(|state| state.region.name == name)
    }

    fn region_mut(&mut self, name: &str) -> Result<&mut RegionState> {
        self.regions
            .iter_mut()
            .find(|state| state.region.name == name)
            .ok_or_else(|| RoomError::RegionNotFound(name.to_string()))
    }

    /// Prepare the room for play: size occupancy masks to the roster,
    /// build the walkable area and adopt the characters' starting
    /// positions as the occupancy baseline so nobody fires an Enter on
    /// frame one.
    pub fn load(&mut self, roster_size: usize, characters: &[CharacterInfo]) -> Result<()> {
        debug!("loading room '{}' (roster {})", self.name, roster_size);
        self.roster_size = roster_size;
        for state in &mut self.regions {
            state.resize_roster(roster_size);
        }
        self.rebuild_walkable()?;
        self.refresh_occupancy(characters);
        for state in &mut self.regions {
            state.on_room_loaded();
        }
        Ok(())
    }

    /// Switch the active walkable area and rebuild. On failure the
    /// previous index and area both remain in effect.
    pub fn set_active_walkable(&mut self, index: usize) -> Result<()> {
        let previous = self.active_walkable;
        self.active_walkable = index;
        if let Err(err) = self.rebuild_walkable() {
            self.active_walkable = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Rebuild the navigable area from current sources, regions and
    /// dynamic obstacles. Completes or fails atomically: on error the
    /// pathfinder keeps its previous area.
    pub fn rebuild_walkable(&mut self) -> Result<()> {
        let cuts: Vec<Polygon> = self
            .regions
            .iter()
            // Enabled is deliberately not checked: a disabled non-walkable
            // region still blocks
            .filter(|state| !state.region.walkable)
            .filter_map(|state| state.geometry().cloned())
            .collect();

        let set = build_navigable_set(&self.sources, self.active_walkable, &cuts, self.policy)?;

        self.pathfinder.clear();
        let mut boundaries = Vec::with_capacity(set.shapes.len());
        for shape in set.shapes {
            boundaries.push(shape.boundary);
            for hole in shape.holes {
                let id = self.allocate_obstacle_id();
                self.pathfinder.add_obstacle(id, hole);
            }
        }
        self.pathfinder.set_main_polygons(boundaries);
        for (&id, polygon) in &self.dynamic_obstacles {
            self.pathfinder.add_obstacle(id, polygon.clone());
        }
        Ok(())
    }

    fn allocate_obstacle_id(&mut self) -> ObstacleId {
        self.next_obstacle += 1;
        ObstacleId(self.next_obstacle)
    }

    /// Register an obstacle from an external collider. It survives
    /// walkable rebuilds until removed by the returned id.
    pub fn add_obstacle(&mut self, polygon: Polygon) -> ObstacleId {
        let id = self.allocate_obstacle_id();
        self.dynamic_obstacles.insert(id, polygon.clone());
        self.pathfinder.add_obstacle(id, polygon);
        id
    }

    /// Remove a previously registered obstacle. Returns whether it existed.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> bool {
        let existed = self.dynamic_obstacles.remove(&id).is_some();
        self.pathfinder.remove_obstacle(id);
        existed
    }

    /// Toggle a region's walkability at runtime and rebuild the area.
    pub fn set_region_walkable(&mut self, name: &str, walkable: bool) -> Result<()> {
        self.region_mut(name)?.region.walkable = walkable;
        self.rebuild_walkable()
    }

    /// Toggle event firing for a region. Containment tracking continues
    /// either way, and walkable subtraction is unaffected.
    pub fn set_region_enabled(&mut self, name: &str, enabled: bool) -> Result<()> {
        self.region_mut(name)?.region.enabled = enabled;
        Ok(())
    }

    /// Attach scene geometry to a region after load.
    pub fn bind_region_geometry(&mut self, name: &str, polygon: Polygon) -> Result<()> {
        let roster = self.roster_size;
        let state = self.region_mut(name)?;
        state.bind_geometry(polygon);
        state.resize_roster(roster);
        Ok(())
    }

    /// Run the containment test for every region against every character,
    /// writing the current occupancy masks. Both update passes read the
    /// masks this produces, so geometry changes between the passes of one
    /// frame do not desynchronize them.
    pub fn refresh_occupancy(&mut self, characters: &[CharacterInfo]) {
        for state in &mut self.regions {
            for character in characters {
                state.update_containment(character.id.0, character.position, character.active);
            }
        }
    }

    /// Foreground sweep: derive transitions from the already-refreshed
    /// masks. Runs even while input is blocked, so cutscene scripts see
    /// their notices.
    pub fn update_blocking(&mut self, characters: &[CharacterInfo]) -> Vec<RegionNotice> {
        self.poll_pass(characters, Pass::Blocking)
    }

    /// Background sweep: refresh containment, derive transitions, and
    /// compute per-character appearance values.
    pub fn update_background(&mut self, characters: &[CharacterInfo]) -> BackgroundUpdate {
        self.refresh_occupancy(characters);
        let notices = self.poll_pass(characters, Pass::Background);
        let appearances = characters
            .iter()
            .filter(|character| character.active)
            .map(|character| self.appearance_for(character))
            .collect();
        BackgroundUpdate {
            notices,
            appearances,
        }
    }

    fn poll_pass(&mut self, characters: &[CharacterInfo], pass: Pass) -> Vec<RegionNotice> {
        let mut notices = Vec::new();
        for state in &mut self.regions {
            for character in characters {
                let transition = state.poll(character.id.0, pass);
                // The enabled and player-only flags gate reporting, not
                // tracking; the masks above were updated regardless
                if !state.region.enabled {
                    continue;
                }
                if state.region.player_only && !character.is_player {
                    continue;
                }
                let hook = match (pass, transition) {
                    (Pass::Blocking, RegionTransition::Enter) => RegionHook::Enter,
                    (Pass::Blocking, RegionTransition::Exit) => RegionHook::Exit,
                    (Pass::Background, RegionTransition::Enter) => RegionHook::EnterBackground,
                    (Pass::Background, RegionTransition::Exit) => RegionHook::ExitBackground,
                    _ => continue,
                };
                notices.push(RegionNotice {
                    region: state.region.name.clone(),
                    character: character.id,
                    hook,
                });
            }
        }
        notices
    }

    fn appearance_for(&self, character: &CharacterInfo) -> CharacterAppearance {
        let mut tint: Option<Color> = None;
        let mut scale = 1.0;
        let mut scale_found = false;

        for state in &self.regions {
            if !state.region.enabled || !state.is_inside(character.id.0) {
                continue;
            }
            if state.region.player_only && !character.is_player {
                continue;
            }
            if state.region.has_tint() {
                let mut candidate = state.region.tint;
                candidate.a *= state.fade_ratio(character.position);
                let stronger = tint.map_or(true, |current| candidate.a > current.a);
                if stronger {
                    tint = Some(candidate);
                }
            }
            if !scale_found && state.region.has_scaling() {
                scale = state.scale_at(character.position.y);
                scale_found = true;
            }
        }

        CharacterAppearance {
            character: character.id,
            tint,
            scale,
        }
    }

    /// Correct a movement target against the walkable area. See
    /// [`Pathfinder::closest_legal_point`] for outcome semantics.
    pub fn closest_legal_point(&self, from: Vec2, to: Vec2) -> LegalPoint {
        let result = self.pathfinder.closest_legal_point(from, to);
        if result.outcome == quest_nav::LegalOutcome::FromOutside {
            warn!(
                "character position {:?} outside walkable area in room '{}'",
                from, self.name
            );
        }
        result
    }

    /// Waypoint path between two points in the walkable area.
    pub fn find_path(&self, from: Vec2, to: Vec2) -> Option<Vec<Vec2>> {
        self.pathfinder.find_path(from, to)
    }
}
