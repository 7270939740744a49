//! Region definition data
//!
//! The authored configuration of a region: flags and visual parameters.
//! Runtime occupancy lives in [`RegionState`](crate::state::RegionState);
//! this struct is plain data created from room defaults at load time.

use serde::{Deserialize, Serialize};

/// RGBA tint color, components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Self = Self::new(1.0, 1.0, 1.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Blend toward `other` by `t`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            quest_math::lerp(self.r, other.r, t),
            quest_math::lerp(self.g, other.g, t),
            quest_math::lerp(self.b, other.b, t),
            quest_math::lerp(self.a, other.a, t),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::CLEAR
    }
}

/// Authored region configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Stable name, used by scripts and event dispatch
    pub name: String,
    /// Disabled regions fire no events (containment is still tracked)
    pub enabled: bool,
    /// When false, the region polygon is subtracted from the walkable area.
    /// This applies even while the region is disabled.
    pub walkable: bool,
    /// Fire events for the player character only
    pub player_only: bool,
    /// Tint applied to characters inside, blended by fade ratio
    pub tint: Color,
    /// Distance from the boundary over which the tint fades in.
    /// Zero or negative means no fade: full effect everywhere inside.
    pub fade_distance: f32,
    /// Character scale at the region's top edge
    pub scale_top: f32,
    /// Character scale at the region's bottom edge
    pub scale_bottom: f32,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            walkable: true,
            player_only: false,
            tint: Color::CLEAR,
            fade_distance: 0.0,
            scale_top: 1.0,
            scale_bottom: 1.0,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    pub fn with_player_only(mut self, player_only: bool) -> Self {
        self.player_only = player_only;
        self
    }

    pub fn with_tint(mut self, tint: Color, fade_distance: f32) -> Self {
        self.tint = tint;
        self.fade_distance = fade_distance;
        self
    }

    pub fn with_scale_range(mut self, bottom: f32, top: f32) -> Self {
        self.scale_bottom = bottom;
        self.scale_top = top;
        self
    }

    /// Whether the region applies any forced-perspective scaling.
    pub fn has_scaling(&self) -> bool {
        self.scale_top != 1.0 || self.scale_bottom != 1.0
    }

    /// Whether the region applies any tint.
    pub fn has_tint(&self) -> bool {
        self.tint.a > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let region = Region::new("swamp");
        assert_eq!(region.name, "swamp");
        assert!(region.enabled);
        assert!(region.walkable);
        assert!(!region.has_scaling());
        assert!(!region.has_tint());
    }

    #[test]
    fn test_builder_chaining() {
        let region = Region::new("pit")
            .with_walkable(false)
            .with_player_only(true)
            .with_tint(Color::new(0.2, 0.8, 0.2, 1.0), 5.0)
            .with_scale_range(0.5, 1.0);
        assert!(!region.walkable);
        assert!(region.player_only);
        assert!(region.has_tint());
        assert!(region.has_scaling());
        assert_eq!(region.fade_distance, 5.0);
    }

    #[test]
    fn test_color_lerp() {
        let mid = Color::CLEAR.lerp(Color::WHITE, 0.5);
        assert!((mid.a - 0.5).abs() < 1e-6);
        assert!((mid.r - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_serde_round_trip() {
        let region = Region::new("ledge").with_scale_range(0.8, 1.2);
        let json = serde_json::to_string(&region).unwrap();
        let back: Region = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, region.name);
        assert_eq!(back.scale_top, region.scale_top);
    }
}
