//! # quest_room - Room Simulation Context
//!
//! The per-room geometry pipeline: walkable-area rebuilds feeding the
//! pathfinder, per-frame region occupancy across the blocking and
//! background passes, event dispatch to scripted handlers, and the
//! behavior registry that lets a room's script be swapped while keeping
//! its state.
//!
//! A [`Room`] is an explicit context handle, constructed by the scene
//! layer and passed to whoever needs it; there is no global instance.

pub mod behavior;
pub mod character;
pub mod dispatch;
pub mod error;
pub mod room;

pub mod prelude {
    pub use crate::behavior::{BehaviorRegistry, RoomBehavior};
    pub use crate::character::{CharacterId, CharacterInfo};
    pub use crate::dispatch::{EventDispatcher, HandlerScope, RegionEvent, RegionHook};
    pub use crate::error::{Result, RoomError};
    pub use crate::room::{BackgroundUpdate, CharacterAppearance, RegionNotice, Room};
}

pub use prelude::*;
