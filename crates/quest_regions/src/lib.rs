//! # quest_regions - Region Occupancy Tracking
//!
//! Named polygon areas that trigger containment-based gameplay effects:
//! per-character Enter/Exit/Stay detection across two independent update
//! passes, plus the fade-ratio and forced-perspective scale queries the
//! render layer consumes.

pub mod mask;
pub mod region;
pub mod state;

pub mod prelude {
    pub use crate::mask::OccupancyMask;
    pub use crate::region::{Color, Region};
    pub use crate::state::{Pass, RegionState, RegionTransition};
}

pub use prelude::*;
