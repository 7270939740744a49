//! # quest_clip - Polygon Boolean Operations
//!
//! Union and difference over polygon rings, producing hole-aware polygon
//! sets. Coordinates are snapped to a fixed grid before clipping so results
//! are stable across runs regardless of input float noise.

pub mod error;
pub mod ops;
pub mod set;

pub use error::{ClipError, Result};
pub use ops::{difference, union, SNAP_RESOLUTION};
pub use set::{PolyShape, PolygonSet};
