//! # quest_nav - Walkable Areas and Pathfinding
//!
//! Builds a room's navigable polygon set from its configured walkable-area
//! sources and answers legality/path queries against it: point-in-area
//! membership, closest-legal-point correction and waypoint pathfinding
//! around holes.

pub mod builder;
pub mod error;
pub mod pathfinder;

pub use builder::{build_navigable_set, WalkablePolicy, WalkableSource};
pub use error::{NavError, Result};
pub use pathfinder::{LegalOutcome, LegalPoint, ObstacleId, Pathfinder};
