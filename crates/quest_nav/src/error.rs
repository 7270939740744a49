//! Error types for the navigation system

use thiserror::Error;

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavError>;

/// Errors that can occur while building or querying navigable areas
#[derive(Debug, Error)]
pub enum NavError {
    /// The room has no walkable-area source configured
    #[error("No walkable-area source polygons configured")]
    NoWalkableSource,

    /// The active walkable-area index is out of range
    #[error("Walkable-area index {index} out of range ({count} source(s) configured)")]
    InvalidWalkableIndex { index: usize, count: usize },

    /// Clipping the walkable sources failed
    #[error("Walkable-area clipping failed: {0}")]
    Clip(#[from] quest_clip::ClipError),
}
