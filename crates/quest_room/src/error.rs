//! Error types for the room layer

use thiserror::Error;

/// Result type for room operations
pub type Result<T> = std::result::Result<T, RoomError>;

/// Errors surfaced by the room simulation layer
#[derive(Debug, Error)]
pub enum RoomError {
    /// Walkable-area build or query failed
    #[error("Navigation error: {0}")]
    Nav(#[from] quest_nav::NavError),

    /// A named region does not exist in this room
    #[error("Region '{0}' not found")]
    RegionNotFound(String),

    /// A behavior name has no registered factory
    #[error("Behavior '{0}' is not registered")]
    BehaviorNotRegistered(String),

    /// Behavior state failed to serialize or deserialize
    #[error("Behavior state transfer failed: {0}")]
    BehaviorState(#[from] serde_json::Error),
}
