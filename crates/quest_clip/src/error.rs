//! Error types for polygon clipping

use thiserror::Error;

/// Result type for clipping operations
pub type Result<T> = std::result::Result<T, ClipError>;

/// Errors that can occur while clipping polygons
#[derive(Debug, Error)]
pub enum ClipError {
    /// Union of the source rings produced no area at all
    #[error("Union of {sources} source polygon(s) produced an empty result")]
    EmptyUnion { sources: usize },

    /// A source ring has too few vertices to enclose area
    #[error("Source polygon {index} is degenerate ({vertices} vertices)")]
    DegenerateSource { index: usize, vertices: usize },
}
