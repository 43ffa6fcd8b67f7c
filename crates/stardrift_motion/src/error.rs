//! # Motion Error Types
//!
//! Everything that can go wrong in the scroll-driven layer.
//!
//! None of these surface through the public contract - visual-layer
//! failures degrade silently, because a broken effect must never break
//! the page. They exist for the diagnostic path: callers absorb them and
//! report through `tracing`.

use thiserror::Error;

use crate::page::ElementId;

/// Errors that can occur in the motion layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A scroll marker string did not parse.
    #[error("unrecognized scroll marker {marker:?} (expected \"<element-edge> <viewport-edge>\")")]
    BadMarker {
        /// The offending marker string.
        marker: String,
    },

    /// An element disappeared from the page after a binding was created.
    #[error("element {0:?} is detached from the page")]
    Detached(ElementId),

    /// Marker resolution produced an inverted or empty scroll range.
    #[error("degenerate scroll range: end {end} <= start {start}")]
    DegenerateRange {
        /// Resolved start offset.
        start: f32,
        /// Resolved end offset.
        end: f32,
    },

    /// A navigation fragment matched no element.
    #[error("no element matches fragment {fragment:?}")]
    UnknownFragment {
        /// The fragment identifier, without the leading `#`.
        fragment: String,
    },
}

/// Result type for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;
