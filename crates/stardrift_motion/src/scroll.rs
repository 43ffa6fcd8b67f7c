//! Scroll position to progress mapping.
//!
//! A tracker watches one element and two symbolic markers. The markers
//! resolve to absolute scroll offsets against current layout; progress is
//! the clamped position of the live scroll offset inside that range.
//! Progress is recomputed on every sample - never accumulated - so it is
//! a pure, monotonic function of scroll offset.

use crate::error::{MotionError, MotionResult};
use crate::page::{ElementId, PageAdapter, Rect, Viewport};

/// A reference line on the tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEdge {
    /// The element's top edge.
    Top,
    /// The element's vertical center.
    Center,
    /// The element's bottom edge.
    Bottom,
}

/// A reference line in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEdge {
    /// The top of the viewport.
    Top,
    /// The vertical center of the viewport.
    Center,
    /// The bottom of the viewport.
    Bottom,
}

/// A symbolic scroll position: "this element edge meets that viewport
/// edge".
///
/// Written as `"<element-edge> <viewport-edge>"`. The defaults -
/// `"top bottom"` and `"bottom top"` - span the full interval in which
/// the element is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMarker {
    /// The edge on the element.
    pub element: ElementEdge,
    /// The edge in the viewport.
    pub viewport: ViewportEdge,
}

impl ScrollMarker {
    /// Start marker default: element top reaches viewport bottom.
    pub const START_DEFAULT: Self = Self {
        element: ElementEdge::Top,
        viewport: ViewportEdge::Bottom,
    };

    /// End marker default: element bottom reaches viewport top.
    pub const END_DEFAULT: Self = Self {
        element: ElementEdge::Bottom,
        viewport: ViewportEdge::Top,
    };

    /// Parses a marker string like `"top bottom"`.
    ///
    /// # Errors
    ///
    /// [`MotionError::BadMarker`] if the string is not two recognized
    /// edge names.
    pub fn parse(marker: &str) -> MotionResult<Self> {
        let bad = || MotionError::BadMarker {
            marker: marker.to_string(),
        };

        let mut words = marker.split_whitespace();
        let element = match words.next().ok_or_else(bad)? {
            "top" => ElementEdge::Top,
            "center" => ElementEdge::Center,
            "bottom" => ElementEdge::Bottom,
            _ => return Err(bad()),
        };
        let viewport = match words.next().ok_or_else(bad)? {
            "top" => ViewportEdge::Top,
            "center" => ViewportEdge::Center,
            "bottom" => ViewportEdge::Bottom,
            _ => return Err(bad()),
        };
        if words.next().is_some() {
            return Err(bad());
        }
        Ok(Self { element, viewport })
    }

    /// Resolves to the absolute scroll offset at which the two edges meet,
    /// given current layout.
    #[must_use]
    pub fn resolve(&self, rect: Rect, viewport: Viewport) -> f32 {
        let element_line = match self.element {
            ElementEdge::Top => rect.top(),
            ElementEdge::Center => rect.top() + rect.height * 0.5,
            ElementEdge::Bottom => rect.bottom(),
        };
        let viewport_line = match self.viewport {
            ViewportEdge::Top => 0.0,
            ViewportEdge::Center => viewport.height * 0.5,
            ViewportEdge::Bottom => viewport.height,
        };
        element_line - viewport_line
    }
}

/// Maps a tracked element's scroll position to a progress value.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    element: ElementId,
    start: ScrollMarker,
    end: ScrollMarker,
    start_offset: f32,
    end_offset: f32,
    degenerate: bool,
    progress: f32,
}

impl ScrollTracker {
    /// Creates a tracker and resolves its marker offsets immediately.
    ///
    /// # Errors
    ///
    /// [`MotionError::Detached`] if the element cannot be measured.
    pub fn new(
        page: &impl PageAdapter,
        element: ElementId,
        start: ScrollMarker,
        end: ScrollMarker,
    ) -> MotionResult<Self> {
        let mut tracker = Self {
            element,
            start,
            end,
            start_offset: 0.0,
            end_offset: 0.0,
            degenerate: false,
            progress: 0.0,
        };
        tracker.refresh(page)?;
        Ok(tracker)
    }

    /// Re-resolves marker offsets against current layout.
    ///
    /// Call on resize or any layout change; marker resolution depends on
    /// element geometry, which moves independently of scroll position.
    ///
    /// # Errors
    ///
    /// [`MotionError::Detached`] if the element cannot be measured.
    pub fn refresh(&mut self, page: &impl PageAdapter) -> MotionResult<()> {
        let rect = page
            .measure(self.element)
            .ok_or(MotionError::Detached(self.element))?;
        let viewport = page.viewport();

        self.start_offset = self.start.resolve(rect, viewport);
        self.end_offset = self.end.resolve(rect, viewport);
        self.degenerate = self.end_offset <= self.start_offset;

        if self.degenerate {
            // Progress pins to 0 rather than dividing by a degenerate range.
            tracing::warn!(
                error = %MotionError::DegenerateRange {
                    start: self.start_offset,
                    end: self.end_offset,
                },
                "scroll range collapsed; progress pinned to 0"
            );
        }
        Ok(())
    }

    /// Recomputes progress for the given scroll offset.
    ///
    /// `clamp((scroll - start) / (end - start), 0, 1)`; a degenerate
    /// range yields 0.
    pub fn sample(&mut self, scroll: f32) -> f32 {
        self.progress = if self.degenerate {
            0.0
        } else {
            ((scroll - self.start_offset) / (self.end_offset - self.start_offset)).clamp(0.0, 1.0)
        };
        self.progress
    }

    /// The most recently sampled progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The tracked element.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }
}
