//! Smooth in-page navigation.
//!
//! Intercepts anchor activations carrying a fragment identifier and
//! replaces the default jump with an eased scroll to the target's top
//! edge. The visible fragment updates on arrival through a plain state
//! write - it never re-enters interception, so navigation cannot trigger
//! itself.

use stardrift_shared::constants::NAV_SCROLL_DURATION;
use stardrift_shared::math::lerp;

use crate::easing::{Easing, Timeline};
use crate::error::MotionError;
use crate::page::PageAdapter;

/// A click/activation event as the page shell reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    /// True if the activated element is an anchor-style link.
    pub is_anchor: bool,
    /// The link's fragment identifier, including the leading `#`.
    pub fragment: Option<String>,
}

impl ClickTarget {
    /// An anchor click on `#fragment`.
    #[must_use]
    pub fn anchor(fragment: &str) -> Self {
        Self {
            is_anchor: true,
            fragment: Some(fragment.to_string()),
        }
    }
}

/// An in-flight navigation gesture. Ephemeral: exists only until the
/// scroll lands.
#[derive(Debug, Clone)]
struct NavAnimation {
    from: f32,
    to: f32,
    fragment: String,
    timeline: Timeline,
}

/// Intercepts in-page anchor clicks and performs the eased scroll.
#[derive(Debug, Clone, Default)]
pub struct SmoothScrollNavigator {
    active: Option<NavAnimation>,
}

impl SmoothScrollNavigator {
    /// Creates an idle navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a navigation scroll is in flight.
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.active.is_some()
    }

    /// Handles a click event.
    ///
    /// Returns true if the event was consumed (the caller should prevent
    /// the default jump). Non-anchor activations and anchors without a
    /// fragment pass through untouched. A fragment with no matching
    /// element is consumed and dropped - swallowing the jump keeps
    /// navigation feeling consistent, and a broken link must not become
    /// an error.
    pub fn intercept(&mut self, page: &impl PageAdapter, click: &ClickTarget) -> bool {
        if !click.is_anchor {
            return false;
        }
        let Some(hash) = click.fragment.as_deref() else {
            return false;
        };
        let Some(fragment) = hash.strip_prefix('#').filter(|f| !f.is_empty()) else {
            return false;
        };

        let Some(target) = page.element_by_fragment(fragment) else {
            tracing::debug!(
                error = %MotionError::UnknownFragment {
                    fragment: fragment.to_string(),
                },
                "dropping navigation request"
            );
            return true;
        };
        let Some(rect) = page.measure(target) else {
            tracing::debug!(?target, "navigation target unmeasurable; dropping");
            return true;
        };

        self.active = Some(NavAnimation {
            from: page.scroll_offset(),
            to: rect.top(),
            fragment: fragment.to_string(),
            timeline: Timeline::new(NAV_SCROLL_DURATION, Easing::SmoothInOut),
        });
        true
    }

    /// Advances the in-flight scroll, if any.
    ///
    /// On arrival the target's top edge aligns with the scroll offset and
    /// the visible fragment is committed.
    pub fn tick(&mut self, dt: f32, page: &mut impl PageAdapter) {
        let Some(animation) = self.active.as_mut() else {
            return;
        };

        animation.timeline.advance(dt);
        let offset = lerp(animation.from, animation.to, animation.timeline.progress());
        page.scroll_to(offset);

        if animation.timeline.is_complete() {
            page.set_fragment(&animation.fragment);
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, Rect, Viewport};

    fn page_with_target() -> MemoryPage {
        let mut page = MemoryPage::new(Viewport::default());
        page.insert_with_fragment("section", "contact", Rect::new(0.0, 2400.0, 800.0, 600.0));
        page
    }

    fn run_to_completion(navigator: &mut SmoothScrollNavigator, page: &mut MemoryPage) {
        for _ in 0..120 {
            navigator.tick(0.016, page);
        }
    }

    #[test]
    fn test_navigates_to_target_top_edge() {
        let mut page = page_with_target();
        let mut navigator = SmoothScrollNavigator::new();

        let consumed = navigator.intercept(&page, &ClickTarget::anchor("#contact"));
        assert!(consumed);
        assert!(navigator.is_navigating());

        run_to_completion(&mut navigator, &mut page);

        assert_eq!(page.scroll_offset(), 2400.0);
        assert_eq!(page.fragment(), Some("contact"));
        assert!(!navigator.is_navigating());
    }

    #[test]
    fn test_scroll_progresses_monotonically() {
        let mut page = page_with_target();
        let mut navigator = SmoothScrollNavigator::new();
        navigator.intercept(&page, &ClickTarget::anchor("#contact"));

        let mut last = page.scroll_offset();
        for _ in 0..60 {
            navigator.tick(0.016, &mut page);
            let now = page.scroll_offset();
            assert!(now >= last, "scroll went backwards: {last} -> {now}");
            last = now;
        }
    }

    #[test]
    fn test_missing_target_dropped_silently() {
        let mut page = page_with_target();
        let mut navigator = SmoothScrollNavigator::new();

        let consumed = navigator.intercept(&page, &ClickTarget::anchor("#nowhere"));
        assert!(consumed);
        assert!(!navigator.is_navigating());

        run_to_completion(&mut navigator, &mut page);
        assert_eq!(page.scroll_offset(), 0.0);
        assert_eq!(page.fragment(), None);
    }

    #[test]
    fn test_non_anchor_clicks_pass_through() {
        let page = page_with_target();
        let mut navigator = SmoothScrollNavigator::new();

        let plain = ClickTarget {
            is_anchor: false,
            fragment: Some("#contact".to_string()),
        };
        assert!(!navigator.intercept(&page, &plain));

        let no_hash = ClickTarget {
            is_anchor: true,
            fragment: None,
        };
        assert!(!navigator.intercept(&page, &no_hash));

        let empty_hash = ClickTarget {
            is_anchor: true,
            fragment: Some("#".to_string()),
        };
        assert!(!navigator.intercept(&page, &empty_hash));
    }

    #[test]
    fn test_fragment_commit_does_not_retrigger() {
        let mut page = page_with_target();
        let mut navigator = SmoothScrollNavigator::new();
        navigator.intercept(&page, &ClickTarget::anchor("#contact"));
        run_to_completion(&mut navigator, &mut page);

        // Arrival committed the fragment and went idle; nothing re-armed.
        assert!(!navigator.is_navigating());
        let scroll_after = page.scroll_offset();
        run_to_completion(&mut navigator, &mut page);
        assert_eq!(page.scroll_offset(), scroll_after);
    }
}
