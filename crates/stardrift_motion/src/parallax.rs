//! Parallax bindings: scroll-scrubbed transform offsets.
//!
//! Each binding couples a set of matched elements to scroll progress.
//! The offset is written directly from progress on every scroll event -
//! there is no easing and no clock, so reversing scroll direction
//! reverses the motion instantly.

use serde::Deserialize;

use stardrift_shared::constants::{
    DEFAULT_END_MARKER, DEFAULT_PARALLAX_SPEED, DEFAULT_START_MARKER,
};

use crate::page::{PageAdapter, Translation};
use crate::scroll::{ScrollMarker, ScrollTracker};

/// Axis of parallax movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Vertical movement (offset negated, so elements lag the scroll).
    #[default]
    Vertical,
    /// Horizontal movement.
    Horizontal,
}

/// Options for one parallax binding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxOptions {
    /// Speed multiplier.
    pub speed: f32,
    /// Direction of parallax movement.
    pub direction: Direction,
    /// Start marker string.
    pub start: String,
    /// End marker string.
    pub end: String,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_PARALLAX_SPEED,
            direction: Direction::Vertical,
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl ParallaxOptions {
    /// Parses a marker string, falling back to a default on error.
    ///
    /// Bad markers degrade to the defaults instead of failing the bind -
    /// the effect layer must never take the page down with it.
    fn marker_or(&self, marker: &str, fallback: ScrollMarker) -> ScrollMarker {
        ScrollMarker::parse(marker).unwrap_or_else(|error| {
            tracing::warn!(%error, "falling back to default scroll marker");
            fallback
        })
    }
}

/// One element's coupling of tracker and tween parameters.
#[derive(Debug, Clone)]
struct ParallaxLayer {
    tracker: ScrollTracker,
}

/// A disposable handle over every element matched at bind time.
///
/// Lifecycle: created at section mount, disposed at unmount. A disposed
/// binding never writes again; `dispose` is idempotent.
#[derive(Debug, Clone)]
pub struct ParallaxBinding {
    layers: Vec<ParallaxLayer>,
    speed: f32,
    direction: Direction,
    disposed: bool,
}

impl ParallaxBinding {
    /// Binds every element currently matching `selector`.
    ///
    /// Zero matches yields a valid no-op handle, not an error.
    #[must_use]
    pub fn bind(page: &impl PageAdapter, selector: &str, options: &ParallaxOptions) -> Self {
        let start = options.marker_or(&options.start, ScrollMarker::START_DEFAULT);
        let end = options.marker_or(&options.end, ScrollMarker::END_DEFAULT);

        let elements = page.select(selector);
        if elements.is_empty() {
            tracing::debug!(selector, "parallax selector matched no elements");
        }

        let layers = elements
            .into_iter()
            .filter_map(|element| match ScrollTracker::new(page, element, start, end) {
                Ok(tracker) => Some(ParallaxLayer { tracker }),
                Err(error) => {
                    tracing::debug!(%error, "skipping unmeasurable parallax element");
                    None
                }
            })
            .collect();

        Self {
            layers,
            speed: options.speed,
            direction: options.direction,
            disposed: false,
        }
    }

    /// Number of live layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if the binding drives no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// True once `dispose` has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Recomputes progress and writes transforms for the current scroll
    /// offset.
    ///
    /// Layers whose element has left the page tear down here, before any
    /// write could reach a detached node.
    pub fn on_scroll(&mut self, page: &mut impl PageAdapter) {
        if self.disposed {
            return;
        }

        let scroll = page.scroll_offset();
        let speed = self.speed;
        let direction = self.direction;

        self.layers.retain_mut(|layer| {
            let element = layer.tracker.element();
            if !page.is_attached(element) {
                tracing::debug!(?element, "parallax element detached; dropping layer");
                return false;
            }

            let progress = layer.tracker.sample(scroll);
            let offset = progress * speed * 100.0;
            let translation = match direction {
                Direction::Vertical => Translation::Percent { x: 0.0, y: -offset },
                Direction::Horizontal => Translation::Percent { x: offset, y: 0.0 },
            };
            page.set_transform(element, translation);
            true
        });
    }

    /// Re-resolves marker offsets after a layout change, then reapplies
    /// the current scroll position.
    pub fn on_resize(&mut self, page: &mut impl PageAdapter) {
        if self.disposed {
            return;
        }

        self.layers.retain_mut(|layer| match layer.tracker.refresh(page) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!(%error, "dropping parallax layer on refresh");
                false
            }
        });
        self.on_scroll(page);
    }

    /// Detaches every layer. Idempotent; after this call no scroll or
    /// resize event can produce a write.
    pub fn dispose(&mut self) {
        self.layers.clear();
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, Rect, Viewport};

    fn page_with_layers(count: usize) -> MemoryPage {
        let mut page = MemoryPage::new(Viewport {
            width: 1280.0,
            height: 800.0,
        });
        for i in 0..count {
            page.insert(
                ".parallax-bg",
                Rect::new(0.0, 1000.0 + i as f32 * 600.0, 1280.0, 400.0),
            );
        }
        page
    }

    #[test]
    fn test_scrub_three_elements_to_minus_fifty_percent() {
        let mut page = page_with_layers(3);
        let elements = page.select(".parallax-bg");
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &ParallaxOptions::default());
        assert_eq!(binding.len(), 3);

        // Scrub each element's full range and check the envelope.
        for &element in &elements {
            let rect = page.measure(element).unwrap();
            let start = rect.top() - 800.0;
            let end = rect.bottom();

            page.set_scroll(start);
            binding.on_scroll(&mut page);
            assert_eq!(
                page.transform_of(element).unwrap(),
                Translation::Percent { x: 0.0, y: -0.0 }
            );

            page.set_scroll(end);
            binding.on_scroll(&mut page);
            assert_eq!(
                page.transform_of(element).unwrap(),
                Translation::Percent { x: 0.0, y: -50.0 }
            );
        }
    }

    #[test]
    fn test_scrub_reverses_instantly() {
        let mut page = page_with_layers(1);
        let element = page.select(".parallax-bg")[0];
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &ParallaxOptions::default());

        page.set_scroll(850.0);
        binding.on_scroll(&mut page);
        let mid = page.transform_of(element).unwrap();

        page.set_scroll(1400.0);
        binding.on_scroll(&mut page);

        // Scroll straight back: the offset must return to the midpoint
        // value immediately, with no easing lag.
        page.set_scroll(850.0);
        binding.on_scroll(&mut page);
        assert_eq!(page.transform_of(element).unwrap(), mid);
    }

    #[test]
    fn test_horizontal_direction_positive() {
        let mut page = page_with_layers(1);
        let element = page.select(".parallax-bg")[0];
        let options = ParallaxOptions {
            direction: Direction::Horizontal,
            speed: 1.0,
            ..Default::default()
        };
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &options);

        page.set_scroll(1400.0); // element bottom, progress 1
        binding.on_scroll(&mut page);
        assert_eq!(
            page.transform_of(element).unwrap(),
            Translation::Percent { x: 100.0, y: 0.0 }
        );
    }

    #[test]
    fn test_empty_selector_is_noop_handle() {
        let mut page = page_with_layers(0);
        let mut binding = ParallaxBinding::bind(&page, ".missing", &ParallaxOptions::default());
        assert!(binding.is_empty());

        // Safe to drive and dispose.
        binding.on_scroll(&mut page);
        binding.on_resize(&mut page);
        binding.dispose();
    }

    #[test]
    fn test_dispose_stops_all_writes() {
        let mut page = page_with_layers(2);
        let elements = page.select(".parallax-bg");
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &ParallaxOptions::default());

        page.set_scroll(1200.0);
        binding.on_scroll(&mut page);
        let writes_before: Vec<u32> = elements.iter().map(|&e| page.transform_writes(e)).collect();

        binding.dispose();
        binding.dispose(); // idempotent

        page.set_scroll(1300.0);
        binding.on_scroll(&mut page);
        binding.on_resize(&mut page);

        for (&element, &before) in elements.iter().zip(&writes_before) {
            assert_eq!(page.transform_writes(element), before);
        }
        assert!(binding.is_disposed());
    }

    #[test]
    fn test_stale_element_never_written() {
        let mut page = page_with_layers(2);
        let elements = page.select(".parallax-bg");
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &ParallaxOptions::default());

        page.detach(elements[0]);
        let writes_before = page.transform_writes(elements[0]);

        page.set_scroll(1200.0);
        binding.on_scroll(&mut page);

        assert_eq!(page.transform_writes(elements[0]), writes_before);
        assert_eq!(binding.len(), 1);
        // The surviving layer still updates.
        assert!(page.transform_writes(elements[1]) > 0);
    }

    #[test]
    fn test_bad_marker_degrades_to_default() {
        let mut page = page_with_layers(1);
        let element = page.select(".parallax-bg")[0];
        let options = ParallaxOptions {
            start: "nonsense marker".to_string(),
            ..Default::default()
        };
        let mut binding = ParallaxBinding::bind(&page, ".parallax-bg", &options);

        // Behaves exactly as the default-marker binding would.
        page.set_scroll(1400.0);
        binding.on_scroll(&mut page);
        assert_eq!(
            page.transform_of(element).unwrap(),
            Translation::Percent { x: 0.0, y: -50.0 }
        );
    }
}
