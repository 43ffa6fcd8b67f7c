//! The page adapter seam.
//!
//! The core logic never touches a real document. It depends on this
//! interface for everything it needs from the platform: selector queries,
//! geometry reads, scroll state, and presentation-property writes. The
//! engine reads layout and writes ONLY transform/opacity/fragment - never
//! layout - so measurement and mutation cannot thrash each other.
//!
//! [`MemoryPage`] is the deterministic in-memory implementation used by
//! the headless demo binary and by every test in the workspace.

use std::collections::HashMap;

/// Opaque handle to a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// An element's bounding box in document coordinates.
///
/// `y` grows downward; `y == 0` is the document top, not the viewport top.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a rect.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge in document coordinates.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge in document coordinates.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Visible viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// A transform write: either a percentage offset (relative to the
/// element's own size, the parallax convention) or a pixel offset (the
/// reveal convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Translation {
    /// Offset as a percentage of the element's own dimensions.
    Percent {
        /// Horizontal offset in percent.
        x: f32,
        /// Vertical offset in percent.
        y: f32,
    },
    /// Offset in pixels.
    Pixels {
        /// Horizontal offset in pixels.
        x: f32,
        /// Vertical offset in pixels.
        y: f32,
    },
}

/// Capabilities the motion layer needs from the enclosing page.
///
/// Reads are layout queries; writes are presentation-only. Implementors
/// must guarantee that writes to detached elements are impossible to
/// observe - the engine checks [`PageAdapter::is_attached`] first, but a
/// defensive implementation may also ignore such writes.
pub trait PageAdapter {
    /// All elements currently matching a selector, in document order.
    fn select(&self, selector: &str) -> Vec<ElementId>;

    /// An element's bounding box in document coordinates, or `None` if
    /// the element is detached.
    fn measure(&self, element: ElementId) -> Option<Rect>;

    /// True if the element is still part of the page.
    fn is_attached(&self, element: ElementId) -> bool;

    /// Current viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> f32;

    /// Resolves an in-page fragment identifier to its element.
    fn element_by_fragment(&self, fragment: &str) -> Option<ElementId>;

    /// Writes a transform offset. Presentation-only; never affects layout.
    fn set_transform(&mut self, element: ElementId, translation: Translation);

    /// Writes an opacity value in `[0, 1]`.
    fn set_opacity(&mut self, element: ElementId, opacity: f32);

    /// Programmatically scrolls the page to an absolute offset.
    fn scroll_to(&mut self, offset: f32);

    /// Updates the visible location fragment. This is a state write, not
    /// a navigation - it must never feed back into click interception.
    fn set_fragment(&mut self, fragment: &str);
}

/// One element in a [`MemoryPage`].
#[derive(Debug, Clone, Default)]
struct MemoryElement {
    rect: Rect,
    selectors: Vec<String>,
    fragment: Option<String>,
    attached: bool,
    transform: Option<Translation>,
    opacity: Option<f32>,
    transform_writes: u32,
}

/// Deterministic in-memory page.
///
/// Selector matching is exact-string against the selectors an element was
/// inserted with - enough to exercise every code path without a real
/// document. Insertion order is document order.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: Vec<(ElementId, MemoryElement)>,
    by_id: HashMap<ElementId, usize>,
    next_id: u64,
    viewport: Viewport,
    scroll: f32,
    fragment: Option<String>,
}

impl MemoryPage {
    /// Creates an empty page with the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Inserts an element matching `selector` with the given geometry.
    pub fn insert(&mut self, selector: &str, rect: Rect) -> ElementId {
        self.insert_element(&[selector], None, rect)
    }

    /// Inserts an element reachable by an in-page fragment.
    pub fn insert_with_fragment(&mut self, selector: &str, fragment: &str, rect: Rect) -> ElementId {
        self.insert_element(&[selector], Some(fragment), rect)
    }

    fn insert_element(
        &mut self,
        selectors: &[&str],
        fragment: Option<&str>,
        rect: Rect,
    ) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let element = MemoryElement {
            rect,
            selectors: selectors.iter().map(|s| (*s).to_string()).collect(),
            fragment: fragment.map(str::to_string),
            attached: true,
            transform: None,
            opacity: None,
            transform_writes: 0,
        };
        self.by_id.insert(id, self.elements.len());
        self.elements.push((id, element));
        id
    }

    fn get(&self, id: ElementId) -> Option<&MemoryElement> {
        self.by_id.get(&id).map(|&i| &self.elements[i].1)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut MemoryElement> {
        let index = *self.by_id.get(&id)?;
        Some(&mut self.elements[index].1)
    }

    /// Removes an element from the page, as if its section unmounted.
    pub fn detach(&mut self, id: ElementId) {
        if let Some(element) = self.get_mut(id) {
            element.attached = false;
        }
    }

    /// Moves an element, as a layout change would.
    pub fn relocate(&mut self, id: ElementId, rect: Rect) {
        if let Some(element) = self.get_mut(id) {
            element.rect = rect;
        }
    }

    /// Sets the scroll offset, as a user scroll would.
    pub fn set_scroll(&mut self, offset: f32) {
        self.scroll = offset;
    }

    /// Resizes the viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Last transform written to an element.
    #[must_use]
    pub fn transform_of(&self, id: ElementId) -> Option<Translation> {
        self.get(id).and_then(|e| e.transform)
    }

    /// Last opacity written to an element.
    #[must_use]
    pub fn opacity_of(&self, id: ElementId) -> Option<f32> {
        self.get(id).and_then(|e| e.opacity)
    }

    /// How many transform writes an element has received.
    #[must_use]
    pub fn transform_writes(&self, id: ElementId) -> u32 {
        self.get(id).map_or(0, |e| e.transform_writes)
    }

    /// The current visible fragment, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl PageAdapter for MemoryPage {
    fn select(&self, selector: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, e)| e.attached && e.selectors.iter().any(|s| s == selector))
            .map(|(id, _)| *id)
            .collect()
    }

    fn measure(&self, element: ElementId) -> Option<Rect> {
        self.get(element)
            .filter(|e| e.attached)
            .map(|e| e.rect)
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.get(element).is_some_and(|e| e.attached)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    fn element_by_fragment(&self, fragment: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, e)| e.attached && e.fragment.as_deref() == Some(fragment))
            .map(|(id, _)| *id)
    }

    fn set_transform(&mut self, element: ElementId, translation: Translation) {
        if let Some(e) = self.get_mut(element) {
            if e.attached {
                e.transform = Some(translation);
                e.transform_writes += 1;
            }
        }
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        if let Some(e) = self.get_mut(element) {
            if e.attached {
                e.opacity = Some(opacity);
            }
        }
    }

    fn scroll_to(&mut self, offset: f32) {
        self.scroll = offset;
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = Some(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_is_document_order() {
        let mut page = MemoryPage::new(Viewport::default());
        let a = page.insert(".layer", Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = page.insert(".layer", Rect::new(0.0, 200.0, 100.0, 100.0));
        let _other = page.insert(".unrelated", Rect::default());
        assert_eq!(page.select(".layer"), vec![a, b]);
    }

    #[test]
    fn test_detached_element_is_invisible() {
        let mut page = MemoryPage::new(Viewport::default());
        let a = page.insert(".layer", Rect::new(0.0, 0.0, 100.0, 100.0));
        page.detach(a);

        assert!(!page.is_attached(a));
        assert!(page.measure(a).is_none());
        assert!(page.select(".layer").is_empty());

        // Writes to detached elements are dropped.
        page.set_transform(a, Translation::Pixels { x: 0.0, y: 5.0 });
        assert_eq!(page.transform_writes(a), 0);
    }

    #[test]
    fn test_fragment_resolution() {
        let mut page = MemoryPage::new(Viewport::default());
        let about = page.insert_with_fragment("section", "about", Rect::new(0.0, 900.0, 800.0, 600.0));
        assert_eq!(page.element_by_fragment("about"), Some(about));
        assert_eq!(page.element_by_fragment("missing"), None);
    }
}
