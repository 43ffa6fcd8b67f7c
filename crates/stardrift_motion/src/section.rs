//! Section lifecycle scope.
//!
//! Every handle created while mounting a section - parallax bindings,
//! reveal groups - registers here, so teardown is a single bulk
//! operation. Nothing owned by a disposed scope can fire again.

use crate::page::{ElementId, PageAdapter};
use crate::parallax::ParallaxBinding;
use crate::reveal::RevealGroup;

/// Arena-style owner of one section's motion handles.
#[derive(Debug, Clone, Default)]
pub struct SectionScope {
    parallax: Vec<ParallaxBinding>,
    reveals: Vec<RevealGroup>,
    disposed: bool,
}

impl SectionScope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parallax binding.
    pub fn add_parallax(&mut self, binding: ParallaxBinding) {
        self.parallax.push(binding);
    }

    /// Registers a reveal group.
    pub fn add_reveal(&mut self, group: RevealGroup) {
        self.reveals.push(group);
    }

    /// Number of live parallax bindings.
    #[must_use]
    pub fn parallax_count(&self) -> usize {
        self.parallax.len()
    }

    /// Number of live reveal groups.
    #[must_use]
    pub fn reveal_count(&self) -> usize {
        self.reveals.len()
    }

    /// Forwards a scroll event to every binding.
    pub fn on_scroll(&mut self, page: &mut impl PageAdapter) {
        for binding in &mut self.parallax {
            binding.on_scroll(page);
        }
    }

    /// Forwards a resize event to every binding.
    pub fn on_resize(&mut self, page: &mut impl PageAdapter) {
        for binding in &mut self.parallax {
            binding.on_resize(page);
        }
    }

    /// Routes an intersection ratio to the groups observing `section`.
    pub fn on_intersection(&mut self, section: ElementId, ratio: f32) {
        for group in &mut self.reveals {
            if group.section() == section {
                group.on_intersection(ratio);
            }
        }
    }

    /// Advances reveal transitions.
    pub fn update(&mut self, dt: f32, page: &mut impl PageAdapter) {
        for group in &mut self.reveals {
            group.update(dt, page);
        }
    }

    /// Disposes every handle this scope owns. Idempotent; the scope is
    /// permanently inert afterwards.
    pub fn dispose_all(&mut self) {
        for binding in &mut self.parallax {
            binding.dispose();
        }
        self.parallax.clear();
        self.reveals.clear();
        self.disposed = true;
    }

    /// True once `dispose_all` has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, Rect, Viewport};
    use crate::parallax::ParallaxOptions;
    use crate::reveal::RevealOptions;

    #[test]
    fn test_bulk_teardown() {
        let mut page = MemoryPage::new(Viewport::default());
        let layer = page.insert(".parallax-bg", Rect::new(0.0, 1500.0, 800.0, 400.0));
        let section = page.insert("section", Rect::new(0.0, 1000.0, 800.0, 900.0));
        let item = page.insert(".reveal-item", Rect::new(0.0, 1100.0, 800.0, 80.0));

        let mut scope = SectionScope::new();
        scope.add_parallax(ParallaxBinding::bind(
            &page,
            ".parallax-bg",
            &ParallaxOptions::default(),
        ));
        scope.add_reveal(RevealGroup::new(section, &[item], &RevealOptions::default()));

        page.set_scroll(1400.0);
        scope.on_scroll(&mut page);
        scope.on_intersection(section, 0.5);
        scope.update(0.016, &mut page);
        let layer_writes = page.transform_writes(layer);
        let item_writes = page.transform_writes(item);
        assert!(layer_writes > 0);
        assert!(item_writes > 0);

        scope.dispose_all();
        scope.dispose_all(); // idempotent

        page.set_scroll(1600.0);
        scope.on_scroll(&mut page);
        scope.on_intersection(section, 0.0);
        scope.on_intersection(section, 0.9);
        scope.update(0.016, &mut page);

        assert_eq!(page.transform_writes(layer), layer_writes);
        assert_eq!(page.transform_writes(item), item_writes);
        assert!(scope.is_disposed());
        assert_eq!(scope.parallax_count(), 0);
        assert_eq!(scope.reveal_count(), 0);
    }
}
