//! # The Frame Scheduler
//!
//! One cooperative scheduler drives every subsystem. Each tick runs a
//! fixed phase order:
//!
//! ```text
//! Tick N (timestamp t):
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. DRAIN EVENTS                                                     │
//! │    ├─ Scroll / Resize ─ mark progress stale                         │
//! │    ├─ Intersection ─ route ratio to the section's reveal groups     │
//! │    └─ Click ─ offer to the navigator                                │
//! │                                                                     │
//! │ 2. SCROLL PROGRESS                                                  │
//! │    └─ Re-resolve markers (resize) / resample progress (scroll)      │
//! │       and write parallax transforms                                 │
//! │                                                                     │
//! │ 3. TIME-DRIVEN MOTION                                               │
//! │    ├─ Advance reveal transitions by dt                              │
//! │    └─ Advance the navigator's scroll animation by dt                │
//! │       (a navigator move re-applies parallax in the same tick)       │
//! │                                                                     │
//! │ 4. COMPOSE & COMMIT                                                 │
//! │    ├─ Compose the scene frame for absolute time t                   │
//! │    └─ Write the renderer time uniform                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Phase 2 always completes before phase 4, so a committed frame never
//! pairs fresh scroll progress with stale visuals or vice versa.

use parking_lot::RwLock;

use stardrift_motion::{
    PageAdapter, ParallaxBinding, RevealGroup, SectionScope, SmoothScrollNavigator,
};
use stardrift_rendering::{ParticleField, PointSpriteRenderer, SceneComposer, SceneFrame};

use crate::config::{EngineConfig, SectionConfig};
use crate::events::{EventBus, EventReceiver, EventSender, PageEvent, DEFAULT_EVENT_CAPACITY};

/// Largest delta time fed to animations, in seconds.
///
/// A backgrounded tab can stall ticks for minutes; clamping keeps the
/// first tick after resume from teleporting every transition to its end.
pub const MAX_DELTA_TIME: f32 = 0.1;

/// Per-tick statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Tick number, starting at 0.
    pub frame: u64,
    /// Absolute timestamp the tick ran at, in seconds.
    pub time: f32,
    /// Events drained this tick.
    pub events_processed: u32,
    /// True if a navigation scroll is still in flight.
    pub navigating: bool,
}

/// The engine: owns the page handle, the renderer and every mounted
/// effect, and advances them all from a single `tick`.
pub struct Engine<P: PageAdapter> {
    page: RwLock<P>,
    composer: SceneComposer,
    renderer: PointSpriteRenderer,
    scopes: Vec<SectionScope>,
    navigator: SmoothScrollNavigator,
    events_tx: EventSender,
    events_rx: EventReceiver,
    frame: SceneFrame,
    frame_count: u64,
    last_time: f32,
}

impl<P: PageAdapter> Engine<P> {
    /// Builds the engine and mounts every configured section.
    ///
    /// The particle field is generated here, once; sections whose
    /// selectors match nothing mount as inert scopes.
    #[must_use]
    pub fn new(config: &EngineConfig, page: P) -> Self {
        let field = ParticleField::generate(&(&config.field).into(), config.seed);
        let renderer = PointSpriteRenderer::new(field);
        let composer = SceneComposer::default();
        let (events_tx, events_rx) = EventBus::create_pair(DEFAULT_EVENT_CAPACITY);

        let scopes = config
            .sections
            .iter()
            .map(|section| mount_section(&page, section))
            .collect();

        let frame = composer.compose(0.0);
        Self {
            page: RwLock::new(page),
            composer,
            renderer,
            scopes,
            navigator: SmoothScrollNavigator::new(),
            events_tx,
            events_rx,
            frame,
            frame_count: 0,
            last_time: 0.0,
        }
    }

    /// A sender handle for the page shell to push events through.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    /// The page handle. The shell updates geometry and scroll state here
    /// before pushing the matching event.
    #[must_use]
    pub fn page(&self) -> &RwLock<P> {
        &self.page
    }

    /// The most recently composed scene frame.
    #[must_use]
    pub fn scene_frame(&self) -> SceneFrame {
        self.frame
    }

    /// The point-sprite renderer.
    #[must_use]
    pub fn renderer(&self) -> &PointSpriteRenderer {
        &self.renderer
    }

    /// Number of mounted section scopes, disposed ones included.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.scopes.len()
    }

    /// A mounted section scope, by mount order.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&SectionScope> {
        self.scopes.get(index)
    }

    /// Ticks completed so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Disposes one section's effects in bulk. Idempotent; unknown
    /// indices are ignored.
    pub fn unmount_section(&mut self, index: usize) {
        match self.scopes.get_mut(index) {
            Some(scope) => scope.dispose_all(),
            None => tracing::debug!(index, "unmount of unknown section ignored"),
        }
    }

    /// Runs one tick at an absolute timestamp, in seconds.
    pub fn tick(&mut self, timestamp: f32) -> FrameStats {
        let dt = (timestamp - self.last_time).clamp(0.0, MAX_DELTA_TIME);
        self.last_time = timestamp;

        let mut page = self.page.write();
        let mut events_processed = 0u32;
        // The first tick establishes initial transforms unconditionally.
        let mut scroll_stale = self.frame_count == 0;
        let mut layout_stale = false;

        // Phase 1: drain events.
        for event in self.events_rx.drain() {
            events_processed += 1;
            match event {
                PageEvent::Scroll => scroll_stale = true,
                PageEvent::Resize => layout_stale = true,
                PageEvent::Intersection { section, ratio } => {
                    for scope in &mut self.scopes {
                        scope.on_intersection(section, ratio);
                    }
                }
                PageEvent::Click { target } => {
                    let _ = self.navigator.intercept(&*page, &target);
                }
            }
        }

        // Phase 2: scroll progress and parallax.
        if layout_stale {
            for scope in &mut self.scopes {
                scope.on_resize(&mut *page);
            }
        } else if scroll_stale {
            for scope in &mut self.scopes {
                scope.on_scroll(&mut *page);
            }
        }

        // Phase 3: time-driven motion.
        for scope in &mut self.scopes {
            scope.update(dt, &mut *page);
        }
        let was_navigating = self.navigator.is_navigating();
        self.navigator.tick(dt, &mut *page);
        if was_navigating {
            // The navigator moved the scroll offset; parallax must not lag
            // a frame behind it.
            for scope in &mut self.scopes {
                scope.on_scroll(&mut *page);
            }
        }
        drop(page);

        // Phase 4: compose and commit.
        self.frame = self.composer.compose(timestamp);
        self.renderer.update(self.frame.time);

        let stats = FrameStats {
            frame: self.frame_count,
            time: timestamp,
            events_processed,
            navigating: self.navigator.is_navigating(),
        };
        self.frame_count += 1;
        stats
    }
}

/// Mounts one section's effects against the current page.
fn mount_section<P: PageAdapter>(page: &P, config: &SectionConfig) -> SectionScope {
    let mut scope = SectionScope::new();

    for parallax in &config.parallax {
        scope.add_parallax(ParallaxBinding::bind(
            page,
            &parallax.selector,
            &parallax.options,
        ));
    }

    if let Some(reveal) = &config.reveal {
        if let Some(&section) = page.select(&config.selector).first() {
            let members = page.select(&reveal.members);
            scope.add_reveal(RevealGroup::new(section, &members, &reveal.options));
        } else {
            tracing::warn!(
                selector = %config.selector,
                "section selector matched nothing; reveal skipped"
            );
        }
    }

    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use stardrift_motion::{MemoryPage, Rect, Translation, Viewport};

    fn engine_with_parallax() -> Engine<MemoryPage> {
        let mut page = MemoryPage::new(Viewport {
            width: 1280.0,
            height: 800.0,
        });
        page.insert(".parallax-bg", Rect::new(0.0, 1000.0, 1280.0, 500.0));

        let config = EngineConfig::from_toml_str(
            r##"
            [field]
            count = 10

            [[sections]]
            selector = "#hero"

            [[sections.parallax]]
            selector = ".parallax-bg"
            "##,
        )
        .unwrap();
        Engine::new(&config, page)
    }

    #[test]
    fn test_first_tick_establishes_transforms() {
        let mut engine = engine_with_parallax();
        let element = engine.page().read().select(".parallax-bg")[0];

        let stats = engine.tick(0.0);
        assert_eq!(stats.frame, 0);
        assert!(engine.page().read().transform_of(element).is_some());
    }

    #[test]
    fn test_scroll_event_updates_parallax_same_tick() {
        let mut engine = engine_with_parallax();
        let element = engine.page().read().select(".parallax-bg")[0];
        let sender = engine.sender();
        engine.tick(0.0);

        // Element bottom (1500) meets viewport top: progress 1, -50%.
        engine.page().write().set_scroll(1500.0);
        sender.send(PageEvent::Scroll);
        let stats = engine.tick(0.016);

        assert_eq!(stats.events_processed, 1);
        assert_eq!(
            engine.page().read().transform_of(element).unwrap(),
            Translation::Percent { x: 0.0, y: -50.0 }
        );
    }

    #[test]
    fn test_tick_commits_renderer_time() {
        let mut engine = engine_with_parallax();
        engine.tick(1.25);
        assert!((engine.renderer().time() - 1.25).abs() < 1e-6);
        assert!((engine.scene_frame().rotations.outer.y - 1.25 * 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_unmount_section_stops_writes() {
        let mut engine = engine_with_parallax();
        let element = engine.page().read().select(".parallax-bg")[0];
        let sender = engine.sender();
        engine.tick(0.0);

        engine.unmount_section(0);
        engine.unmount_section(99); // ignored

        let writes = engine.page().read().transform_writes(element);
        engine.page().write().set_scroll(1200.0);
        sender.send(PageEvent::Scroll);
        engine.tick(0.016);

        assert_eq!(engine.page().read().transform_writes(element), writes);
        assert!(engine.section(0).unwrap().is_disposed());
    }
}
