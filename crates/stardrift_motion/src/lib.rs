//! # STARDRIFT Motion
//!
//! The scroll-driven half of the engine: progress tracking, parallax
//! scrubbing, viewport reveal transitions and smooth in-page navigation.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        MOTION PIPELINE                        │
//! ├───────────────────────────────────────────────────────────────┤
//! │  scroll/resize ──> ScrollTracker ──> progress ∈ [0,1]         │
//! │                          │                                    │
//! │                          └──> ParallaxBinding ──> transforms  │
//! │  intersection  ──> RevealGroup ──────────────────> poses      │
//! │  click         ──> SmoothScrollNavigator ────────> scroll_to  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! A broken background effect must never break page usability. Every
//! failure path here degrades silently: empty selectors become no-op
//! handles, missing anchor targets drop the request, stale elements tear
//! their bindings down before the next write. Problems surface through
//! `tracing`, never through the public contract.
//!
//! The page itself is reached only through the [`page::PageAdapter`]
//! seam, which keeps every piece of this crate testable against the
//! in-memory [`page::MemoryPage`].

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod easing;
pub mod error;
pub mod navigate;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod scroll;
pub mod section;

pub use easing::{Easing, Timeline};
pub use error::{MotionError, MotionResult};
pub use navigate::{ClickTarget, SmoothScrollNavigator};
pub use page::{ElementId, MemoryPage, PageAdapter, Rect, Translation, Viewport};
pub use parallax::{Direction, ParallaxBinding, ParallaxOptions};
pub use reveal::{RevealGroup, RevealObserver, RevealOptions, Visibility};
pub use scroll::{ScrollMarker, ScrollTracker};
pub use section::SectionScope;
