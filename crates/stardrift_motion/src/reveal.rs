//! Viewport reveal: intersection-driven entrance transitions.
//!
//! An observer watches one section's intersection ratio against a
//! threshold. When the section becomes visible, its declared members run
//! a staggered entrance from the hidden pose (offset + transparent) to
//! the visible pose (identity + opaque). Stagger order follows the
//! declared member sequence, never crossing order.

use serde::Deserialize;

use stardrift_shared::constants::{
    DEFAULT_REVEAL_THRESHOLD, REVEAL_DURATION, REVEAL_HIDDEN_OFFSET, REVEAL_STAGGER,
};

use crate::easing::{Easing, Timeline};
use crate::page::{ElementId, PageAdapter, Translation};

/// Visibility state of an observed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Not yet (or no longer) intersecting past the threshold.
    #[default]
    Unseen,
    /// Intersecting past the threshold.
    Visible,
}

/// Options for a reveal observer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealOptions {
    /// Intersection ratio that counts as visible, in `(0, 1]`.
    pub threshold: f32,
    /// If true, the first transition to visible is terminal.
    pub trigger_once: bool,
    /// Transition duration in seconds.
    pub duration: f32,
    /// Per-member delay step in seconds.
    pub stagger: f32,
    /// Hidden-pose vertical offset in pixels.
    pub hidden_offset: f32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            trigger_once: false,
            duration: REVEAL_DURATION,
            stagger: REVEAL_STAGGER,
            hidden_offset: REVEAL_HIDDEN_OFFSET,
        }
    }
}

/// Threshold-crossing state machine for one observed element.
///
/// With `trigger_once`, `Visible` is terminal: once reached, every later
/// crossing is ignored. Without it, state tracks the live crossing.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    threshold: f32,
    trigger_once: bool,
    state: Visibility,
    has_been_visible: bool,
}

impl RevealObserver {
    /// Creates an observer in the `Unseen` state.
    #[must_use]
    pub fn new(threshold: f32, trigger_once: bool) -> Self {
        Self {
            threshold,
            trigger_once,
            state: Visibility::Unseen,
            has_been_visible: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> Visibility {
        self.state
    }

    /// Feeds a new intersection ratio.
    ///
    /// Returns the new state if this ratio crossed the threshold in
    /// either direction, `None` if nothing changed.
    pub fn on_ratio(&mut self, ratio: f32) -> Option<Visibility> {
        if self.trigger_once && self.has_been_visible {
            // Terminal: stays Visible regardless of further crossings.
            return None;
        }

        let intersecting = ratio >= self.threshold;
        let next = if intersecting {
            Visibility::Visible
        } else {
            Visibility::Unseen
        };

        if next == self.state {
            return None;
        }

        self.state = next;
        if next == Visibility::Visible {
            self.has_been_visible = true;
        }
        Some(next)
    }
}

/// One member of a reveal group.
#[derive(Debug, Clone)]
struct RevealMember {
    element: ElementId,
    timeline: Timeline,
}

/// A section's entrance transition: one observer plus an ordered member
/// sequence.
///
/// Owned by the section's lifecycle scope; dropping the group detaches
/// everything at once.
#[derive(Debug, Clone)]
pub struct RevealGroup {
    section: ElementId,
    observer: RevealObserver,
    members: Vec<RevealMember>,
    hidden_offset: f32,
    animating: bool,
}

impl RevealGroup {
    /// Creates a group over a declared member sequence.
    ///
    /// `members` order is the stagger order: member `i` starts after
    /// `i * stagger` seconds.
    #[must_use]
    pub fn new(section: ElementId, members: &[ElementId], options: &RevealOptions) -> Self {
        let members = members
            .iter()
            .enumerate()
            .map(|(index, &element)| RevealMember {
                element,
                timeline: Timeline::new(options.duration, Easing::SmoothInOut)
                    .with_delay(index as f32 * options.stagger),
            })
            .collect();

        Self {
            section,
            observer: RevealObserver::new(options.threshold, options.trigger_once),
            members,
            hidden_offset: options.hidden_offset,
            animating: false,
        }
    }

    /// The observed section element.
    #[must_use]
    pub fn section(&self) -> ElementId {
        self.section
    }

    /// Current visibility state.
    #[must_use]
    pub fn state(&self) -> Visibility {
        self.observer.state()
    }

    /// Feeds an intersection ratio for the section.
    ///
    /// A transition to `Visible` rewinds and starts every member
    /// timeline; a transition back to `Unseen` snaps members to the
    /// hidden pose on the next `update`.
    pub fn on_intersection(&mut self, ratio: f32) {
        match self.observer.on_ratio(ratio) {
            Some(Visibility::Visible) => {
                for member in &mut self.members {
                    member.timeline.reset();
                }
                self.animating = true;
            }
            Some(Visibility::Unseen) => {
                self.animating = true;
            }
            None => {}
        }
    }

    /// Advances member timelines and writes poses.
    ///
    /// Detached members are dropped before any write. Once every member
    /// has settled, updates become free until the next crossing.
    pub fn update(&mut self, dt: f32, page: &mut impl PageAdapter) {
        if !self.animating {
            return;
        }

        let hidden_offset = self.hidden_offset;
        let visible = self.observer.state() == Visibility::Visible;
        let mut settled = true;

        self.members.retain_mut(|member| {
            if !page.is_attached(member.element) {
                tracing::debug!(element = ?member.element, "reveal member detached; dropping");
                return false;
            }

            if visible {
                member.timeline.advance(dt);
                let progress = member.timeline.progress();
                page.set_transform(
                    member.element,
                    Translation::Pixels {
                        x: 0.0,
                        y: hidden_offset * (1.0 - progress),
                    },
                );
                page.set_opacity(member.element, progress);
                if !member.timeline.is_complete() {
                    settled = false;
                }
            } else {
                // Exit: snap straight back to the hidden pose.
                member.timeline.reset();
                page.set_transform(
                    member.element,
                    Translation::Pixels {
                        x: 0.0,
                        y: hidden_offset,
                    },
                );
                page.set_opacity(member.element, 0.0);
            }
            true
        });

        // An exit snap is a single write; a settled entrance is done.
        self.animating = visible && !settled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{MemoryPage, Rect, Viewport};

    fn group_fixture(trigger_once: bool) -> (MemoryPage, RevealGroup, Vec<ElementId>) {
        let mut page = MemoryPage::new(Viewport::default());
        let section = page.insert("section", Rect::new(0.0, 1000.0, 800.0, 600.0));
        let members: Vec<ElementId> = (0..3)
            .map(|i| {
                page.insert(
                    ".reveal-item",
                    Rect::new(0.0, 1050.0 + i as f32 * 100.0, 800.0, 80.0),
                )
            })
            .collect();
        let options = RevealOptions {
            trigger_once,
            ..Default::default()
        };
        let group = RevealGroup::new(section, &members, &options);
        (page, group, members)
    }

    #[test]
    fn test_observer_toggles_on_crossings() {
        let mut observer = RevealObserver::new(0.1, false);

        assert_eq!(observer.on_ratio(0.05), None);
        assert_eq!(observer.on_ratio(0.2), Some(Visibility::Visible));
        assert_eq!(observer.on_ratio(0.3), None); // no crossing
        assert_eq!(observer.on_ratio(0.0), Some(Visibility::Unseen));
        assert_eq!(observer.on_ratio(0.5), Some(Visibility::Visible));
    }

    #[test]
    fn test_observer_trigger_once_is_terminal() {
        let mut observer = RevealObserver::new(0.1, true);

        assert_eq!(observer.on_ratio(0.2), Some(Visibility::Visible));
        // Any number of later crossings: state pinned to Visible.
        assert_eq!(observer.on_ratio(0.0), None);
        assert_eq!(observer.on_ratio(0.9), None);
        assert_eq!(observer.on_ratio(0.0), None);
        assert_eq!(observer.state(), Visibility::Visible);
    }

    #[test]
    fn test_stagger_follows_declared_order() {
        let (mut page, mut group, members) = group_fixture(false);

        group.on_intersection(0.5);
        // 0.15s in: member 0 (delay 0.0) is moving, member 1 (delay 0.1)
        // has barely started, member 2 (delay 0.2) has not.
        group.update(0.15, &mut page);

        let o0 = page.opacity_of(members[0]).unwrap();
        let o1 = page.opacity_of(members[1]).unwrap();
        let o2 = page.opacity_of(members[2]).unwrap();
        assert!(o0 > o1, "member 0 should lead member 1: {o0} vs {o1}");
        assert!(o1 > o2, "member 1 should lead member 2: {o1} vs {o2}");
        assert_eq!(o2, 0.0);
    }

    #[test]
    fn test_reveal_settles_at_visible_pose() {
        let (mut page, mut group, members) = group_fixture(false);

        group.on_intersection(0.5);
        for _ in 0..120 {
            group.update(0.016, &mut page);
        }

        for &member in &members {
            assert_eq!(
                page.transform_of(member).unwrap(),
                Translation::Pixels { x: 0.0, y: 0.0 }
            );
            assert_eq!(page.opacity_of(member).unwrap(), 1.0);
        }
    }

    #[test]
    fn test_exit_snaps_back_when_repeatable() {
        let (mut page, mut group, members) = group_fixture(false);

        group.on_intersection(0.5);
        for _ in 0..120 {
            group.update(0.016, &mut page);
        }

        group.on_intersection(0.0);
        group.update(0.016, &mut page);

        assert_eq!(
            page.transform_of(members[0]).unwrap(),
            Translation::Pixels { x: 0.0, y: 30.0 }
        );
        assert_eq!(page.opacity_of(members[0]).unwrap(), 0.0);
    }

    #[test]
    fn test_trigger_once_never_replays() {
        let (mut page, mut group, members) = group_fixture(true);

        group.on_intersection(0.5);
        for _ in 0..120 {
            group.update(0.016, &mut page);
        }

        // Leave and re-enter; pose must stay at the visible identity.
        group.on_intersection(0.0);
        group.update(0.016, &mut page);
        group.on_intersection(0.9);
        group.update(0.016, &mut page);

        assert_eq!(
            page.transform_of(members[0]).unwrap(),
            Translation::Pixels { x: 0.0, y: 0.0 }
        );
        assert_eq!(page.opacity_of(members[0]).unwrap(), 1.0);
    }

    #[test]
    fn test_detached_member_not_written() {
        let (mut page, mut group, members) = group_fixture(false);

        page.detach(members[1]);
        group.on_intersection(0.5);
        group.update(0.3, &mut page);

        assert_eq!(page.transform_writes(members[1]), 0);
        assert!(page.transform_writes(members[0]) > 0);
    }
}
